//! Drives one region's window state machine end to end, emitting one
//! accepted or rejected slice per step (spec.md §4.F).

use crate::bounds::on_disk_bounds;
use crate::history::query_history;
use crate::image_policy::ImageCountPolicy;
use crate::label::query_label;
use crate::state::WindowState;
use crate::validity::{final_cme_association, unclear_cme_present};
use store::{BBoxSample, PipelineContext, RejectReason, RejectedSlice, Region, Slice, Ts};
use tracing::debug;

fn samples_in_obs(samples: &[BBoxSample], obs_start: Ts, obs_end: Ts) -> (usize, Option<Ts>) {
    let in_window: Vec<Ts> = samples.iter().filter(|s| s.ts >= obs_start && s.ts < obs_end).map(|s| s.ts).collect();
    (in_window.len(), in_window.last().copied())
}

fn rejected_row(slice_id: store::SliceId, region_id: store::RegionId, periods: Option<&crate::periods::Periods>, reason: RejectReason) -> RejectedSlice {
    RejectedSlice {
        slice_id,
        region_id,
        lead_in_start: periods.map(|p| p.lead_in.0),
        lead_in_end: periods.map(|p| p.lead_in.1),
        obs_start: periods.map(|p| p.obs.0),
        obs_end: periods.map(|p| p.obs.1),
        pred_start: periods.map(|p| p.pred.0),
        pred_end: periods.map(|p| p.pred.1),
        reject_reason: reason,
    }
}

/// Processes one region from its on-disk lifetime start to end, returning
/// the accepted and rejected slices produced. `slice_id` on each returned
/// row is a *region-local* step sequence number, not a final id — workers
/// run concurrently across regions, so final, globally ordered ids are
/// assigned by the caller once every region's output is collected (spec.md
/// §5: output ordering must be deterministic, by ascending `region_id`,
/// regardless of worker-thread scheduling).
pub fn process_region(region: &Region, ctx: &PipelineContext, image_policy: &dyn ImageCountPolicy) -> (Vec<Slice>, Vec<RejectedSlice>) {
    let samples: Vec<BBoxSample> = {
        let bbox = ctx.tables.processed_bbox.lock().unwrap();
        bbox.series(region.region_id).to_vec()
    };

    let mut accepted = Vec::new();
    let mut rejected = Vec::new();
    let mut step_seq: u64 = 0;

    let Some((on_disk_start, on_disk_end)) = on_disk_bounds(&samples) else {
        debug!(region_id = region.region_id, "no on-disk samples, emitting single rejected row");
        rejected.push(rejected_row(step_seq, region.region_id, None, RejectReason::NoBBoxData));
        return (accepted, rejected);
    };

    let params = ctx.params.clone();
    let mut state = WindowState::new(region.region_id, params.obs_len_h, params.step_h, region.start_ts, region.end_ts, on_disk_start, on_disk_end);

    let cmes = ctx.tables.cmes.lock().unwrap();
    let spatial = ctx.tables.spatial_consistency.lock().unwrap();
    let region_events = ctx.tables.region_events.lock().unwrap();
    let associations = ctx.tables.associations.lock().unwrap();

    loop {
        let periods = state.periods();
        let slice_id = step_seq;
        step_seq += 1;

        let reject = final_cme_association(region.region_id, periods.obs.0, periods.obs.1, &associations, &cmes)
            .map(|_| RejectReason::FinalCmeAssociation)
            .or_else(|| {
                params.strict
                    .then(|| unclear_cme_present(region.region_id, periods.obs.0, periods.obs.1, &cmes, &spatial, &region_events, &associations))
                    .flatten()
                    .map(|_| RejectReason::UnclearCmePresent)
            });

        match reject {
            Some(reason) => {
                rejected.push(rejected_row(slice_id, region.region_id, Some(&periods), reason));
            }
            None => {
                let (sample_count, last_sample_ts) = samples_in_obs(&samples, periods.obs.0, periods.obs.1);
                if !image_policy.accepts(params.obs_len_h, sample_count, last_sample_ts, periods.obs.1) {
                    rejected.push(rejected_row(slice_id, region.region_id, Some(&periods), RejectReason::MissingImages));
                } else {
                    let history = query_history(region.region_id, periods.lead_in.0, periods.obs.0, &associations, &cmes);
                    let label = query_label(region.region_id, periods.obs.1, periods.pred.1, &associations, &cmes);
                    accepted.push(Slice {
                        slice_id,
                        region_id: region.region_id,
                        lead_in_start: periods.lead_in.0,
                        lead_in_end: periods.lead_in.1,
                        obs_start: periods.obs.0,
                        obs_end: periods.obs.1,
                        pred_start: periods.pred.0,
                        pred_end: periods.pred.1,
                        n_cmes_before: history.n_cmes_before,
                        n_cmes_before_tier: history.n_cmes_before_tier,
                        prev_cme_id: history.prev_cme_id,
                        prev_cme_diff_h: history.prev_cme_diff_h,
                        label: label.label,
                        next_cme_id: label.next_cme_id,
                        next_cme_diff_h: label.next_cme_diff_h,
                        verification_tier: label.verification_tier,
                    });
                }
            }
        }

        state.step();
        if state.finished {
            break;
        }
    }

    (accepted, rejected)
}
