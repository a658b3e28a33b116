//! End-to-end association resolution (spec.md §4.E): builds every
//! (CME, region) candidate, then resolves one winner per CME while
//! allocating each dimming/flare to at most one association.

use crate::candidate::{candidate_order, in_verification_window, Candidate};
use crate::tier::assign_tier;
use std::collections::HashSet;
use store::{Association, AssociationMethod, Cme, MatchedEvent, RegionEventTable, RegionId, SpatialConsistencyTable};
use tracing::debug;

/// All candidates for one CME, each enriched with the closest in-window
/// dimming and the highest-scoring in-window flare matched to that region.
fn build_candidates(cme: &Cme, region_ids: &[RegionId], region_events: &RegionEventTable) -> Vec<Candidate> {
    region_ids
        .iter()
        .map(|&region_id| {
            let matches = region_events.for_region(region_id);

            let dimming = matches
                .iter()
                .filter_map(|m| match &m.event {
                    MatchedEvent::Dimming { id, ts } if in_verification_window(cme.detection_ts, *ts) => Some((*id, *ts)),
                    _ => None,
                })
                .min_by_key(|(_, ts)| (cme.detection_ts - *ts).num_seconds().abs());

            let flare = matches
                .iter()
                .filter_map(|m| match &m.event {
                    MatchedEvent::Flare { id, ts, class_score } if in_verification_window(cme.detection_ts, *ts) => {
                        Some((*id, *ts, *class_score))
                    }
                    _ => None,
                })
                .max_by(|a, b| a.2.partial_cmp(&b.2).unwrap());

            let tier = assign_tier(dimming.is_some(), flare.is_some(), flare.map(|(_, _, s)| s));

            (tier, Candidate {
                cme_id: cme.cme_id,
                cme_ts: cme.detection_ts,
                region_id,
                dimming,
                flare,
                tier: tier.unwrap_or(0),
            })
        })
        .filter_map(|(tier, c)| tier.map(|_| c))
        .collect()
}

/// Resolves every CME to at most one association, greedily allocating
/// dimmings/flares so none is reused (spec.md §4.E).
pub fn resolve_associations(
    cmes: &[&Cme],
    spatial: &SpatialConsistencyTable,
    region_events: &RegionEventTable,
) -> Vec<Association> {
    let mut all_candidates: Vec<Candidate> = Vec::new();

    for cme in cmes {
        let region_ids = spatial.for_cme(cme.cme_id);
        all_candidates.extend(build_candidates(cme, &region_ids, region_events));
    }

    all_candidates.sort_by(candidate_order);

    let mut resolved_cmes = HashSet::new();
    let mut used_dimmings = HashSet::new();
    let mut used_flares = HashSet::new();
    let mut associations = Vec::new();

    for candidate in all_candidates {
        if resolved_cmes.contains(&candidate.cme_id) {
            continue;
        }
        if let Some((id, _)) = candidate.dimming {
            if used_dimmings.contains(&id) {
                continue;
            }
        }
        if let Some((id, _, _)) = candidate.flare {
            if used_flares.contains(&id) {
                continue;
            }
        }

        if let Some((id, _)) = candidate.dimming {
            used_dimmings.insert(id);
        }
        if let Some((id, _, _)) = candidate.flare {
            used_flares.insert(id);
        }
        resolved_cmes.insert(candidate.cme_id);

        debug!(cme_id = candidate.cme_id, region_id = candidate.region_id, tier = candidate.tier, "association resolved");
        associations.push(Association {
            cme_id: candidate.cme_id,
            region_id: candidate.region_id,
            verification_tier: candidate.tier,
            method: AssociationMethod::Automatic,
            externally_verified: false,
        });
    }

    associations
}
