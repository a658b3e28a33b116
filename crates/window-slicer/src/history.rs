//! Lead-in history query (spec.md §4.F step 2): the latest associated CME
//! and per-tier counts over the lead-in period.

use store::{AssociationTable, CmeId, CmeTable, RegionId, Tier, TierCounts, Ts};

#[derive(Debug, Clone, Copy, Default)]
pub struct History {
    pub n_cmes_before: u32,
    pub n_cmes_before_tier: TierCounts,
    pub prev_cme_id: Option<CmeId>,
    pub prev_cme_diff_h: Option<f64>,
}

/// Associations for `region_id` whose CME detection falls in
/// `[lead_in_start, lead_in_end]`. The latest (closest to `obs_start`)
/// becomes `prev_cme_id`; every hit increments its tier's count.
pub fn query_history(region_id: RegionId, lead_in_start: Ts, obs_start: Ts, associations: &AssociationTable, cmes: &CmeTable) -> History {
    let mut hits: Vec<(Ts, CmeId, Tier)> = associations
        .for_region(region_id)
        .into_iter()
        .filter_map(|a| {
            let cme = cmes.get(a.cme_id)?;
            (cme.detection_ts >= lead_in_start && cme.detection_ts <= obs_start).then_some((cme.detection_ts, a.cme_id, a.verification_tier))
        })
        .collect();
    hits.sort_by_key(|(ts, _, _)| *ts);

    let mut tier_counts: TierCounts = [0; 5];
    for (_, _, tier) in &hits {
        if (1..=5).contains(tier) {
            tier_counts[(*tier - 1) as usize] += 1;
        }
    }

    let latest = hits.last();
    History {
        n_cmes_before: hits.len() as u32,
        n_cmes_before_tier: tier_counts,
        prev_cme_id: latest.map(|(_, id, _)| *id),
        prev_cme_diff_h: latest.map(|(ts, _, _)| (obs_start - *ts).num_seconds() as f64 / 3600.0),
    }
}
