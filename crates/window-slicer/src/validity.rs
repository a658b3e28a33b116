//! Observation-window validity checks (spec.md §4.F step 1).

use assoc_resolver::candidate::in_verification_window;
use store::{AssociationTable, CmeId, CmeTable, RegionEventTable, RegionId, SpatialConsistencyTable, Ts};

/// `obs` is half-open (`[obs_start, obs_end)`, spec.md §4.F/§8): a CME at
/// exactly `obs_end` belongs to `pred` and counts toward the label, not
/// toward obs-window rejection.
fn ts_in_obs_range(ts: Ts, obs_start: Ts, obs_end: Ts) -> bool {
    ts >= obs_start && ts < obs_end
}

/// Strict-mode rejection: a CME detected inside `obs`, spatially consistent
/// with this region, carrying its own dimming/flare signature, whose final
/// association (if any) is to a *different* region. Its presence in the
/// observation window makes the window's label ambiguous.
pub fn unclear_cme_present(
    region_id: RegionId,
    obs_start: Ts,
    obs_end: Ts,
    cmes: &CmeTable,
    spatial: &SpatialConsistencyTable,
    region_events: &RegionEventTable,
    associations: &AssociationTable,
) -> Option<CmeId> {
    let matches = region_events.for_region(region_id);
    let mut hits: Vec<CmeId> = spatial
        .for_region(region_id)
        .into_iter()
        .filter(|&cme_id| {
            let Some(cme) = cmes.get(cme_id) else { return false };
            if !ts_in_obs_range(cme.detection_ts, obs_start, obs_end) {
                return false;
            }
            let has_signature = matches.iter().any(|m| {
                let event_ts = match &m.event {
                    store::MatchedEvent::Dimming { ts, .. } => *ts,
                    store::MatchedEvent::Flare { ts, .. } => *ts,
                };
                in_verification_window(cme.detection_ts, event_ts)
            });
            if !has_signature {
                return false;
            }
            match associations.get(cme_id) {
                Some(assoc) => assoc.region_id != region_id,
                None => true,
            }
        })
        .collect();
    hits.sort_unstable();
    hits.into_iter().next()
}

/// A CME whose final association is to this region and whose detection
/// falls inside `obs` — the eruption happening mid-window makes the
/// window unusable regardless of `strict`.
pub fn final_cme_association(region_id: RegionId, obs_start: Ts, obs_end: Ts, associations: &AssociationTable, cmes: &CmeTable) -> Option<CmeId> {
    let mut hits: Vec<CmeId> = associations
        .for_region(region_id)
        .into_iter()
        .filter_map(|a| {
            let cme = cmes.get(a.cme_id)?;
            ts_in_obs_range(cme.detection_ts, obs_start, obs_end).then_some(a.cme_id)
        })
        .collect();
    hits.sort_unstable();
    hits.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use store::{Association, AssociationMethod, Cme, CoronagraphField, MatchedEvent, RegionEventMatch, SpatialCandidate};

    fn t(h: u32, m: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn cme(id: CmeId, ts: Ts) -> Cme {
        Cme { cme_id: id, detection_ts: ts, pa: None, width_deg: 360.0, quality: "good".into(), halo: true, field: CoronagraphField::Inner }
    }

    #[test]
    fn rejects_unassociated_cme_with_signature_in_window() {
        let mut cmes = CmeTable::new();
        cmes.insert(1, t(12, 0), cme(1, t(12, 0)));
        let mut spatial = SpatialConsistencyTable::new();
        spatial.push(SpatialCandidate { cme_id: 1, region_id: 10 });
        let mut events = RegionEventTable::new();
        events.push(RegionEventMatch { region_id: 10, event: MatchedEvent::Flare { id: 1, ts: t(11, 0), class_score: 30.0 } });
        let associations = AssociationTable::new();

        let hit = unclear_cme_present(10, t(11, 0), t(13, 0), &cmes, &spatial, &events, &associations);
        assert_eq!(hit, Some(1));
    }

    #[test]
    fn does_not_reject_cme_already_finally_associated_to_this_region() {
        let mut cmes = CmeTable::new();
        cmes.insert(1, t(12, 0), cme(1, t(12, 0)));
        let mut spatial = SpatialConsistencyTable::new();
        spatial.push(SpatialCandidate { cme_id: 1, region_id: 10 });
        let mut events = RegionEventTable::new();
        events.push(RegionEventMatch { region_id: 10, event: MatchedEvent::Flare { id: 1, ts: t(11, 0), class_score: 30.0 } });
        let mut associations = AssociationTable::new();
        associations.insert(Association { cme_id: 1, region_id: 10, verification_tier: 2, method: AssociationMethod::Automatic, externally_verified: false });

        let hit = unclear_cme_present(10, t(11, 0), t(13, 0), &cmes, &spatial, &events, &associations);
        assert_eq!(hit, None);
    }

    #[test]
    fn final_association_mid_window_is_rejected() {
        let mut cmes = CmeTable::new();
        cmes.insert(5, t(12, 0), cme(5, t(12, 0)));
        let mut associations = AssociationTable::new();
        associations.insert(Association { cme_id: 5, region_id: 20, verification_tier: 1, method: AssociationMethod::Automatic, externally_verified: false });

        let hit = final_cme_association(20, t(11, 0), t(13, 0), &associations, &cmes);
        assert_eq!(hit, Some(5));
    }

    #[test]
    fn cme_at_exactly_obs_end_belongs_to_pred_not_obs() {
        let mut cmes = CmeTable::new();
        cmes.insert(5, t(13, 0), cme(5, t(13, 0)));
        let mut associations = AssociationTable::new();
        associations.insert(Association { cme_id: 5, region_id: 20, verification_tier: 1, method: AssociationMethod::Automatic, externally_verified: false });

        let hit = final_cme_association(20, t(11, 0), t(13, 0), &associations, &cmes);
        assert_eq!(hit, None);
    }
}
