//! Prediction-period label query (spec.md §4.F step 3): the earliest
//! associated CME in `pred`, or `label=0` if none.

use store::{AssociationTable, CmeId, CmeTable, RegionId, Tier, Ts};

#[derive(Debug, Clone, Copy, Default)]
pub struct Label {
    pub label: u8,
    pub next_cme_id: Option<CmeId>,
    pub next_cme_diff_h: Option<f64>,
    pub verification_tier: Option<Tier>,
}

pub fn query_label(region_id: RegionId, obs_end: Ts, pred_end: Ts, associations: &AssociationTable, cmes: &CmeTable) -> Label {
    let mut hits: Vec<(Ts, CmeId, Tier)> = associations
        .for_region(region_id)
        .into_iter()
        .filter_map(|a| {
            let cme = cmes.get(a.cme_id)?;
            (cme.detection_ts >= obs_end && cme.detection_ts <= pred_end).then_some((cme.detection_ts, a.cme_id, a.verification_tier))
        })
        .collect();
    hits.sort_by_key(|(ts, _, _)| *ts);

    match hits.first() {
        Some((ts, id, tier)) => Label {
            label: 1,
            next_cme_id: Some(*id),
            next_cme_diff_h: Some((*ts - obs_end).num_seconds() as f64 / 3600.0),
            verification_tier: Some(*tier),
        },
        None => Label::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use store::{Association, AssociationMethod, Cme, CoronagraphField};

    fn t(h: u32, m: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn cme(id: u32, ts: Ts) -> Cme {
        Cme { cme_id: id, detection_ts: ts, pa: None, width_deg: 360.0, quality: "good".into(), halo: true, field: CoronagraphField::Inner }
    }

    #[test]
    fn picks_earliest_cme_in_pred_window() {
        let mut cmes = CmeTable::new();
        cmes.insert(1, t(20, 0), cme(1, t(20, 0)));
        cmes.insert(2, t(15, 0), cme(2, t(15, 0)));
        let mut associations = AssociationTable::new();
        associations.insert(Association { cme_id: 1, region_id: 3, verification_tier: 2, method: AssociationMethod::Automatic, externally_verified: false });
        associations.insert(Association { cme_id: 2, region_id: 3, verification_tier: 1, method: AssociationMethod::Automatic, externally_verified: false });

        let l = query_label(3, t(10, 0), t(23, 0), &associations, &cmes);
        assert_eq!(l.label, 1);
        assert_eq!(l.next_cme_id, Some(2));
        assert_eq!(l.next_cme_diff_h, Some(5.0));
        assert_eq!(l.verification_tier, Some(1));
    }

    #[test]
    fn no_cme_in_pred_window_yields_negative_label() {
        let cmes = CmeTable::new();
        let associations = AssociationTable::new();
        let l = query_label(3, t(10, 0), t(23, 0), &associations, &cmes);
        assert_eq!(l.label, 0);
        assert_eq!(l.next_cme_id, None);
    }
}
