//! CME eligibility mask applied before matching (spec.md §4.C): quality and
//! region-coverage bounds.

use store::{Cme, Ts};

/// `quality != "good"` excluded; detection preceding the earliest region
/// start or following the last region end excluded.
pub fn is_cme_eligible(cme: &Cme, earliest_region_start: Ts, latest_region_end: Ts) -> bool {
    cme.is_good_quality() && cme.detection_ts >= earliest_region_start && cme.detection_ts <= latest_region_end
}

pub fn eligible_cmes<'a>(cmes: &'a [Cme], earliest_region_start: Ts, latest_region_end: Ts) -> Vec<&'a Cme> {
    cmes.iter()
        .filter(|c| is_cme_eligible(c, earliest_region_start, latest_region_end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use store::CoronagraphField;

    fn t(day: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn before_earliest() -> Ts {
        NaiveDate::from_ymd_opt(2019, 12, 31).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn cme(quality: &str, detection_ts: Ts) -> Cme {
        Cme {
            cme_id: 1,
            detection_ts,
            pa: Some(10.0),
            width_deg: 20.0,
            quality: quality.to_string(),
            halo: false,
            field: CoronagraphField::Inner,
        }
    }

    #[test]
    fn excludes_non_good_quality() {
        assert!(!is_cme_eligible(&cme("poor", t(5)), t(1), t(10)));
        assert!(is_cme_eligible(&cme("good", t(5)), t(1), t(10)));
    }

    #[test]
    fn excludes_detections_outside_region_coverage() {
        assert!(!is_cme_eligible(&cme("good", t(20)), t(1), t(10)));
        assert!(!is_cme_eligible(&cme("good", before_earliest()), t(1), t(10)));
    }
}
