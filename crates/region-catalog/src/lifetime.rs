//! Per-region lifetime (spec.md §4.B step 3).

use store::{BBoxSample, Ts};

/// `(start_ts, end_ts) = (min ts, max ts)` over a region's filled sample
/// series. `samples` must be non-empty and sorted by `ts`.
pub fn compute_lifetime(samples: &[BBoxSample]) -> Option<(Ts, Ts)> {
    let first = samples.first()?.ts;
    let last = samples.last()?.ts;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use heliogeom::BBox;

    fn sample(h: u32, m: u32) -> BBoxSample {
        let ts = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap();
        BBoxSample {
            region_id: 1,
            ts,
            bbox: BBox::new(-5.0, 5.0, -5.0, 5.0).unwrap(),
            interpolated: false,
            trusted_field: true,
        }
    }

    #[test]
    fn lifetime_spans_first_to_last_sorted_sample() {
        let samples = vec![sample(0, 0), sample(0, 12), sample(1, 0)];
        let (start, end) = compute_lifetime(&samples).unwrap();
        assert_eq!(start, samples[0].ts);
        assert_eq!(end, samples[2].ts);
    }

    #[test]
    fn empty_series_has_no_lifetime() {
        assert!(compute_lifetime(&[]).is_none());
    }
}
