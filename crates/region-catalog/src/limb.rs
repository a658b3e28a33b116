//! Beam-limb trim/clamp (spec.md §4.B step 5).

use heliogeom::BBox;
use store::BBoxSample;

/// Drop samples entirely beyond either limb; clamp the rest into
/// `[-90, 90]` longitude. Returns the surviving samples in their original
/// order.
pub fn trim_beyond_limb(samples: Vec<BBoxSample>) -> Vec<BBoxSample> {
    samples
        .into_iter()
        .filter(|s| !(s.bbox.lon_min < -90.0 && s.bbox.lon_max < -90.0))
        .filter(|s| !(s.bbox.lon_min > 90.0 && s.bbox.lon_max > 90.0))
        .map(|mut s| {
            let clamped = BBox {
                lon_min: s.bbox.lon_min.max(-90.0),
                lon_max: s.bbox.lon_max.min(90.0),
                lat_min: s.bbox.lat_min,
                lat_max: s.bbox.lat_max,
            };
            s.bbox = clamped;
            s
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(lon_min: f64, lon_max: f64) -> BBoxSample {
        BBoxSample {
            region_id: 1,
            ts: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            bbox: BBox::new(lon_min, lon_max, -5.0, 5.0).unwrap(),
            interpolated: false,
            trusted_field: true,
        }
    }

    #[test]
    fn drops_samples_entirely_beyond_either_limb() {
        let samples = vec![sample(-95.0, -92.0), sample(92.0, 95.0), sample(-5.0, 5.0)];
        let trimmed = trim_beyond_limb(samples);
        assert_eq!(trimmed.len(), 1);
    }

    #[test]
    fn clamps_straddling_samples_to_limb() {
        let samples = vec![sample(-95.0, 5.0), sample(-5.0, 95.0)];
        let trimmed = trim_beyond_limb(samples);
        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed[0].bbox.lon_min, -90.0);
        assert_eq!(trimmed[1].bbox.lon_max, 90.0);
    }
}
