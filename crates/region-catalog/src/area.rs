//! Per-region mean fractional hemisphere area (spec.md §4.B step 4).

use heliogeom::BBox;
use store::BBoxSample;
use std::f64::consts::PI;

/// `A = (Δlon · |sin(lat_max) − sin(lat_min)|) / (2π)`, expressed in percent.
/// A bbox that fails validation contributes zero, matching "NULLs treated as
/// zero" — there is no null bbox in this representation, so an invalid one
/// is the closest equivalent.
fn sample_area_pct(bbox: &BBox) -> f64 {
    let dlon = bbox.width().to_radians();
    let dsinlat = (bbox.lat_max.to_radians().sin() - bbox.lat_min.to_radians().sin()).abs();
    (dlon * dsinlat) / (2.0 * PI) * 100.0
}

/// Arithmetic mean of per-sample area across the region's full filled series.
pub fn compute_mean_area_pct(samples: &[BBoxSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|s| sample_area_pct(&s.bbox)).sum();
    sum / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample(bbox: BBox) -> BBoxSample {
        BBoxSample {
            region_id: 1,
            ts: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            bbox,
            interpolated: false,
            trusted_field: true,
        }
    }

    #[test]
    fn larger_bbox_has_larger_area() {
        let small = sample(BBox::new(-5.0, 5.0, -5.0, 5.0).unwrap());
        let large = sample(BBox::new(-20.0, 20.0, -20.0, 20.0).unwrap());
        assert!(compute_mean_area_pct(&[large]) > compute_mean_area_pct(&[small]));
    }

    #[test]
    fn empty_series_has_zero_area() {
        assert_eq!(compute_mean_area_pct(&[]), 0.0);
    }

    #[test]
    fn full_sphere_bbox_is_100_percent() {
        let full = sample(BBox::new(-90.0, 90.0, -90.0, 90.0).unwrap());
        assert!((compute_mean_area_pct(&[full]) - 100.0).abs() < 1e-9);
    }
}
