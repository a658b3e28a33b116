//! CME halo / non-halo spatial test (spec.md §4.D).

use heliogeom::{distance_to_sun_centre, position_angle, BBox};
use store::Cme;

/// How far a region's bbox centre may sit from sun centre to still be
/// considered consistent with a halo CME. spec.md's prose states "< 1.0"
/// but that would admit everything short of the exact limb, contradicting
/// its own S4 scenario (lon=80° rejected); 0.2 is the original system's
/// `HALO_MAX_DIST_TO_SUN_CENTRE` and is what actually reproduces S4.
const HALO_DISTANCE_THRESHOLD: f64 = 0.2;
const PA_MARGIN_DEG: f64 = 10.0;

/// Reflects a signed angular delta (degrees, any range) onto `[0, 180]`.
fn reflected_delta_deg(a_deg: f64, b_deg: f64) -> f64 {
    let raw = (a_deg - b_deg).rem_euclid(360.0);
    raw.min(360.0 - raw)
}

/// Whether `bbox` is spatially consistent with `cme` at the CME's detection
/// time. `bbox` must already be the region's snapshot at that time.
pub fn is_spatially_consistent(cme: &Cme, bbox: &BBox) -> bool {
    let centre = bbox.centre();
    if cme.halo {
        distance_to_sun_centre(centre.lon, centre.lat) < HALO_DISTANCE_THRESHOLD
    } else {
        let Some(pa_cme) = cme.pa else { return false };
        let pa_bbox = position_angle(centre.lon, centre.lat);
        reflected_delta_deg(pa_bbox, pa_cme) < cme.width_deg / 2.0 + PA_MARGIN_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::CoronagraphField;

    fn halo_cme() -> Cme {
        Cme {
            cme_id: 1,
            detection_ts: chrono::NaiveDate::from_ymd_opt(2020, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            pa: None,
            width_deg: 360.0,
            quality: "good".into(),
            halo: true,
            field: CoronagraphField::Inner,
        }
    }

    fn narrow_cme(pa: f64, width: f64) -> Cme {
        Cme {
            pa: Some(pa),
            width_deg: width,
            halo: false,
            ..halo_cme()
        }
    }

    #[test]
    fn halo_cme_matches_near_disk_centre() {
        let bbox = BBox::new(0.0, 10.0, 0.0, 10.0).unwrap();
        assert!(is_spatially_consistent(&halo_cme(), &bbox));
    }

    #[test]
    fn halo_cme_rejects_limb_region() {
        let bbox = BBox::new(85.0, 89.0, -2.0, 2.0).unwrap();
        assert!(!is_spatially_consistent(&halo_cme(), &bbox));
    }

    #[test]
    fn non_halo_cme_matches_within_cone() {
        let bbox = BBox::new(-2.0, 2.0, 5.0, 10.0).unwrap();
        let pa_bbox = position_angle(bbox.centre().lon, bbox.centre().lat);
        let cme = narrow_cme(pa_bbox, 20.0);
        assert!(is_spatially_consistent(&cme, &bbox));
    }

    #[test]
    fn non_halo_cme_rejects_outside_cone() {
        let bbox = BBox::new(-2.0, 2.0, 5.0, 10.0).unwrap();
        let pa_bbox = position_angle(bbox.centre().lon, bbox.centre().lat);
        let cme = narrow_cme(pa_bbox + 180.0, 20.0);
        assert!(!is_spatially_consistent(&cme, &bbox));
    }
}
