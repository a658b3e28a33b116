//! Bbox snapshot at an arbitrary event time (spec.md §4.D): nearest-
//! timestamp lookup followed by rotation if the gap exceeds one grid step.

use heliogeom::{rotate_bbox_to, BBox, RotationMode};
use store::{BBoxTable, RegionId, Ts};
use tracing::warn;

const GRID_STEP_MIN: i64 = 12;

/// The region's bbox as of `ts`, rotated from the nearest stored sample if
/// more than 12 minutes away. `None` if the region has no processed samples.
pub fn bbox_at(bbox_table: &BBoxTable, region_id: RegionId, ts: Ts) -> Option<BBox> {
    let nearest = bbox_table.nearest(region_id, ts)?;
    let delta = (nearest.ts - ts).num_minutes().abs();
    if delta <= GRID_STEP_MIN {
        return Some(nearest.bbox);
    }

    match rotate_bbox_to(&nearest.bbox, nearest.ts, ts, RotationMode::KeepShape) {
        Ok(rotated) => Some(rotated),
        Err(e) => {
            warn!(region_id, error = %e, "dropping bbox snapshot with invalid rotated geometry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use store::BBoxSample;

    fn t(h: u32, m: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn exact_match_needs_no_rotation() {
        let mut table = BBoxTable::new();
        table.insert(BBoxSample {
            region_id: 1,
            ts: t(0, 0),
            bbox: BBox::new(-5.0, 5.0, -5.0, 5.0).unwrap(),
            interpolated: false,
            trusted_field: true,
        });
        let bbox = bbox_at(&table, 1, t(0, 0)).unwrap();
        assert_eq!(bbox.lon_min, -5.0);
    }

    #[test]
    fn far_sample_is_rotated_forward() {
        let mut table = BBoxTable::new();
        table.insert(BBoxSample {
            region_id: 1,
            ts: t(0, 0),
            bbox: BBox::new(-5.0, 5.0, 0.0, 0.0).unwrap(),
            interpolated: false,
            trusted_field: true,
        });
        let bbox = bbox_at(&table, 1, t(1, 0)).unwrap();
        assert!(bbox.centre().lon > 0.0);
    }
}
