//! `RAW_HARPS_BBOX` / `PROCESSED_HARPS_BBOX`: per-(region, ts) bounding boxes.

use crate::types::{RegionId, Ts};
use heliogeom::BBox;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BBoxSample {
    pub region_id: RegionId,
    pub ts: Ts,
    pub bbox: BBox,
    pub interpolated: bool,
    pub trusted_field: bool,
}

/// One table instance is used for `RAW_HARPS_BBOX`, another for
/// `PROCESSED_HARPS_BBOX` — same shape, different contents, per spec.md §6.
#[derive(Debug, Default)]
pub struct BBoxTable {
    by_region: HashMap<RegionId, Vec<BBoxSample>>,
}

impl BBoxTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.by_region.clear();
    }

    /// Insert keeping the per-region series sorted by `ts`.
    pub fn insert(&mut self, sample: BBoxSample) {
        let series = self.by_region.entry(sample.region_id).or_default();
        let pos = series.partition_point(|s| s.ts <= sample.ts);
        series.insert(pos, sample);
    }

    pub fn series(&self, region_id: RegionId) -> &[BBoxSample] {
        self.by_region.get(&region_id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn region_ids(&self) -> Vec<RegionId> {
        let mut ids: Vec<RegionId> = self.by_region.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Nearest-timestamp lookup by absolute `|delta|`, per spec.md §4.D's
    /// bbox snapshot rule. Returns `None` if the region has no samples.
    pub fn nearest(&self, region_id: RegionId, ts: Ts) -> Option<&BBoxSample> {
        let series = self.by_region.get(&region_id)?;
        if series.is_empty() {
            return None;
        }
        let pos = series.partition_point(|s| s.ts < ts);
        let candidates = [pos.checked_sub(1), Some(pos)]
            .into_iter()
            .flatten()
            .filter(|&i| i < series.len());
        candidates.min_by_key(|&i| (series[i].ts - ts).num_seconds().abs())
            .map(|i| &series[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use heliogeom::BBox;

    fn t(h: u32, m: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn sample(region_id: RegionId, h: u32, m: u32) -> BBoxSample {
        BBoxSample {
            region_id,
            ts: t(h, m),
            bbox: BBox::new(-5.0, 5.0, -5.0, 5.0).unwrap(),
            interpolated: false,
            trusted_field: true,
        }
    }

    #[test]
    fn nearest_picks_closest_by_absolute_delta() {
        let mut table = BBoxTable::new();
        table.insert(sample(1, 0, 0));
        table.insert(sample(1, 1, 0));
        table.insert(sample(1, 2, 0));

        let found = table.nearest(1, t(0, 50)).unwrap();
        assert_eq!(found.ts, t(1, 0));

        let found = table.nearest(1, t(0, 20)).unwrap();
        assert_eq!(found.ts, t(0, 0));
    }

    #[test]
    fn nearest_is_none_for_missing_region() {
        let table = BBoxTable::new();
        assert!(table.nearest(42, t(0, 0)).is_none());
    }
}
