//! `HARPS` table: one immutable row per tracked active region.

use crate::types::{RegionId, Ts};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub region_id: RegionId,
    pub start_ts: Ts,
    pub end_ts: Ts,
    /// Mean surface area, percent of visible-hemisphere area, 0..=100.
    pub area: f64,
    pub legacy_numbers: Vec<u32>,
    /// Count of legacy NOAA numbers mapped to this region (spec.md §6/SPEC_FULL §3).
    pub n_noaas: u32,
}

impl Region {
    /// Area-exclusion invariant from spec.md §3: regions with area >= 18%
    /// are excluded downstream.
    pub fn is_area_eligible(&self) -> bool {
        self.area < 18.0
    }

    pub fn contains_ts(&self, ts: Ts) -> bool {
        self.start_ts <= ts && ts <= self.end_ts
    }
}

/// Region table with a start_ts-sorted index for the temporal bracketing
/// binary search described in spec.md §4.D.
#[derive(Debug, Default)]
pub struct RegionTable {
    by_id: HashMap<RegionId, Region>,
    /// (start_ts, region_id), sorted ascending by start_ts.
    by_start: Vec<(Ts, RegionId)>,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.by_id.clear();
        self.by_start.clear();
    }

    pub fn insert(&mut self, region: Region) {
        let pos = self.by_start.partition_point(|(s, _)| *s <= region.start_ts);
        self.by_start.insert(pos, (region.start_ts, region.region_id));
        self.by_id.insert(region.region_id, region);
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.by_id.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// All regions, ascending by region_id — spec.md §5's determinism
    /// requirement ("region iteration order is by ascending region_id").
    pub fn iter_by_id(&self) -> impl Iterator<Item = &Region> {
        let mut ids: Vec<&RegionId> = self.by_id.keys().collect();
        ids.sort_unstable();
        ids.into_iter().map(move |id| &self.by_id[id])
    }

    /// Regions whose lifetime brackets `ts`: `start_ts <= ts <= end_ts`.
    /// Binary search narrows to the start_ts <= ts prefix, then a direct
    /// filter on end_ts finishes the bracket (spec.md §4.D).
    pub fn bracketing(&self, ts: Ts) -> Vec<&Region> {
        let prefix_len = self.by_start.partition_point(|(s, _)| *s <= ts);
        self.by_start[..prefix_len]
            .iter()
            .filter_map(|(_, id)| self.by_id.get(id))
            .filter(|r| r.end_ts >= ts)
            .collect()
    }

    pub fn earliest_start(&self) -> Option<Ts> {
        self.by_start.first().map(|(s, _)| *s)
    }

    pub fn latest_end(&self) -> Option<Ts> {
        self.by_id.values().map(|r| r.end_ts).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(day: u32, hour: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn region(id: RegionId, start_day: u32, end_day: u32) -> Region {
        Region {
            region_id: id,
            start_ts: t(start_day, 0),
            end_ts: t(end_day, 0),
            area: 3.0,
            legacy_numbers: vec![],
            n_noaas: 0,
        }
    }

    #[test]
    fn bracketing_finds_overlapping_regions() {
        let mut table = RegionTable::new();
        table.insert(region(1, 1, 5));
        table.insert(region(2, 3, 8));
        table.insert(region(3, 10, 12));

        let hits = table.bracketing(t(4, 0));
        let mut ids: Vec<RegionId> = hits.iter().map(|r| r.region_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn bracketing_excludes_regions_outside_lifetime() {
        let mut table = RegionTable::new();
        table.insert(region(1, 1, 5));
        assert!(table.bracketing(t(10, 0)).is_empty());
    }

    #[test]
    fn iter_by_id_is_sorted() {
        let mut table = RegionTable::new();
        table.insert(region(5, 1, 2));
        table.insert(region(1, 1, 2));
        table.insert(region(3, 1, 2));
        let ids: Vec<RegionId> = table.iter_by_id().map(|r| r.region_id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
