//! `OVERLAPS` (raw pairwise statistics) and `OVERLAP_RECORDS` (duplicate
//! decisions derived from them), per spec.md §4.B step 6 and §4.G.

use crate::types::{OverlapDecision, RegionId};
use serde::{Deserialize, Serialize};

/// Pairwise overlap statistics for two co-existing regions, convention
/// `area(a) < area(b)` (spec.md §4.B step 6 / §8 invariant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapStats {
    pub region_a: RegionId,
    pub region_b: RegionId,
    pub mean_overlap: f64,
    pub overlap_stddev: f64,
    pub co_occurrence_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapRecord {
    pub region_a: RegionId,
    pub region_b: RegionId,
    pub decision: OverlapDecision,
}

#[derive(Debug, Default)]
pub struct OverlapStatsTable {
    rows: Vec<OverlapStats>,
}

impl OverlapStatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.rows.clear();
    }

    pub fn push(&mut self, stats: OverlapStats) {
        self.rows.push(stats);
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlapStats> {
        self.rows.iter()
    }

    /// Edges for the split-partitioner graph (spec.md §4.G's relaxed
    /// threshold): `mean_overlap > 5 AND co_occurrence_pct > 5`.
    pub fn relaxed_edges(&self) -> Vec<(RegionId, RegionId)> {
        self.rows
            .iter()
            .filter(|s| s.mean_overlap > 5.0 && s.co_occurrence_pct > 5.0)
            .map(|s| (s.region_a, s.region_b))
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct OverlapRecordTable {
    rows: Vec<OverlapRecord>,
}

impl OverlapRecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.rows.clear();
    }

    pub fn push(&mut self, record: OverlapRecord) {
        self.rows.push(record);
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlapRecord> {
        self.rows.iter()
    }

    /// All region ids appearing as `region_a` — excluded from
    /// `PROCESSED_HARPS_BBOX` per spec.md §8.
    pub fn suppressed_regions(&self) -> std::collections::HashSet<RegionId> {
        self.rows.iter().map(|r| r.region_a).collect()
    }
}
