//! `CMES_HARPS_SPATIALLY_CONSIST`, `CMES_HARPS_EVENTS`, and
//! `FINAL_CME_HARP_ASSOCIATIONS` — the matcher's candidate tables and the
//! resolver's output.

use crate::types::{AssociationMethod, CmeId, DimmingId, FlareId, RegionId, Tier, Ts};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A (CME, region) pair found spatially consistent by the matcher
/// (spec.md §4.D) — `CMES_HARPS_SPATIALLY_CONSIST`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialCandidate {
    pub cme_id: CmeId,
    pub region_id: RegionId,
}

/// A dimming or flare independently matched to a region within the CME's
/// verification clock window (spec.md §4.E) — `CMES_HARPS_EVENTS`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchedEvent {
    Dimming { id: DimmingId, ts: Ts },
    Flare { id: FlareId, ts: Ts, class_score: f64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionEventMatch {
    pub region_id: RegionId,
    pub event: MatchedEvent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Association {
    pub cme_id: CmeId,
    pub region_id: RegionId,
    pub verification_tier: Tier,
    pub method: AssociationMethod,
    pub externally_verified: bool,
}

#[derive(Debug, Default)]
pub struct SpatialConsistencyTable {
    rows: Vec<SpatialCandidate>,
}

impl SpatialConsistencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.rows.clear();
    }

    pub fn push(&mut self, candidate: SpatialCandidate) {
        self.rows.push(candidate);
    }

    pub fn for_cme(&self, cme_id: CmeId) -> Vec<RegionId> {
        self.rows.iter().filter(|c| c.cme_id == cme_id).map(|c| c.region_id).collect()
    }

    pub fn for_region(&self, region_id: RegionId) -> Vec<CmeId> {
        self.rows.iter().filter(|c| c.region_id == region_id).map(|c| c.cme_id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpatialCandidate> {
        self.rows.iter()
    }
}

#[derive(Debug, Default)]
pub struct RegionEventTable {
    rows: Vec<RegionEventMatch>,
}

impl RegionEventTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.rows.clear();
    }

    pub fn push(&mut self, m: RegionEventMatch) {
        self.rows.push(m);
    }

    pub fn for_region(&self, region_id: RegionId) -> Vec<&RegionEventMatch> {
        self.rows.iter().filter(|m| m.region_id == region_id).collect()
    }
}

/// `FINAL_CME_HARP_ASSOCIATIONS`: at most one row per CME.
#[derive(Debug, Default)]
pub struct AssociationTable {
    by_cme: HashMap<CmeId, Association>,
}

impl AssociationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.by_cme.clear();
    }

    pub fn insert(&mut self, assoc: Association) {
        self.by_cme.insert(assoc.cme_id, assoc);
    }

    pub fn get(&self, cme_id: CmeId) -> Option<&Association> {
        self.by_cme.get(&cme_id)
    }

    pub fn len(&self) -> usize {
        self.by_cme.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Association> {
        self.by_cme.values()
    }

    /// Associations for a region, ascending by CME detection time is the
    /// caller's responsibility (this table has no ts index); callers join
    /// against `CmeTable` for ordering.
    pub fn for_region(&self, region_id: RegionId) -> Vec<&Association> {
        self.by_cme.values().filter(|a| a.region_id == region_id).collect()
    }
}
