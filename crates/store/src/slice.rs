//! `GENERAL_DATASET` (accepted slices) and `GENERAL_DATASET_REJECTED`.

use crate::types::{CmeId, RegionId, SliceId, Tier, Ts};
use serde::{Deserialize, Serialize};

/// Per-tier CME counts observed in a slice's lead-in period, tiers 1..=5.
pub type TierCounts = [u32; 5];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slice {
    pub slice_id: SliceId,
    pub region_id: RegionId,
    pub lead_in_start: Ts,
    pub lead_in_end: Ts,
    pub obs_start: Ts,
    pub obs_end: Ts,
    pub pred_start: Ts,
    pub pred_end: Ts,
    pub n_cmes_before: u32,
    pub n_cmes_before_tier: TierCounts,
    pub prev_cme_id: Option<CmeId>,
    pub prev_cme_diff_h: Option<f64>,
    pub label: u8,
    pub next_cme_id: Option<CmeId>,
    pub next_cme_diff_h: Option<f64>,
    pub verification_tier: Option<Tier>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    NoBBoxData,
    UnclearCmePresent,
    FinalCmeAssociation,
    MissingImages,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::NoBBoxData => "no_bbox_data",
            RejectReason::UnclearCmePresent => "unclear_cme_present",
            RejectReason::FinalCmeAssociation => "final_cme_association",
            RejectReason::MissingImages => "missing_images",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedSlice {
    pub slice_id: SliceId,
    pub region_id: RegionId,
    pub lead_in_start: Option<Ts>,
    pub lead_in_end: Option<Ts>,
    pub obs_start: Option<Ts>,
    pub obs_end: Option<Ts>,
    pub pred_start: Option<Ts>,
    pub pred_end: Option<Ts>,
    pub reject_reason: RejectReason,
}

#[derive(Debug, Default)]
pub struct SliceTable {
    accepted: Vec<Slice>,
    rejected: Vec<RejectedSlice>,
    next_id: SliceId,
}

impl SliceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn truncate(&mut self) {
        self.accepted.clear();
        self.rejected.clear();
        self.next_id = 0;
    }

    pub fn next_slice_id(&mut self) -> SliceId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_accepted(&mut self, slice: Slice) {
        self.accepted.push(slice);
    }

    pub fn push_rejected(&mut self, slice: RejectedSlice) {
        self.rejected.push(slice);
    }

    pub fn accepted(&self) -> &[Slice] {
        &self.accepted
    }

    pub fn rejected(&self) -> &[RejectedSlice] {
        &self.rejected
    }

    pub fn accepted_for_region(&self, region_id: RegionId) -> Vec<&Slice> {
        self.accepted.iter().filter(|s| s.region_id == region_id).collect()
    }
}
