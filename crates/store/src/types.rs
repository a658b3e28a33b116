//! Shared identifiers and small value types used across every table.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type RegionId = u32;
pub type CmeId = u32;
pub type DimmingId = u32;
pub type FlareId = u32;
pub type SliceId = u64;
pub type Ts = NaiveDateTime;

/// Verification tier, 1 (strongest) to 5 (weakest), per spec.md §4.E.
pub type Tier = u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssociationMethod {
    Automatic,
    Manual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoronagraphField {
    Inner,
    Outer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlapDecision {
    Merged,
    Deleted,
}

/// Which flare catalogue is treated as authoritative when both the external
/// CSV and the embedded per-region flare labels are present (spec.md §9,
/// Open Question: dual flare source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FlareSource {
    #[default]
    External,
    EmbeddedPerRegion,
}

/// Snap a timestamp down to the nearest 12-minute grid point (00/12/24/36/48).
pub fn snap_to_12min_grid(ts: Ts) -> Ts {
    use chrono::Timelike;
    let minute = ts.minute();
    let snapped_minute = (minute / 12) * 12;
    ts.with_minute(snapped_minute).unwrap().with_second(0).unwrap()
}

pub fn is_on_12min_grid(ts: Ts) -> bool {
    use chrono::Timelike;
    ts.minute() % 12 == 0 && ts.second() == 0
}
