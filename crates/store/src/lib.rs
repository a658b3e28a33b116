//! In-process indexed table store standing in for the relational key/value
//! persistence substrate described in spec.md §6. Each table is a typed
//! record plus a secondary index (by id, by timestamp, or both); mutation
//! goes through an append-only builder and commits per worker partition,
//! matching spec.md §9's replacement for "heavy dynamic-typed dataframes."

pub mod association;
pub mod bbox;
pub mod context;
pub mod events;
pub mod overlap;
pub mod region;
pub mod slice;
pub mod types;

pub use association::{Association, AssociationTable, MatchedEvent, RegionEventMatch, RegionEventTable, SpatialCandidate, SpatialConsistencyTable};
pub use bbox::{BBoxSample, BBoxTable};
pub use context::{PipelineContext, PipelineParams, RegionPopulation, Tables};
pub use events::{flare_class_score, Cme, CmeTable, Dimming, DimmingTable, Flare, FlareTable};
pub use overlap::{OverlapRecord, OverlapRecordTable, OverlapStats, OverlapStatsTable};
pub use region::{Region, RegionTable};
pub use slice::{RejectReason, RejectedSlice, Slice, SliceTable, TierCounts};
pub use types::{
    is_on_12min_grid, snap_to_12min_grid, AssociationMethod, CmeId, CoronagraphField, DimmingId,
    FlareId, FlareSource, OverlapDecision, RegionId, SliceId, Tier, Ts,
};
