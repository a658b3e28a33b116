//! Explicit pipeline context: connections, caches, and parameters passed to
//! every stage instead of module-level globals (spec.md §9's replacement
//! for "module-level global state").

use crate::association::{AssociationTable, RegionEventTable, SpatialConsistencyTable};
use crate::bbox::BBoxTable;
use crate::events::{CmeTable, DimmingTable, FlareTable};
use crate::overlap::{OverlapRecordTable, OverlapStatsTable};
use crate::region::RegionTable;
use crate::slice::SliceTable;
use std::sync::{Arc, Mutex};

/// On-disk population filter: `|lon| <= 70` deg (spec.md §6, the `table`
/// parameter). `All` disables the filter for the "real lifetime" queries
/// that must see near-limb samples (spec.md §4.F).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionPopulation {
    OnDisk,
    All,
}

#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub obs_len_h: u32,
    pub step_h: u32,
    pub strict: bool,
    pub population: RegionPopulation,
    pub splits: usize,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            obs_len_h: 24,
            step_h: 1,
            strict: true,
            population: RegionPopulation::OnDisk,
            splits: 10,
        }
    }
}

/// All tables the pipeline reads and writes, each behind its own mutex so a
/// writer only ever locks the table it is committing to (spec.md §5: "each
/// writer holds a table-level lock only across the final commit of its
/// region partition").
#[derive(Default)]
pub struct Tables {
    pub regions: Mutex<RegionTable>,
    pub raw_bbox: Mutex<BBoxTable>,
    pub processed_bbox: Mutex<BBoxTable>,
    pub cmes: Mutex<CmeTable>,
    pub dimmings: Mutex<DimmingTable>,
    pub flares: Mutex<FlareTable>,
    pub overlap_stats: Mutex<OverlapStatsTable>,
    pub overlap_records: Mutex<OverlapRecordTable>,
    pub spatial_consistency: Mutex<SpatialConsistencyTable>,
    pub region_events: Mutex<RegionEventTable>,
    pub associations: Mutex<AssociationTable>,
    pub slices: Mutex<SliceTable>,
}

/// Cheaply cloneable handle shared by every worker task: an `Arc` around the
/// shared tables plus the run's parameters.
#[derive(Clone)]
pub struct PipelineContext {
    pub tables: Arc<Tables>,
    pub params: Arc<PipelineParams>,
}

impl PipelineContext {
    pub fn new(params: PipelineParams) -> Self {
        Self {
            tables: Arc::new(Tables::default()),
            params: Arc::new(params),
        }
    }
}
