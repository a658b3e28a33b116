//! Split partitioner (spec.md §4.G): overlap graph, connected-component
//! grouping, greedy K-way balancing, and fold collapsing.

pub mod error;
pub mod fold;
pub mod graph;
pub mod grouping;
pub mod partition;

pub use error::{PartitionError, Result};
pub use fold::{collapse_to_folds, Fold};
pub use grouping::Group;
pub use partition::balance_splits;

use graph::connected_components;
use grouping::build_groups;
use store::PipelineContext;
use tracing::info;

/// Runs the full stage: builds the relaxed overlap graph over every
/// cataloged region, groups by connected component, balances groups across
/// `ctx.params.splits` splits, and collapses the splits into folds.
pub fn partition_regions(ctx: &PipelineContext) -> Result<Vec<Fold>> {
    let region_ids: Vec<store::RegionId> = {
        let regions = ctx.tables.regions.lock().unwrap();
        regions.iter_by_id().map(|r| r.region_id).collect()
    };
    if region_ids.is_empty() {
        return Err(PartitionError::NoRegions);
    }

    let edges = {
        let overlap_stats = ctx.tables.overlap_stats.lock().unwrap();
        overlap_stats.relaxed_edges()
    };

    let components = connected_components(&region_ids, &edges);
    let groups = {
        let associations = ctx.tables.associations.lock().unwrap();
        build_groups(components, &associations)
    };

    let splits = balance_splits(&groups, ctx.params.splits);
    let folds = collapse_to_folds(&splits);

    info!(regions = region_ids.len(), groups = groups.len(), splits = splits.len(), folds = folds.len(), "split partitioner complete");
    Ok(folds)
}
