//! Orchestrates the window slicer across every region (spec.md §4.F/§5),
//! partitioning regions across a worker pool the same way the region
//! catalogue builder does.

use crate::error::{Result, SlicerError};
use crate::image_policy::ImageCountPolicy;
use crate::slicer::process_region;
use std::sync::Arc;
use store::{PipelineContext, RejectedSlice, Slice};
use tokio::sync::mpsc;
use tracing::info;

/// Partitions all cataloged regions across a worker pool, slicing each
/// independently, then commits every region's rows through a single writer.
pub async fn slice_all_regions(ctx: &PipelineContext, image_policy: Arc<dyn ImageCountPolicy>) -> Result<()> {
    {
        let mut slices = ctx.tables.slices.lock().unwrap();
        slices.truncate();
    }

    let region_ids: Vec<store::RegionId> = {
        let regions = ctx.tables.regions.lock().unwrap();
        regions.iter_by_id().map(|r| r.region_id).collect()
    };
    if region_ids.is_empty() {
        return Err(SlicerError::NoRegions);
    }

    let worker_count = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1).max(1);
    let chunk_size = region_ids.len().div_ceil(worker_count).max(1);

    let (tx, mut rx) = mpsc::channel::<(Vec<Slice>, Vec<RejectedSlice>)>(worker_count);

    for chunk in region_ids.chunks(chunk_size) {
        let chunk = chunk.to_vec();
        let ctx = ctx.clone();
        let image_policy = image_policy.clone();
        let tx = tx.clone();

        tokio::task::spawn_blocking(move || {
            let regions: Vec<store::Region> = {
                let table = ctx.tables.regions.lock().unwrap();
                chunk.iter().filter_map(|id| table.get(*id).cloned()).collect()
            };
            let mut accepted = Vec::new();
            let mut rejected = Vec::new();
            for region in &regions {
                let (a, r) = process_region(region, &ctx, image_policy.as_ref());
                accepted.extend(a);
                rejected.extend(r);
            }
            let _ = tx.blocking_send((accepted, rejected));
        });
    }
    drop(tx);

    enum Row {
        Accepted(Slice),
        Rejected(RejectedSlice),
    }

    let mut rows: Vec<Row> = Vec::new();
    while let Some((accepted, rejected)) = rx.recv().await {
        rows.extend(accepted.into_iter().map(Row::Accepted));
        rows.extend(rejected.into_iter().map(Row::Rejected));
    }

    // Worker completion order is scheduling-dependent; re-sort by
    // (region_id, the region-local step sequence `process_region` stamped
    // into slice_id) so output ordering and id assignment are deterministic
    // regardless of which worker finished first (spec.md §5).
    rows.sort_by_key(|row| match row {
        Row::Accepted(s) => (s.region_id, s.slice_id),
        Row::Rejected(s) => (s.region_id, s.slice_id),
    });

    let mut n_accepted = 0usize;
    let mut n_rejected = 0usize;
    let mut slices = ctx.tables.slices.lock().unwrap();
    for row in rows {
        let slice_id = slices.next_slice_id();
        match row {
            Row::Accepted(mut s) => {
                s.slice_id = slice_id;
                n_accepted += 1;
                slices.push_accepted(s);
            }
            Row::Rejected(mut s) => {
                s.slice_id = slice_id;
                n_rejected += 1;
                slices.push_rejected(s);
            }
        }
    }
    drop(slices);

    info!(n_accepted, n_rejected, "window slicer complete");
    Ok(())
}
