//! Orchestrates the region catalogue builder end to end (spec.md §4.B),
//! partitioning per-region work across a worker pool per spec.md §5/§9.

use crate::area::compute_mean_area_pct;
use crate::duplicates::{detect_duplicates, RegionSeries};
use crate::error::{CatalogError, Result};
use crate::gapfill::fill_gaps;
use crate::ingest::RawRow;
use crate::lifetime::compute_lifetime;
use crate::limb::trim_beyond_limb;
use std::collections::HashMap;
use store::{BBoxSample, PipelineContext, Region, RegionId};
use tokio::sync::mpsc;
use tracing::{info, warn};

struct RegionOutcome {
    region: Region,
    raw_samples: Vec<BBoxSample>,
    candidate_samples: Vec<BBoxSample>,
}

fn process_one_region(region_id: RegionId, rows: Vec<RawRow>, legacy_numbers: Vec<u32>) -> Option<RegionOutcome> {
    if rows.is_empty() {
        return None;
    }
    let filled = fill_gaps(region_id, &rows, None, None);
    let (start_ts, end_ts) = compute_lifetime(&filled)?;
    let area = compute_mean_area_pct(&filled);
    let candidate_samples = trim_beyond_limb(filled.clone());
    if candidate_samples.is_empty() {
        warn!(region_id, "region has zero samples remaining after limb trim, dropping");
        return None;
    }

    let n_noaas = legacy_numbers.len() as u32;
    let region = Region {
        region_id,
        start_ts,
        end_ts,
        area,
        legacy_numbers,
        n_noaas,
    };

    Some(RegionOutcome {
        region,
        raw_samples: filled,
        candidate_samples,
    })
}

/// Partition `raw_inputs` across a worker pool, run steps 1-5 per region,
/// then barrier for steps 6-7 (duplicate detection + materialisation)
/// across the full processed set.
pub async fn build_catalog(
    ctx: &PipelineContext,
    raw_inputs: HashMap<RegionId, Vec<RawRow>>,
    legacy_map: &HashMap<RegionId, Vec<u32>>,
) -> Result<()> {
    {
        let mut regions = ctx.tables.regions.lock().unwrap();
        let mut raw_bbox = ctx.tables.raw_bbox.lock().unwrap();
        let mut processed_bbox = ctx.tables.processed_bbox.lock().unwrap();
        let mut overlap_stats = ctx.tables.overlap_stats.lock().unwrap();
        let mut overlap_records = ctx.tables.overlap_records.lock().unwrap();
        regions.truncate();
        raw_bbox.truncate();
        processed_bbox.truncate();
        overlap_stats.truncate();
        overlap_records.truncate();
    }

    let mut region_ids: Vec<RegionId> = raw_inputs.keys().copied().collect();
    region_ids.sort_unstable();

    let worker_count = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1).max(1);
    let chunk_size = region_ids.len().div_ceil(worker_count).max(1);

    let (tx, mut rx) = mpsc::channel::<Vec<RegionOutcome>>(worker_count);

    for chunk in region_ids.chunks(chunk_size) {
        let chunk = chunk.to_vec();
        let tx = tx.clone();
        let mut owned_rows: HashMap<RegionId, Vec<RawRow>> = HashMap::new();
        let mut owned_legacy: HashMap<RegionId, Vec<u32>> = HashMap::new();
        for id in &chunk {
            if let Some(rows) = raw_inputs.get(id) {
                owned_rows.insert(*id, rows.clone());
            }
            owned_legacy.insert(*id, legacy_map.get(id).cloned().unwrap_or_default());
        }

        tokio::task::spawn_blocking(move || {
            let mut batch = Vec::with_capacity(chunk.len());
            for id in chunk {
                let rows = owned_rows.remove(&id).unwrap_or_default();
                let legacy = owned_legacy.remove(&id).unwrap_or_default();
                if let Some(outcome) = process_one_region(id, rows, legacy) {
                    batch.push(outcome);
                }
            }
            let _ = tx.blocking_send(batch);
        });
    }
    drop(tx);

    let mut outcomes: Vec<RegionOutcome> = Vec::new();
    while let Some(batch) = rx.recv().await {
        let mut raw_bbox = ctx.tables.raw_bbox.lock().unwrap();
        for outcome in &batch {
            for sample in &outcome.raw_samples {
                raw_bbox.insert(sample.clone());
            }
        }
        drop(raw_bbox);
        outcomes.extend(batch);
    }

    info!(regions = outcomes.len(), "region catalogue: steps 1-5 complete");

    let eligible: Vec<&RegionOutcome> = outcomes.iter().filter(|o| o.region.is_area_eligible()).collect();
    let series: Vec<RegionSeries> = eligible
        .iter()
        .map(|o| RegionSeries {
            region_id: o.region.region_id,
            area_pct: o.region.area,
            start_ts: o.region.start_ts,
            end_ts: o.region.end_ts,
            by_ts: o.candidate_samples.iter().map(|s| (s.ts, s.bbox)).collect(),
        })
        .collect();

    let (stats_rows, records) = detect_duplicates(&series);
    let suppressed: std::collections::HashSet<RegionId> = records.iter().map(|r| r.region_a).collect();

    {
        let mut overlap_stats = ctx.tables.overlap_stats.lock().unwrap();
        for stats in stats_rows {
            overlap_stats.push(stats);
        }
        let mut overlap_records = ctx.tables.overlap_records.lock().unwrap();
        for record in records {
            overlap_records.push(record);
        }
    }

    {
        let mut regions = ctx.tables.regions.lock().unwrap();
        let mut processed_bbox = ctx.tables.processed_bbox.lock().unwrap();
        for outcome in &outcomes {
            regions.insert(outcome.region.clone());
            if !outcome.region.is_area_eligible() || suppressed.contains(&outcome.region.region_id) {
                continue;
            }
            for sample in &outcome.candidate_samples {
                processed_bbox.insert(sample.clone());
            }
        }
    }

    if outcomes.is_empty() {
        return Err(CatalogError::NoBBoxData);
    }

    info!(
        eligible = eligible.len(),
        suppressed = suppressed.len(),
        "region catalogue: duplicate detection and materialisation complete"
    );
    Ok(())
}
