//! Gap filling by differential rotation (spec.md §4.B step 1).
//!
//! Any run of consecutive missing 12-minute grid samples between two
//! present samples is filled by rotating the earlier sample forward for the
//! first half of the run and the later sample backward for the second half,
//! both in `keep_shape` mode. Runs at the very start/end of the grid are
//! filled entirely from the single available boundary.

use crate::ingest::RawRow;
use chrono::Duration;
use heliogeom::{rotate_bbox_to, BBox, RotationMode};
use std::collections::HashMap;
use store::{BBoxSample, RegionId, Ts};
use tracing::warn;

const GRID_STEP_MIN: i64 = 12;

fn to_bbox(row: &RawRow) -> Option<BBox> {
    match BBox::new(row.lon_min, row.lon_max, row.lat_min, row.lat_max) {
        Ok(b) => Some(b),
        Err(e) => {
            warn!(error = %e, ts = %row.ts, "dropping raw sample with invalid bounding box");
            None
        }
    }
}

fn rotate_one(region_id: RegionId, anchor: &RawRow, target_ts: Ts) -> Option<BBoxSample> {
    let bbox = to_bbox(anchor)?;
    match rotate_bbox_to(&bbox, anchor.ts, target_ts, RotationMode::KeepShape) {
        Ok(rotated) => Some(BBoxSample {
            region_id,
            ts: target_ts,
            bbox: rotated,
            interpolated: true,
            trusted_field: anchor.trusted_field,
        }),
        Err(e) => {
            warn!(region_id, error = %e, ts = %target_ts, "dropping interpolated sample with invalid rotated bbox");
            None
        }
    }
}

/// Fill gaps over `[grid_start, grid_end]` (defaulting to the observed
/// series' own first/last timestamp). `rows` need not be on-grid; the
/// caller is expected to have aligned timestamps upstream.
pub fn fill_gaps(
    region_id: RegionId,
    rows: &[RawRow],
    grid_start: Option<Ts>,
    grid_end: Option<Ts>,
) -> Vec<BBoxSample> {
    if rows.is_empty() {
        return Vec::new();
    }

    let start = grid_start.unwrap_or(rows[0].ts);
    let end = grid_end.unwrap_or(rows[rows.len() - 1].ts);

    let present: HashMap<Ts, &RawRow> = rows.iter().map(|r| (r.ts, r)).collect();

    let mut grid = Vec::new();
    let mut t = start;
    while t <= end {
        grid.push(t);
        t += Duration::minutes(GRID_STEP_MIN);
    }

    let mut out = Vec::with_capacity(grid.len());
    let mut i = 0;
    while i < grid.len() {
        let ts = grid[i];
        if let Some(row) = present.get(&ts) {
            if let Some(bbox) = to_bbox(row) {
                out.push(BBoxSample {
                    region_id,
                    ts,
                    bbox,
                    interpolated: false,
                    trusted_field: row.trusted_field,
                });
            }
            i += 1;
            continue;
        }

        let run_start = i;
        let mut j = i;
        while j < grid.len() && !present.contains_key(&grid[j]) {
            j += 1;
        }
        let run_end = j;
        let run_len = run_end - run_start;

        let before = if run_start > 0 { present.get(&grid[run_start - 1]) } else { None };
        let after = if run_end < grid.len() { present.get(&grid[run_end]) } else { None };

        for (k, &ts_k) in grid[run_start..run_end].iter().enumerate() {
            let sample = match (before, after) {
                (Some(b), Some(a)) => {
                    let first_half_len = run_len.div_ceil(2);
                    if k < first_half_len {
                        rotate_one(region_id, b, ts_k)
                    } else {
                        rotate_one(region_id, a, ts_k)
                    }
                }
                (Some(b), None) => rotate_one(region_id, b, ts_k),
                (None, Some(a)) => rotate_one(region_id, a, ts_k),
                (None, None) => None,
            };
            if let Some(sample) = sample {
                out.push(sample);
            }
        }
        i = run_end;
    }

    out
}
