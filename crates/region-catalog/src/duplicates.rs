//! Pairwise duplicate-region detection (spec.md §4.B step 6).

use heliogeom::BBox;
use std::collections::HashMap;
use store::{OverlapDecision, OverlapRecord, OverlapStats, RegionId, Ts};

const GRID_STEP_MIN: i64 = 12;

/// One region's eligible (area < 18%) sample series, keyed by timestamp.
pub struct RegionSeries {
    pub region_id: RegionId,
    pub area_pct: f64,
    pub start_ts: Ts,
    pub end_ts: Ts,
    pub by_ts: HashMap<Ts, BBox>,
}

fn overlap_fraction_of_a(a: &BBox, b: &BBox) -> f64 {
    let lon_overlap = (a.lon_max.min(b.lon_max) - a.lon_min.max(b.lon_min)).max(0.0);
    let lat_overlap = (a.lat_max.min(b.lat_max) - a.lat_min.max(b.lat_min)).max(0.0);
    let overlap_area = lon_overlap * lat_overlap;
    let a_area = a.width() * a.height();
    if a_area <= 0.0 {
        0.0
    } else {
        (overlap_area / a_area * 100.0).min(100.0)
    }
}

fn lifetime_grid_steps(start_ts: Ts, end_ts: Ts) -> usize {
    let minutes = (end_ts - start_ts).num_minutes();
    (minutes / GRID_STEP_MIN) as usize + 1
}

/// Statistics for ordered pair `(a, b)` with `area(a) < area(b)` by
/// convention, computed relative to `a`. `None` if the regions never
/// co-exist at a shared grid timestamp.
fn pairwise_stats(a: &RegionSeries, b: &RegionSeries) -> Option<OverlapStats> {
    let mut fractions = Vec::new();
    for (ts, a_bbox) in &a.by_ts {
        if let Some(b_bbox) = b.by_ts.get(ts) {
            fractions.push(overlap_fraction_of_a(a_bbox, b_bbox));
        }
    }
    if fractions.is_empty() {
        return None;
    }

    let n = fractions.len() as f64;
    let mean = fractions.iter().sum::<f64>() / n;
    let variance = fractions.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    let total_steps = lifetime_grid_steps(a.start_ts, a.end_ts).max(1) as f64;
    let overlapping_steps = fractions.iter().filter(|&&f| f > 0.0).count() as f64;
    let co_occurrence_pct = overlapping_steps / total_steps * 100.0;

    Some(OverlapStats {
        region_a: a.region_id,
        region_b: b.region_id,
        mean_overlap: mean,
        overlap_stddev: stddev,
        co_occurrence_pct,
    })
}

fn decide(stats: &OverlapStats) -> Option<OverlapDecision> {
    let is_bad = stats.mean_overlap == 100.0 || (stats.mean_overlap > 50.0 && stats.co_occurrence_pct > 50.0);
    if !is_bad {
        return None;
    }
    if stats.co_occurrence_pct > 70.0 && stats.mean_overlap > 90.0 {
        Some(OverlapDecision::Merged)
    } else {
        Some(OverlapDecision::Deleted)
    }
}

/// Run duplicate detection over every co-existing pair of eligible
/// (area < 18%) regions. Returns the full pairwise stats table plus the
/// decision records for pairs judged bad.
pub fn detect_duplicates(regions: &[RegionSeries]) -> (Vec<OverlapStats>, Vec<OverlapRecord>) {
    let mut stats_rows = Vec::new();
    let mut records = Vec::new();

    for i in 0..regions.len() {
        for j in (i + 1)..regions.len() {
            let (r1, r2) = (&regions[i], &regions[j]);
            let (a, b) = if r1.area_pct < r2.area_pct { (r1, r2) } else { (r2, r1) };
            let Some(stats) = pairwise_stats(a, b) else { continue };
            if let Some(decision) = decide(&stats) {
                records.push(OverlapRecord {
                    region_a: stats.region_a,
                    region_b: stats.region_b,
                    decision,
                });
            }
            stats_rows.push(stats);
        }
    }

    (stats_rows, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(m: i64) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::minutes(m)
    }

    fn series(region_id: RegionId, area_pct: f64, bbox: BBox, ts_count: i64) -> RegionSeries {
        let mut by_ts = HashMap::new();
        for i in 0..ts_count {
            by_ts.insert(t(i * GRID_STEP_MIN), bbox);
        }
        RegionSeries {
            region_id,
            area_pct,
            start_ts: t(0),
            end_ts: t((ts_count - 1) * GRID_STEP_MIN),
            by_ts,
        }
    }

    #[test]
    fn heavy_overlap_is_merged() {
        let bbox = BBox::new(-5.0, 5.0, -5.0, 5.0).unwrap();
        let r_a = series(200, 3.0, bbox, 10);
        let r_b = series(201, 5.0, bbox, 10);
        let (_stats, records) = detect_duplicates(&[r_a, r_b]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region_a, 200);
        assert_eq!(records[0].region_b, 201);
        assert_eq!(records[0].decision, OverlapDecision::Merged);
    }

    #[test]
    fn disjoint_regions_are_not_flagged() {
        let a_bbox = BBox::new(-50.0, -40.0, -5.0, 5.0).unwrap();
        let b_bbox = BBox::new(40.0, 50.0, -5.0, 5.0).unwrap();
        let r_a = series(1, 3.0, a_bbox, 5);
        let r_b = series(2, 3.0, b_bbox, 5);
        let (stats, records) = detect_duplicates(&[r_a, r_b]);
        assert!(records.is_empty());
        assert_eq!(stats[0].mean_overlap, 0.0);
    }
}
