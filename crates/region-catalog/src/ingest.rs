//! Parses the raw region bbox time series: TSV with header
//! `Timestamp, LONDTMIN, LONDTMAX, LATDTMIN, LATDTMAX, IRBB, IS_TMFI`
//! (spec.md §6). Per-record malformed rows are skipped, matching spec.md
//! §4.C's ingestor contract.

use crate::error::Result;
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io::Read;
use store::RegionId;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RawRow {
    pub ts: NaiveDateTime,
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    pub trusted_field: bool,
    /// Non-empty `*FLARE_LABEL` JSON cells carried on this row (spec.md §6),
    /// one per flare class (`BFLARE_LABEL`, `CFLARE_LABEL`, `MFLARE_LABEL`,
    /// `XFLARE_LABEL`) that was populated.
    pub flare_labels: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "LONDTMIN")]
    lon_min: Option<f64>,
    #[serde(rename = "LONDTMAX")]
    lon_max: Option<f64>,
    #[serde(rename = "LATDTMIN")]
    lat_min: Option<f64>,
    #[serde(rename = "LATDTMAX")]
    lat_max: Option<f64>,
    #[serde(rename = "IRBB")]
    #[allow(dead_code)]
    irbb: Option<f64>,
    #[serde(rename = "IS_TMFI")]
    is_tmfi: Option<i64>,
    #[serde(rename = "BFLARE_LABEL")]
    bflare_label: Option<String>,
    #[serde(rename = "CFLARE_LABEL")]
    cflare_label: Option<String>,
    #[serde(rename = "MFLARE_LABEL")]
    mflare_label: Option<String>,
    #[serde(rename = "XFLARE_LABEL")]
    xflare_label: Option<String>,
}

impl RawRecord {
    fn flare_labels(&self) -> Vec<String> {
        [&self.bflare_label, &self.cflare_label, &self.mflare_label, &self.xflare_label]
            .into_iter()
            .filter_map(|cell| cell.as_deref())
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Parse one region's raw bbox time series from a TSV reader. Rows missing
/// any required field, or with an unparseable timestamp, are skipped (not
/// gaps to fill — those are rows present with null geometry; a genuinely
/// absent row is what the gap-filler in `gapfill.rs` reconstructs).
pub fn parse_region_series<R: Read>(region_id: RegionId, reader: R) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new().delimiter(b'\t').from_reader(reader);
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.deserialize::<RawRecord>() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(region_id, error = %e, "skipping malformed region bbox row");
                skipped += 1;
                continue;
            }
        };

        let ts = match NaiveDateTime::parse_from_str(&record.timestamp, "%Y-%m-%d %H:%M:%S") {
            Ok(ts) => ts,
            Err(e) => {
                warn!(region_id, ts = %record.timestamp, error = %e, "skipping row with unparseable timestamp");
                skipped += 1;
                continue;
            }
        };

        let (lon_min, lon_max, lat_min, lat_max) = match (record.lon_min, record.lon_max, record.lat_min, record.lat_max) {
            (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
            _ => {
                skipped += 1;
                continue;
            }
        };

        rows.push(RawRow {
            ts,
            lon_min,
            lon_max,
            lat_min,
            lat_max,
            trusted_field: record.is_tmfi.map(|v| v != 0).unwrap_or(true),
            flare_labels: record.flare_labels(),
        });
    }

    rows.sort_by_key(|r| r.ts);
    if skipped > 0 {
        warn!(region_id, skipped, kept = rows.len(), "parsed region bbox series with skips");
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_rows_and_skips_incomplete_ones() {
        let tsv = "Timestamp\tLONDTMIN\tLONDTMAX\tLATDTMIN\tLATDTMAX\tIRBB\tIS_TMFI\tBFLARE_LABEL\tCFLARE_LABEL\tMFLARE_LABEL\tXFLARE_LABEL\n\
                   2020-01-01 00:00:00\t-5.0\t5.0\t-5.0\t5.0\t0\t1\t\t\t\t\n\
                   2020-01-01 00:12:00\t\t\t\t\t0\t1\t\t\t\t\n\
                   2020-01-01 00:24:00\t-4.0\t4.0\t-4.0\t4.0\t0\t0\t\t{\"flare_id\":7,\"ts\":\"2020-01-01T00:24:00\",\"lon\":5.0,\"lat\":5.0,\"xray_class\":\"C3.0\"}\t\t\n";
        let rows = parse_region_series(100, tsv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[1].trusted_field == false);
        assert_eq!(rows[1].flare_labels.len(), 1);
    }
}
