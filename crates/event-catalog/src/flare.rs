//! X-ray flare catalogue: external CSV (`hec_id, time_peak, long_hg, lat_hg,
//! xray_class`) or embedded per-region flare labels (`*FLARE_LABEL` JSON
//! columns on the region TSV). Which source is authoritative is a pipeline
//! configuration choice (spec.md §9 open question), modeled by `FlareSource`.

use crate::error::{check_skip_threshold, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io::Read;
use store::{flare_class_score, Flare, FlareId};
use tracing::warn;

const SKIP_THRESHOLD: f64 = 0.1;

#[derive(Debug, Deserialize)]
struct RawRecord {
    hec_id: FlareId,
    time_peak: String,
    long_hg: f64,
    lat_hg: f64,
    xray_class: String,
}

/// Splits `"M1.5"` into `('M', 1.5)`.
fn split_xray_class(class: &str) -> Option<(char, f64)> {
    let letter = class.chars().next()?;
    let magnitude: f64 = class.get(1..)?.trim().parse().ok()?;
    Some((letter, magnitude))
}

pub fn parse_flare_catalogue<R: Read>(reader: R) -> Result<Vec<Flare>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut flares = Vec::new();
    let mut total = 0usize;
    let mut skipped = 0usize;

    for result in rdr.deserialize::<RawRecord>() {
        total += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "skipping malformed flare row");
                skipped += 1;
                continue;
            }
        };

        let ts = match NaiveDateTime::parse_from_str(&record.time_peak, "%Y-%m-%d %H:%M:%S") {
            Ok(ts) => ts,
            Err(e) => {
                warn!(flare_id = record.hec_id, error = %e, "skipping flare with unparseable timestamp");
                skipped += 1;
                continue;
            }
        };

        let Some((letter, magnitude)) = split_xray_class(&record.xray_class) else {
            warn!(flare_id = record.hec_id, class = %record.xray_class, "skipping flare with unparseable xray class");
            skipped += 1;
            continue;
        };
        let Some(class_score) = flare_class_score(letter, magnitude) else {
            warn!(flare_id = record.hec_id, class = %record.xray_class, "skipping flare with unknown class letter");
            skipped += 1;
            continue;
        };

        flares.push(Flare {
            flare_id: record.hec_id,
            ts,
            lon: record.long_hg,
            lat: record.lat_hg,
            class_score,
            verification: "external".to_string(),
        });
    }

    check_skip_threshold("flare_catalogue", skipped, total, SKIP_THRESHOLD)?;
    Ok(flares)
}

/// One row of the embedded per-region `*FLARE_LABEL` JSON column (spec.md
/// §6), keyed implicitly by whichever region's TSV it was read from.
#[derive(Debug, Deserialize, Serialize)]
pub struct EmbeddedFlareLabel {
    pub flare_id: FlareId,
    pub ts: NaiveDateTime,
    pub lon: f64,
    pub lat: f64,
    pub xray_class: String,
}

/// Parses one `*FLARE_LABEL` JSON cell into a `Flare` record, tagging it as
/// embedded-sourced.
pub fn parse_embedded_flare_label(json: &str) -> Option<Flare> {
    let raw: EmbeddedFlareLabel = serde_json::from_str(json).ok()?;
    let (letter, magnitude) = split_xray_class(&raw.xray_class)?;
    let class_score = flare_class_score(letter, magnitude)?;
    Some(Flare {
        flare_id: raw.flare_id,
        ts: raw.ts,
        lon: raw.lon,
        lat: raw.lat,
        class_score,
        verification: "embedded".to_string(),
    })
}

/// Parses every embedded `*FLARE_LABEL` cell across all region series files,
/// validating `flare_id` is unique across the source (spec.md §9).
pub fn parse_embedded_flare_catalogue<'a>(labels: impl Iterator<Item = &'a str>) -> Result<Vec<Flare>> {
    let mut flares = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut total = 0usize;
    let mut skipped = 0usize;

    for json in labels {
        total += 1;
        let Some(flare) = parse_embedded_flare_label(json) else {
            warn!(cell = json, "skipping malformed embedded flare label");
            skipped += 1;
            continue;
        };
        if !seen.insert(flare.flare_id) {
            warn!(flare_id = flare.flare_id, "skipping duplicate embedded flare id");
            skipped += 1;
            continue;
        }
        flares.push(flare);
    }

    check_skip_threshold("embedded_flare_labels", skipped, total, SKIP_THRESHOLD)?;
    Ok(flares)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_xray_class_into_score() {
        assert_eq!(split_xray_class("M1.5"), Some(('M', 1.5)));
        assert_eq!(flare_class_score('M', 1.5), Some(31.5));
    }

    #[test]
    fn parses_flare_csv_and_skips_bad_class() {
        let mut csv = String::from("hec_id,time_peak,long_hg,lat_hg,xray_class\n");
        for id in 1..=10 {
            csv.push_str(&format!("{id},2020-01-01 0{}:00:00,5.0,5.0,M1.5\n", id % 10));
        }
        csv.push_str("11,2020-01-01 01:00:00,5.0,5.0,garbage\n");
        let flares = parse_flare_catalogue(csv.as_bytes()).unwrap();
        assert_eq!(flares.len(), 10);
        assert_eq!(flares[0].class_score, 31.5);
    }

    #[test]
    fn parses_embedded_label_json() {
        let json = r#"{"flare_id":7,"ts":"2020-01-01T00:00:00","lon":5.0,"lat":5.0,"xray_class":"B2.0"}"#;
        let flare = parse_embedded_flare_label(json).unwrap();
        assert_eq!(flare.verification, "embedded");
        assert_eq!(flare.class_score, 12.0);
    }

    #[test]
    fn embedded_catalogue_drops_duplicate_flare_ids() {
        let labels: Vec<String> = (1..=10)
            .map(|id| format!(r#"{{"flare_id":{id},"ts":"2020-01-01T00:00:00","lon":5.0,"lat":5.0,"xray_class":"B2.0"}}"#))
            .collect();
        let mut cells: Vec<&str> = labels.iter().map(String::as_str).collect();
        let dup = r#"{"flare_id":7,"ts":"2020-01-01T01:00:00","lon":5.0,"lat":5.0,"xray_class":"C1.0"}"#;
        cells.push(dup);

        let flares = parse_embedded_flare_catalogue(cells.into_iter()).unwrap();
        assert_eq!(flares.len(), 10);
        assert!(flares.iter().find(|f| f.flare_id == 7).unwrap().verification == "embedded");
    }
}
