//! LASCO CME catalogue parser: fixed-column text, comment suffix starting at
//! byte 101 (spec.md §6; format grounded on the original LASCO catalogue
//! layout — date, time, position angle, width, then a run of speed/mass
//! columns we don't model, MPA, with quality/seen-in flags derived from the
//! trailing comment text).

use crate::error::{check_skip_threshold, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::io::BufRead;
use store::{Cme, CmeId, CoronagraphField};
use tracing::warn;

const COMMENT_COLUMN: usize = 101;
const SKIP_THRESHOLD: f64 = 0.1;

/// `cme_id` is derived from the detection timestamp (seconds since
/// 2000-01-01), since the raw catalogue carries no explicit integer id;
/// two rows at the same timestamp are genuinely the same catalogued event.
fn derive_cme_id(ts: NaiveDateTime) -> CmeId {
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    (ts - epoch).num_seconds() as u32
}

fn parse_quality(comment: &str) -> String {
    if comment.contains("Very Poor") {
        "very poor".to_string()
    } else if comment.contains("Poor") {
        "poor".to_string()
    } else {
        "good".to_string()
    }
}

fn parse_field(comment: &str) -> CoronagraphField {
    if comment.contains("Only C3") {
        CoronagraphField::Outer
    } else {
        CoronagraphField::Inner
    }
}

fn parse_line(line: &str) -> Option<Cme> {
    if line.trim().is_empty() {
        return None;
    }
    let (data, comment) = if line.len() > COMMENT_COLUMN {
        line.split_at(COMMENT_COLUMN)
    } else {
        (line, "")
    };

    let cols: Vec<&str> = data.split_whitespace().collect();
    if cols.len() < 4 {
        return None;
    }

    let date = cols[0].replace('/', "-");
    let time = cols[1];
    let detection_ts = NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").ok()?;

    let halo = cols[3].eq_ignore_ascii_case("Halo");
    let pa = if halo {
        None
    } else {
        cols[2].parse::<f64>().ok()
    };
    let width_deg = if halo {
        360.0
    } else {
        cols[3].parse::<f64>().unwrap_or(0.0)
    };

    Some(Cme {
        cme_id: derive_cme_id(detection_ts),
        detection_ts,
        pa,
        width_deg,
        quality: parse_quality(comment),
        halo,
        field: parse_field(comment),
    })
}

/// Parses the raw LASCO text catalogue. Duplicate `cme_id`s are dropped
/// silently per spec.md §7's `IntegrityError`-on-duplicate-CME-id rule;
/// everything else malformed is skipped and counted toward the stage's
/// skip-fraction threshold.
pub fn parse_cme_catalogue<R: BufRead>(reader: R) -> Result<Vec<Cme>> {
    let mut seen_ids = HashSet::new();
    let mut cmes = Vec::new();
    let mut total = 0usize;
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        total += 1;

        match parse_line(&line) {
            Some(cme) => {
                if !seen_ids.insert(cme.cme_id) {
                    warn!(cme_id = cme.cme_id, "duplicate CME id, dropped");
                    skipped += 1;
                    continue;
                }
                cmes.push(cme);
            }
            None => {
                warn!(line_no = total, "skipping malformed CME catalogue line");
                skipped += 1;
            }
        }
    }

    check_skip_threshold("cme_catalogue", skipped, total, SKIP_THRESHOLD)?;
    Ok(cmes)
}
