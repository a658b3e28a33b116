//! EUV dimming catalogue: CSV columns
//! `dimming_id, longitude, latitude, max_detection_time, start_time, avg_x, avg_y, avg_r`
//! (spec.md §6).

use crate::error::{check_skip_threshold, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io::Read;
use store::{Dimming, DimmingId};
use tracing::warn;

const SKIP_THRESHOLD: f64 = 0.1;

#[derive(Debug, Deserialize)]
struct RawRecord {
    dimming_id: DimmingId,
    longitude: f64,
    latitude: f64,
    max_detection_time: String,
    #[serde(rename = "start_time")]
    #[allow(dead_code)]
    start_time: Option<String>,
    avg_x: Option<f64>,
    avg_y: Option<f64>,
    #[serde(rename = "avg_r")]
    #[allow(dead_code)]
    avg_r: Option<f64>,
}

pub fn parse_dimming_catalogue<R: Read>(reader: R) -> Result<Vec<Dimming>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut dimmings = Vec::new();
    let mut total = 0usize;
    let mut skipped = 0usize;

    for result in rdr.deserialize::<RawRecord>() {
        total += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "skipping malformed dimming row");
                skipped += 1;
                continue;
            }
        };

        let ts = match NaiveDateTime::parse_from_str(&record.max_detection_time, "%Y-%m-%d %H:%M:%S") {
            Ok(ts) => ts,
            Err(e) => {
                warn!(dimming_id = record.dimming_id, error = %e, "skipping dimming with unparseable timestamp");
                skipped += 1;
                continue;
            }
        };

        let off_disk_xy = match (record.avg_x, record.avg_y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        };

        dimmings.push(Dimming {
            dimming_id: record.dimming_id,
            ts,
            lon: record.longitude,
            lat: record.latitude,
            off_disk_xy,
        });
    }

    check_skip_threshold("dimming_catalogue", skipped, total, SKIP_THRESHOLD)?;
    Ok(dimmings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_on_disk_and_off_disk_rows() {
        let csv = "dimming_id,longitude,latitude,max_detection_time,start_time,avg_x,avg_y,avg_r\n\
                   1,5.0,5.0,2020-01-01 00:00:00,2020-01-01 00:00:00,,,\n\
                   2,10.0,10.0,2020-01-01 01:00:00,2020-01-01 01:00:00,100.0,200.0,50.0\n";
        let dimmings = parse_dimming_catalogue(csv.as_bytes()).unwrap();
        assert_eq!(dimmings.len(), 2);
        assert!(dimmings[0].off_disk_xy.is_none());
        assert_eq!(dimmings[1].off_disk_xy, Some((100.0, 200.0)));
    }
}
