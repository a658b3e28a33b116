//! Region (HARP) -> legacy NOAA active-region number mapping: whitespace
//! separated, header `HARPNUM NOAA_ARS` (comma-joined list), spec.md §6.

use crate::error::Result;
use std::collections::HashMap;
use std::io::BufRead;
use store::RegionId;
use tracing::warn;

pub fn parse_region_mapping<R: BufRead>(reader: R) -> Result<HashMap<RegionId, Vec<u32>>> {
    let mut map = HashMap::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line_no == 0 || line.trim().is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(harpnum), Some(noaa_list)) = (parts.next(), parts.next()) else {
            warn!(line_no, "skipping malformed region mapping row");
            continue;
        };

        let Ok(region_id) = harpnum.parse::<RegionId>() else {
            warn!(line_no, harpnum, "skipping row with unparseable HARPNUM");
            continue;
        };

        let numbers: Vec<u32> = noaa_list
            .split(',')
            .filter_map(|n| n.parse::<u32>().ok())
            .collect();

        map.insert(region_id, numbers);
    }

    Ok(map)
}
