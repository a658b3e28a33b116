//! Loads every catalogue from disk (stage C plus the region raw series
//! region-catalog itself doesn't own file discovery for).

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use store::{Cme, Dimming, Flare, RegionId};
use tracing::warn;

/// One raw TSV file per region, named `<region_id>.tsv` (any extension is
/// accepted; only the filename stem is parsed).
pub fn load_region_series(dir: &Path) -> Result<HashMap<RegionId, Vec<region_catalog::RawRow>>> {
    let mut raw_inputs = HashMap::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading region series directory {dir:?}"))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else { continue };
        let Ok(region_id) = stem.parse::<RegionId>() else {
            warn!(?path, "skipping region series file with unparseable region id in filename");
            continue;
        };

        let file = File::open(&path).with_context(|| format!("opening {path:?}"))?;
        let rows = region_catalog::parse_region_series(region_id, BufReader::new(file))?;
        raw_inputs.insert(region_id, rows);
    }
    Ok(raw_inputs)
}

pub fn load_region_mapping(path: &Path) -> Result<HashMap<RegionId, Vec<u32>>> {
    let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
    Ok(event_catalog::parse_region_mapping(BufReader::new(file))?)
}

pub fn load_cmes(path: &Path) -> Result<Vec<Cme>> {
    let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
    Ok(event_catalog::parse_cme_catalogue(BufReader::new(file))?)
}

pub fn load_dimmings(path: &Path) -> Result<Vec<Dimming>> {
    let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
    Ok(event_catalog::parse_dimming_catalogue(file)?)
}

pub fn load_flares(path: &Path) -> Result<Vec<Flare>> {
    let file = File::open(path).with_context(|| format!("opening {path:?}"))?;
    Ok(event_catalog::parse_flare_catalogue(file)?)
}

/// Pulls every embedded `*FLARE_LABEL` cell out of the already-loaded region
/// series rows, for `--flare-source embedded-per-region`.
pub fn load_embedded_flares(raw_inputs: &HashMap<RegionId, Vec<region_catalog::RawRow>>) -> Result<Vec<Flare>> {
    let labels: Vec<&str> = raw_inputs
        .values()
        .flatten()
        .flat_map(|row| row.flare_labels.iter())
        .map(String::as_str)
        .collect();
    Ok(event_catalog::parse_embedded_flare_catalogue(labels.into_iter())?)
}
