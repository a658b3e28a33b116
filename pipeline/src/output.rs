//! Writes accepted/rejected slices and fold assignments to `output_dir`.

use anyhow::{Context, Result};
use split_partitioner::Fold;
use std::fs::File;
use std::path::Path;
use store::{RejectedSlice, Slice};

/// Written as JSON rather than CSV: `Slice::n_cmes_before_tier` is a nested
/// fixed-size array, which the `csv` crate's serializer cannot flatten.
pub fn write_slices(output_dir: &Path, accepted: &[Slice], rejected: &[RejectedSlice]) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;

    let accepted_path = output_dir.join("general_dataset.json");
    let file = File::create(&accepted_path).with_context(|| format!("creating {accepted_path:?}"))?;
    serde_json::to_writer_pretty(file, accepted)?;

    let rejected_path = output_dir.join("general_dataset_rejected.json");
    let file = File::create(&rejected_path).with_context(|| format!("creating {rejected_path:?}"))?;
    serde_json::to_writer_pretty(file, rejected)?;

    Ok(())
}

pub fn write_folds(output_dir: &Path, folds: &[Fold]) -> Result<()> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join("folds.json");
    let file = File::create(&path).with_context(|| format!("creating {path:?}"))?;
    serde_json::to_writer_pretty(file, folds)?;
    Ok(())
}
