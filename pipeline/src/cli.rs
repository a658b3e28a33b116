//! CLI arguments (spec.md §6): catalogue file paths plus the three
//! window-slicer parameters and the split count.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use store::FlareSource;

/// Which flare catalogue is authoritative (spec.md §9 open question).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FlareSourceArg {
    External,
    EmbeddedPerRegion,
}

impl From<FlareSourceArg> for FlareSource {
    fn from(arg: FlareSourceArg) -> Self {
        match arg {
            FlareSourceArg::External => FlareSource::External,
            FlareSourceArg::EmbeddedPerRegion => FlareSource::EmbeddedPerRegion,
        }
    }
}

impl std::fmt::Display for FlareSourceArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FlareSourceArg::External => "external",
            FlareSourceArg::EmbeddedPerRegion => "embedded-per-region",
        };
        f.write_str(s)
    }
}

/// Which image-count validation policy gates slice acceptance (spec.md
/// §4.F, "only for the extended SDOML variant").
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ImagePolicyArg {
    /// No raster tile store configured; every window passes.
    Unrestricted,
    /// Requires `obs_len_h` (or `obs_len_h - 1` within 30 minutes of
    /// `obs_end`) SDOML image tiles per window.
    Sdoml,
}

impl std::fmt::Display for ImagePolicyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ImagePolicyArg::Unrestricted => "unrestricted",
            ImagePolicyArg::Sdoml => "sdoml",
        };
        f.write_str(s)
    }
}

#[derive(Parser, Debug)]
#[command(name = "helio-dataset", about = "Build a labelled active-region / eruptive-event training dataset")]
pub struct Args {
    /// Directory of per-region raw bbox TSV files, named `<region_id>.tsv`.
    #[arg(long)]
    pub region_series_dir: PathBuf,

    /// Region (HARP) -> legacy NOAA number mapping file.
    #[arg(long)]
    pub region_mapping: PathBuf,

    /// CME fixed-column text catalogue.
    #[arg(long)]
    pub cme_catalogue: PathBuf,

    /// Dimming CSV catalogue.
    #[arg(long)]
    pub dimming_catalogue: PathBuf,

    /// Which flare catalogue to treat as authoritative.
    #[arg(long, value_enum, default_value_t = FlareSourceArg::External)]
    pub flare_source: FlareSourceArg,

    /// Flare CSV catalogue, required when `--flare-source external`.
    #[arg(long, required_if_eq("flare_source", "external"))]
    pub flare_catalogue: Option<PathBuf>,

    /// Directory accepted/rejected slices and fold assignments are written to.
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Observation window length in hours, must be a multiple of 1h.
    #[arg(long, default_value_t = 24, value_parser = clap::value_parser!(u32).range(1..))]
    pub obs_len_h: u32,

    /// Slide cadence in hours, must be a multiple of 1h.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub step_h: u32,

    /// Reject windows containing an unclear (independently verified but
    /// not finally associated) CME. Pass `--strict false` to disable.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub strict: bool,

    /// Number of stratified splits before fold collapsing.
    #[arg(long, default_value_t = 10)]
    pub splits: usize,

    /// Image-count validation policy applied before a window is accepted.
    #[arg(long, value_enum, default_value_t = ImagePolicyArg::Unrestricted)]
    pub image_policy: ImagePolicyArg,

    #[arg(long)]
    pub verbose: bool,
}
