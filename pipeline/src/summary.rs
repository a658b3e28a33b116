//! End-of-run OK / OK-with-warnings / FAIL summary matrix (spec.md §7),
//! matching the teacher's end-of-run summary block.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Ok,
    OkWithWarnings,
    Fail,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunOutcome::Ok => "OK",
            RunOutcome::OkWithWarnings => "OK with warnings",
            RunOutcome::Fail => "FAIL",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub n_cmes_loaded: usize,
    pub n_cmes_eligible: usize,
    pub n_dimmings_loaded: usize,
    pub n_flares_loaded: usize,
    pub n_spatial_candidates: usize,
    pub n_dimming_matches: usize,
    pub n_flare_matches: usize,
    pub n_associations: usize,
    pub n_slices_accepted: usize,
    pub n_slices_rejected: usize,
    pub n_folds: usize,
}

impl RunSummary {
    /// spec.md §7: OK with warnings when anything was rejected or dropped
    /// upstream, else OK. FAIL is reserved for a stage aborting outright,
    /// which short-circuits main before a summary is ever produced.
    pub fn outcome(&self) -> RunOutcome {
        if self.n_slices_rejected > 0 || self.n_cmes_eligible < self.n_cmes_loaded {
            RunOutcome::OkWithWarnings
        } else {
            RunOutcome::Ok
        }
    }

    pub fn imbalance_ratio(&self) -> f64 {
        if self.n_slices_accepted == 0 {
            0.0
        } else {
            self.n_slices_rejected as f64 / self.n_slices_accepted as f64
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "RUN SUMMARY: {}", self.outcome())?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "CMEs loaded/eligible:    {} / {}", self.n_cmes_loaded, self.n_cmes_eligible)?;
        writeln!(f, "Dimmings/flares loaded:  {} / {}", self.n_dimmings_loaded, self.n_flares_loaded)?;
        writeln!(f, "Spatial candidates:      {}", self.n_spatial_candidates)?;
        writeln!(f, "Dimming/flare matches:   {} / {}", self.n_dimming_matches, self.n_flare_matches)?;
        writeln!(f, "Associations:            {}", self.n_associations)?;
        writeln!(f, "Slices accepted/rejected: {} / {}", self.n_slices_accepted, self.n_slices_rejected)?;
        writeln!(f, "Rejected/accepted ratio: {:.3}", self.imbalance_ratio())?;
        write!(f, "Folds:                   {}", self.n_folds)
    }
}
