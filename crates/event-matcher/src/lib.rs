//! Spatial/temporal matcher (spec.md §4.D): temporal bracketing, bbox
//! snapshot + rotation, CME halo/non-halo spatial test, and the dimming/
//! flare piecewise distance score.

pub mod cme_test;
pub mod error;
pub mod matcher;
pub mod score;
pub mod snapshot;

pub use cme_test::is_spatially_consistent;
pub use error::{MatcherError, Result};
pub use matcher::{match_cme, match_dimming, match_flare};
pub use score::{best_match, score, ScoreParams, DIMMING_SCORE, FLARE_SCORE};
pub use snapshot::bbox_at;
