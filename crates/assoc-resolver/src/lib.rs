//! Association resolver (spec.md §4.E): verification tier assignment,
//! candidate ordering, and greedy per-region dimming/flare allocation
//! collapsing each CME's candidates to a single winner.

pub mod candidate;
pub mod resolver;
pub mod tier;

pub use candidate::{Candidate, MAX_CADENCE_SEPARATION_MIN, VERIFICATION_WINDOW_H};
pub use resolver::resolve_associations;
pub use tier::assign_tier;
