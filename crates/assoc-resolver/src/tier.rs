//! Verification tier table (spec.md §4.E).

use store::Tier;

const FLARE_SCORE_STRONG: f64 = 25.0;

/// `None` means reject: no signature at all.
pub fn assign_tier(has_dimming: bool, has_flare: bool, best_flare_score: Option<f64>) -> Option<Tier> {
    let strong_flare = best_flare_score.map(|s| s > FLARE_SCORE_STRONG).unwrap_or(false);
    match (has_dimming, has_flare) {
        (true, true) => Some(if strong_flare { 1 } else { 3 }),
        (false, true) => Some(if strong_flare { 2 } else { 4 }),
        (true, false) => Some(5),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_spec_table() {
        assert_eq!(assign_tier(true, true, Some(30.0)), Some(1));
        assert_eq!(assign_tier(false, true, Some(30.0)), Some(2));
        assert_eq!(assign_tier(true, true, Some(10.0)), Some(3));
        assert_eq!(assign_tier(false, true, Some(10.0)), Some(4));
        assert_eq!(assign_tier(true, false, None), Some(5));
        assert_eq!(assign_tier(false, false, None), None);
    }
}
