//! Dimming/flare spatial scoring (spec.md §4.D).

use heliogeom::{spherical_point_to_bbox_distance, BBox, Point};
use std::f64::consts::LN_2;
use store::RegionId;

#[derive(Debug, Clone, Copy)]
pub struct ScoreParams {
    pub d_half_deg: f64,
    pub d_zero_deg: f64,
}

pub const DIMMING_SCORE: ScoreParams = ScoreParams { d_half_deg: 5.0, d_zero_deg: 10.0 };
pub const FLARE_SCORE: ScoreParams = ScoreParams { d_half_deg: 10.0, d_zero_deg: 15.0 };

/// `score(d) = 100 * exp(-ln2 * (d/d_half)^2)` for `d <= d_zero`, else 0.
pub fn score(distance_rad: f64, params: ScoreParams) -> f64 {
    let d_zero = params.d_zero_deg.to_radians();
    if distance_rad > d_zero {
        return 0.0;
    }
    let d_half = params.d_half_deg.to_radians();
    100.0 * (-LN_2 * (distance_rad / d_half).powi(2)).exp()
}

/// Scores `point` against every candidate region's bbox and returns the
/// best-scoring `(region_id, score)`. Ties broken by lower `region_id`
/// (spec.md §8 scenario S6). `None` if every candidate scores 0.
pub fn best_match(point: Point, candidates: &[(RegionId, BBox)], params: ScoreParams) -> Option<(RegionId, f64)> {
    candidates
        .iter()
        .map(|(id, bbox)| (*id, score(spherical_point_to_bbox_distance(point, bbox), params)))
        .filter(|(_, s)| *s > 0.0)
        .max_by(|(id_a, s_a), (id_b, s_b)| {
            s_a.partial_cmp(s_b)
                .unwrap()
                .then_with(|| id_b.cmp(id_a))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_100_at_zero_distance() {
        assert_eq!(score(0.0, DIMMING_SCORE), 100.0);
    }

    #[test]
    fn score_is_zero_beyond_d_zero() {
        let just_beyond = DIMMING_SCORE.d_zero_deg.to_radians() + 1e-6;
        assert_eq!(score(just_beyond, DIMMING_SCORE), 0.0);
    }

    #[test]
    fn best_match_breaks_ties_by_lower_region_id() {
        let bbox = BBox::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        let candidates = vec![(200, bbox), (100, bbox)];
        let (winner, _) = best_match(Point::new(0.0, 0.0), &candidates, DIMMING_SCORE).unwrap();
        assert_eq!(winner, 100);
    }

    #[test]
    fn no_candidate_scores_above_zero_returns_none() {
        let far = BBox::new(85.0, 89.0, 0.0, 0.0).unwrap();
        let candidates = vec![(1, far)];
        assert!(best_match(Point::new(0.0, 0.0), &candidates, DIMMING_SCORE).is_none());
    }
}
