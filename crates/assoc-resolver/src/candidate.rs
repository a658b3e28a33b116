//! A (CME, region) association candidate, enriched with whatever dimming/
//! flare independently matched the same region within the verification
//! clock window (spec.md §4.E).

use chrono::Duration;
use store::{CmeId, DimmingId, FlareId, RegionId, Tier, Ts};

/// `[-3h, 0h]` relative to CME detection time.
pub const VERIFICATION_WINDOW_H: i64 = 3;
/// Cadence separation tolerated between an event and the 12-minute bbox
/// grid when deciding the event still "belongs" to the CME's window.
pub const MAX_CADENCE_SEPARATION_MIN: i64 = 12;

pub fn in_verification_window(cme_ts: Ts, event_ts: Ts) -> bool {
    let diff = cme_ts - event_ts;
    diff >= Duration::minutes(-MAX_CADENCE_SEPARATION_MIN)
        && diff <= Duration::hours(VERIFICATION_WINDOW_H) + Duration::minutes(MAX_CADENCE_SEPARATION_MIN)
}

#[derive(Debug, Clone)]
pub struct Candidate {
    pub cme_id: CmeId,
    pub cme_ts: Ts,
    pub region_id: RegionId,
    pub dimming: Option<(DimmingId, Ts)>,
    pub flare: Option<(FlareId, Ts, f64)>,
    pub tier: Tier,
}

impl Candidate {
    pub fn has_dimming(&self) -> bool {
        self.dimming.is_some()
    }

    pub fn has_flare(&self) -> bool {
        self.flare.is_some()
    }

    pub fn flare_score(&self) -> Option<f64> {
        self.flare.map(|(_, _, score)| score)
    }

    pub fn dimming_diff_h(&self) -> Option<f64> {
        self.dimming.map(|(_, ts)| (self.cme_ts - ts).num_seconds() as f64 / 3600.0)
    }
}

/// Ordering for resolution: ascending tier, then higher flare score first,
/// then dimming time closer to each candidate's own CME first, then
/// region_id ascending (spec.md §4.E / §5's determinism guarantee). Each
/// side's dimming offset is measured against its own `cme_ts` — candidates
/// compared here may belong to different CMEs.
pub fn candidate_order(a: &Candidate, b: &Candidate) -> std::cmp::Ordering {
    a.tier
        .cmp(&b.tier)
        .then_with(|| {
            b.flare_score()
                .unwrap_or(f64::MIN)
                .partial_cmp(&a.flare_score().unwrap_or(f64::MIN))
                .unwrap()
        })
        .then_with(|| {
            let da = a.dimming_diff_h().unwrap_or(f64::MAX).abs();
            let db = b.dimming_diff_h().unwrap_or(f64::MAX).abs();
            da.partial_cmp(&db).unwrap()
        })
        .then_with(|| a.region_id.cmp(&b.region_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn window_accepts_event_up_to_three_hours_before() {
        assert!(in_verification_window(t(3, 0), t(0, 0)));
        assert!(!in_verification_window(t(3, 0), t(0, 0) - Duration::minutes(30)));
    }

    #[test]
    fn window_rejects_event_strictly_after_cme() {
        assert!(!in_verification_window(t(0, 0), t(0, 30)));
    }
}
