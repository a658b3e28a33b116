//! Lead-in/obs/pred period computation for a single step of the window
//! slicer's state machine (spec.md §4.F).

use chrono::{Duration, Timelike};
use store::Ts;

/// Forces the minute field to 30 and zeroes seconds — not a "nearest
/// half-hour" snap, a literal replacement, matching the original
/// `current_ts` and on-disk bound normalisation.
pub fn normalize_to_half_past(ts: Ts) -> Ts {
    ts.with_minute(30).unwrap().with_second(0).unwrap()
}

#[derive(Debug, Clone, Copy)]
pub struct Periods {
    pub lead_in: (Ts, Ts),
    pub obs: (Ts, Ts),
    pub pred: (Ts, Ts),
}

/// `lead_in = [min(true_start, on_disk_start), current_ts)`
/// `obs = [current_ts, current_ts + obs_len_h)`
/// `pred = [obs.end, max(true_end, on_disk_end))`
pub fn compute_periods(current_ts: Ts, obs_len_h: u32, true_start: Ts, true_end: Ts, on_disk_start: Ts, on_disk_end: Ts) -> Periods {
    let obs_end = current_ts + Duration::hours(obs_len_h as i64);
    Periods {
        lead_in: (true_start.min(on_disk_start), current_ts),
        obs: (current_ts, obs_end),
        pred: (obs_end, true_end.max(on_disk_end)),
    }
}
