//! The per-region step/advance state machine (spec.md §4.F).

use crate::periods::{compute_periods, normalize_to_half_past, Periods};
use chrono::Duration;
use store::{RegionId, Ts};

#[derive(Debug)]
pub struct WindowState {
    pub region_id: RegionId,
    pub obs_len_h: u32,
    pub step_h: u32,
    pub current_ts: Ts,
    pub true_start: Ts,
    pub true_end: Ts,
    pub on_disk_start: Ts,
    pub on_disk_end: Ts,
    pub finished: bool,
}

impl WindowState {
    /// `true_start/end` is the region's unrestricted lifetime; `on_disk_start/end`
    /// bound the on-disk-population-restricted samples actually observed.
    /// Both on-disk bounds are normalised to half-past-the-hour, matching the
    /// original's bound normalisation ahead of the stepping loop.
    pub fn new(region_id: RegionId, obs_len_h: u32, step_h: u32, true_start: Ts, true_end: Ts, on_disk_start: Ts, on_disk_end: Ts) -> Self {
        let on_disk_start = normalize_to_half_past(on_disk_start);
        let on_disk_end = normalize_to_half_past(on_disk_end);
        Self {
            region_id,
            obs_len_h,
            step_h,
            current_ts: on_disk_start,
            true_start,
            true_end,
            on_disk_start,
            on_disk_end,
            finished: false,
        }
    }

    pub fn periods(&self) -> Periods {
        compute_periods(self.current_ts, self.obs_len_h, self.true_start, self.true_end, self.on_disk_start, self.on_disk_end)
    }

    /// Advances `current_ts` by `step_h` unless the next observation window
    /// would run past `on_disk_end`, in which case the machine finishes
    /// without advancing — the row already emitted for the current
    /// `current_ts` is the final one.
    pub fn step(&mut self) {
        if self.finished {
            return;
        }
        let next_obs_end = self.periods().obs.1 + Duration::hours(self.step_h as i64);
        if next_obs_end > self.on_disk_end {
            self.finished = true;
            return;
        }
        self.current_ts += Duration::hours(self.step_h as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(day: u32, h: u32, m: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn finishes_after_the_last_window_that_still_fits_on_disk_data() {
        // on_disk lifetime is obs_len_h + step_h long: the window at
        // current_ts and the one step_h later both still end at or before
        // on_disk_end (half-open `obs`, spec.md §4.F/§8), so two rows are
        // emitted before the machine finishes.
        let mut s = WindowState::new(1, 24, 1, t(1, 0, 0), t(2, 1, 0), t(1, 0, 30), t(2, 1, 30));
        assert!(!s.finished);
        s.step();
        assert!(!s.finished);
        assert_eq!(s.current_ts, t(1, 1, 30));
        s.step();
        assert!(s.finished);
    }

    #[test]
    fn advances_when_room_remains() {
        let mut s = WindowState::new(1, 24, 1, t(1, 0, 0), t(5, 0, 0), t(1, 0, 30), t(4, 0, 30));
        s.step();
        assert!(!s.finished);
        assert_eq!(s.current_ts, t(1, 1, 30));
    }
}
