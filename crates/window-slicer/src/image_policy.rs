//! Optional image-count validation hook (spec.md §4.F, "only for the
//! extended SDOML variant"). The raster tile store itself is out of scope;
//! this trait preserves the call site the original system used so the
//! state machine stays extensible rather than a dead end.

use store::Ts;

pub trait ImageCountPolicy: Send + Sync {
    /// `last_sample_ts` is the timestamp of the last observed sample inside
    /// `obs`, if any. Returns whether the window has enough imagery to train on.
    fn accepts(&self, obs_len_h: u32, sample_count: usize, last_sample_ts: Option<Ts>, obs_end: Ts) -> bool;
}

/// Default: no image backing store configured, every window passes.
pub struct Unrestricted;

impl ImageCountPolicy for Unrestricted {
    fn accepts(&self, _obs_len_h: u32, _sample_count: usize, _last_sample_ts: Option<Ts>, _obs_end: Ts) -> bool {
        true
    }
}

/// Accepted iff `obs` holds `obs_len_h` or `obs_len_h - 1` samples; in the
/// one-short case the last sample must be within 30 minutes of `obs.end`.
pub struct SdomlImageCount;

impl ImageCountPolicy for SdomlImageCount {
    fn accepts(&self, obs_len_h: u32, sample_count: usize, last_sample_ts: Option<Ts>, obs_end: Ts) -> bool {
        let expected = obs_len_h as usize;
        if sample_count == expected {
            return true;
        }
        if sample_count + 1 == expected {
            if let Some(ts) = last_sample_ts {
                return (obs_end - ts).num_minutes().abs() <= 30;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: u32, m: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap() + chrono::Duration::hours(h as i64) + chrono::Duration::minutes(m as i64)
    }

    #[test]
    fn unrestricted_always_accepts() {
        assert!(Unrestricted.accepts(24, 0, None, t(0, 0)));
    }

    #[test]
    fn sdoml_accepts_one_short_within_thirty_minutes() {
        assert!(SdomlImageCount.accepts(24, 23, Some(t(23, 45)), t(24, 0)));
        assert!(!SdomlImageCount.accepts(24, 23, Some(t(23, 20)), t(24, 0)));
        assert!(!SdomlImageCount.accepts(24, 22, Some(t(22, 0)), t(24, 0)));
    }
}
