//! On-disk population bounds: the region's lifetime restricted to samples
//! whose bbox sits entirely within `|lon| < 70°` (spec.md §6 `table` param).

use store::{BBoxSample, Ts};

pub const ON_DISK_LON_LIMIT: f64 = 70.0;

fn is_on_disk(sample: &BBoxSample) -> bool {
    sample.bbox.lon_min > -ON_DISK_LON_LIMIT && sample.bbox.lon_max < ON_DISK_LON_LIMIT
}

/// `(first_ts, last_ts)` among on-disk samples, assuming `samples` is
/// sorted ascending by `ts`. `None` if no sample qualifies.
pub fn on_disk_bounds(samples: &[BBoxSample]) -> Option<(Ts, Ts)> {
    let mut iter = samples.iter().filter(|s| is_on_disk(s));
    let first = iter.next()?;
    let last = iter.last().unwrap_or(first);
    Some((first.ts, last.ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use heliogeom::BBox;
    use store::RegionId;

    fn t(h: u32) -> Ts {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn sample(region_id: RegionId, h: u32, lon_min: f64, lon_max: f64) -> BBoxSample {
        BBoxSample {
            region_id,
            ts: t(h),
            bbox: BBox::new(lon_min, lon_max, -5.0, 5.0).unwrap(),
            interpolated: false,
            trusted_field: true,
        }
    }

    #[test]
    fn excludes_samples_reaching_the_limb() {
        let samples = vec![sample(1, 0, -80.0, -75.0), sample(1, 1, -10.0, 10.0), sample(1, 2, 75.0, 80.0)];
        assert_eq!(on_disk_bounds(&samples), Some((t(1), t(1))));
    }

    #[test]
    fn none_when_every_sample_is_off_disk() {
        let samples = vec![sample(1, 0, -80.0, -75.0)];
        assert_eq!(on_disk_bounds(&samples), None);
    }
}
