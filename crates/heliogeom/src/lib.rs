//! Heliographic bounding-box geometry.
//!
//! Pure and stateless: position angle / sky-plane projection, spherical
//! point-to-bbox distance, and differential-rotation propagation of a
//! bounding box between two timestamps. No I/O, no logging — callers are
//! expected to log at the call site, since this kernel runs in the hot
//! inner loop of the spatial/temporal matcher.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    #[error("invalid bounding box: lon [{lon_min}, {lon_max}], lat [{lat_min}, {lat_max}]")]
    InvalidBoundingBox {
        lon_min: f64,
        lon_max: f64,
        lat_min: f64,
        lat_max: f64,
    },
}

pub type Result<T> = std::result::Result<T, GeomError>;

/// A single heliographic point at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// An axis-aligned heliographic bounding box (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl BBox {
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> Result<Self> {
        let bbox = Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        };
        bbox.validate()?;
        Ok(bbox)
    }

    fn validate(&self) -> Result<()> {
        if self.lon_min > self.lon_max || self.lat_min > self.lat_max {
            return Err(GeomError::InvalidBoundingBox {
                lon_min: self.lon_min,
                lon_max: self.lon_max,
                lat_min: self.lat_min,
                lat_max: self.lat_max,
            });
        }
        Ok(())
    }

    pub fn centre(&self) -> Point {
        Point::new(
            (self.lon_min + self.lon_max) / 2.0,
            (self.lat_min + self.lat_max) / 2.0,
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.lon_min..=self.lon_max).contains(&p.lon) && (self.lat_min..=self.lat_max).contains(&p.lat)
    }

    pub fn width(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    pub fn height(&self) -> f64 {
        self.lat_max - self.lat_min
    }
}

/// How a bbox is carried forward/backward in time by `rotate_bbox_to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    /// Propagate each corner independently; width/height may change.
    Corners,
    /// Propagate the centre only, keeping width/height fixed.
    KeepShape,
}

/// Solar surface sidereal rotation rate at a given latitude (Snodgrass &
/// Ulrich 1990), in degrees/day. Latitude is invariant under rotation; only
/// longitude advances, and at a rate that depends on latitude.
fn rotation_rate_deg_per_day(lat_deg: f64) -> f64 {
    let s = lat_deg.to_radians().sin();
    14.713 - 2.396 * s.powi(2) - 1.787 * s.powi(4)
}

fn lon_shift_deg(lat_deg: f64, from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    let days = (to - from).num_seconds() as f64 / 86400.0;
    rotation_rate_deg_per_day(lat_deg) * days
}

/// Convert heliographic longitude/latitude to a projection onto the 2-D sky
/// plane: `(sin(lon) cos(lat), sin(lat))`.
pub fn sky_plane_coords(lon_deg: f64, lat_deg: f64) -> (f64, f64) {
    let lon = lon_deg.to_radians();
    let lat = lat_deg.to_radians();
    (lon.sin() * lat.cos(), lat.sin())
}

/// The 2-D radius of the sky-plane projection, in `[0, 1]`.
pub fn distance_to_sun_centre(lon_deg: f64, lat_deg: f64) -> f64 {
    let (x, y) = sky_plane_coords(lon_deg, lat_deg);
    (x * x + y * y).sqrt()
}

/// Position angle measured from solar north, rotating east, in `[0, 360)`.
/// Exactly at either pole the angle is undefined; by convention we return 0.
pub fn position_angle(lon_deg: f64, lat_deg: f64) -> f64 {
    if lat_deg.abs() >= 90.0 - 1e-9 {
        return 0.0;
    }
    let (x, y) = sky_plane_coords(lon_deg, lat_deg);
    if x.abs() < 1e-12 && y.abs() < 1e-12 {
        return 0.0;
    }
    let raw = y.atan2(x).to_degrees();
    (raw - 90.0).rem_euclid(360.0)
}

/// Great-circle angular distance (radians) between two heliographic points,
/// via the spherical law of cosines.
fn great_circle_distance(a: Point, b: Point) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (a.lon - b.lon).to_radians();
    let cos_d = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * dlon.cos()).clamp(-1.0, 1.0);
    cos_d.acos()
}

/// Distance from a point to a bbox: zero if the point lies inside the box,
/// otherwise the great-circle angular distance (radians) from the point to
/// the closest point on the box boundary, found by clamping the point's
/// lon/lat onto the box's intervals.
pub fn spherical_point_to_bbox_distance(point: Point, bbox: &BBox) -> f64 {
    if bbox.contains(point) {
        return 0.0;
    }
    let nearest = Point::new(
        point.lon.clamp(bbox.lon_min, bbox.lon_max),
        point.lat.clamp(bbox.lat_min, bbox.lat_max),
    );
    great_circle_distance(point, nearest)
}

/// Propagate `bbox` from `ts_from` to `ts_target` under differential
/// rotation. Latitude never changes; longitude advances at a rate that
/// depends on latitude.
pub fn rotate_bbox_to(
    bbox: &BBox,
    ts_from: NaiveDateTime,
    ts_target: NaiveDateTime,
    mode: RotationMode,
) -> Result<BBox> {
    bbox.validate()?;

    let rotated = match mode {
        RotationMode::KeepShape => {
            let centre = bbox.centre();
            let shift = lon_shift_deg(centre.lat, ts_from, ts_target);
            let new_centre_lon = centre.lon + shift;
            let half_w = bbox.width() / 2.0;
            BBox {
                lon_min: new_centre_lon - half_w,
                lon_max: new_centre_lon + half_w,
                lat_min: bbox.lat_min,
                lat_max: bbox.lat_max,
            }
        }
        RotationMode::Corners => {
            let shift_at_min_lat = lon_shift_deg(bbox.lat_min, ts_from, ts_target);
            let shift_at_max_lat = lon_shift_deg(bbox.lat_max, ts_from, ts_target);
            let corners_lon = [
                bbox.lon_min + shift_at_min_lat,
                bbox.lon_max + shift_at_min_lat,
                bbox.lon_min + shift_at_max_lat,
                bbox.lon_max + shift_at_max_lat,
            ];
            let lon_min = corners_lon.iter().cloned().fold(f64::INFINITY, f64::min);
            let lon_max = corners_lon.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            BBox {
                lon_min,
                lon_max,
                lat_min: bbox.lat_min,
                lat_max: bbox.lat_max,
            }
        }
    };

    rotated.validate()?;
    Ok(rotated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn pole_position_angle_is_zero() {
        assert_eq!(position_angle(0.0, 90.0), 0.0);
        assert_eq!(position_angle(0.0, -90.0), 0.0);
    }

    #[test]
    fn distance_to_centre_is_bounded() {
        let d = distance_to_sun_centre(5.0, 5.0);
        assert!(d >= 0.0 && d < 1.0);
        let d_limb = distance_to_sun_centre(90.0, 0.0);
        assert!((d_limb - 1.0).abs() < 1e-9);
    }

    #[test]
    fn point_inside_bbox_has_zero_distance() {
        let bbox = BBox::new(-10.0, 10.0, -10.0, 10.0).unwrap();
        assert_eq!(spherical_point_to_bbox_distance(Point::new(0.0, 0.0), &bbox), 0.0);
    }

    #[test]
    fn point_outside_bbox_has_positive_distance() {
        let bbox = BBox::new(-10.0, 10.0, -10.0, 10.0).unwrap();
        let d = spherical_point_to_bbox_distance(Point::new(20.0, 0.0), &bbox);
        assert!(d > 0.0);
    }

    #[test]
    fn invalid_bbox_rejected() {
        assert!(BBox::new(10.0, -10.0, -5.0, 5.0).is_err());
        assert!(BBox::new(-5.0, 5.0, 10.0, -10.0).is_err());
    }

    #[test]
    fn rotation_to_own_timestamp_is_identity() {
        let bbox = BBox::new(-5.0, 5.0, -5.0, 5.0).unwrap();
        let t = ts(0, 0);
        for mode in [RotationMode::KeepShape, RotationMode::Corners] {
            let rotated = rotate_bbox_to(&bbox, t, t, mode).unwrap();
            assert!((rotated.lon_min - bbox.lon_min).abs() < 1e-6);
            assert!((rotated.lon_max - bbox.lon_max).abs() < 1e-6);
            assert!((rotated.lat_min - bbox.lat_min).abs() < 1e-6);
            assert!((rotated.lat_max - bbox.lat_max).abs() < 1e-6);
        }
    }

    #[test]
    fn keep_shape_preserves_width_and_height() {
        let bbox = BBox::new(-5.0, 5.0, -3.0, 3.0).unwrap();
        let rotated = rotate_bbox_to(&bbox, ts(0, 0), ts(12, 0), RotationMode::KeepShape).unwrap();
        assert!((rotated.width() - bbox.width()).abs() < 1e-9);
        assert!((rotated.height() - bbox.height()).abs() < 1e-9);
        assert_eq!(rotated.lat_min, bbox.lat_min);
        assert_eq!(rotated.lat_max, bbox.lat_max);
    }

    #[test]
    fn rotation_advances_longitude_eastward() {
        let bbox = BBox::new(-5.0, 5.0, 0.0, 0.0).unwrap();
        let rotated = rotate_bbox_to(&bbox, ts(0, 0), ts(12, 0), RotationMode::KeepShape).unwrap();
        assert!(rotated.centre().lon > bbox.centre().lon);
    }
}
