//! # Great-Circle Geometry
//!
//! Initial bearing and Haversine distance on a spherical Earth.
//!
//! Both functions are total: they never fail and never panic. Coordinates
//! outside the valid range still produce a number, it just doesn't mean much.
//! Use [`GeoPoint::try_new`] at the edges of the program when input comes
//! from a user or a file.
//!
//! Accuracy is limited by the sphere (R = 6371 km): up to ~0.5 % against
//! WGS-84, which is plenty for a compass needle or a "nearest mosque" list.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Error, Debug, PartialEq)]
pub enum GeoError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Unchecked constructor, usable in `const` context.
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validating constructor. Rejects NaN and out-of-range values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    #[inline]
    fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Compass bearing in degrees, clockwise from true north, in `[0, 360)`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct BearingResult {
    pub degrees: f64,
}

/// Great-circle distance in kilometres.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceResult {
    pub kilometers: f64,
}

impl DistanceResult {
    pub fn meters(self) -> f64 {
        self.kilometers * 1000.0
    }
}

impl fmt::Display for BearingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.degrees)
    }
}

impl fmt::Display for DistanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kilometers < 1.0 {
            write!(f, "{:.0} m", self.meters())
        } else {
            write!(f, "{:.1} km", self.kilometers)
        }
    }
}

/// Initial (forward-azimuth) bearing from `from` to `to`.
///
/// Antipodal points have no defined bearing; the formula's output is
/// returned as-is.
///
/// ```
/// use hijri_compass_lib::geo::{bearing, GeoPoint};
///
/// let east = bearing(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 90.0));
/// assert!((east.degrees - 90.0).abs() < 1e-9);
/// ```
pub fn bearing(from: GeoPoint, to: GeoPoint) -> BearingResult {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();
    let d_lon = lon2 - lon1;

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    let theta = y.atan2(x);

    let mut degrees = (theta.to_degrees() + 360.0) % 360.0;
    // -0.0 and values that round up to exactly 360.0 would break the half-open range.
    if degrees >= 360.0 || degrees == 0.0 {
        degrees = 0.0;
    }
    BearingResult { degrees }
}

/// Haversine distance between two points.
pub fn distance(from: GeoPoint, to: GeoPoint) -> DistanceResult {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
    // Rounding can push `a` a hair past 1 near antipodes.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    DistanceResult {
        kilometers: EARTH_RADIUS_KM * c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_YORK: GeoPoint = GeoPoint::new(40.7128, -74.0060);
    const LONDON: GeoPoint = GeoPoint::new(51.5074, -0.1278);
    const KAABA: GeoPoint = GeoPoint::new(21.4225, 39.8262);

    #[test]
    fn due_east_at_equator() {
        let b = bearing(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 90.0));
        assert!((b.degrees - 90.0).abs() < 1e-9, "got {}", b.degrees);
    }

    #[test]
    fn cardinal_bearings() {
        let origin = GeoPoint::new(10.0, 10.0);
        let north = bearing(origin, GeoPoint::new(20.0, 10.0));
        let south = bearing(origin, GeoPoint::new(0.0, 10.0));
        let west = bearing(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, -45.0));
        assert!(north.degrees.abs() < 1e-9);
        assert!((south.degrees - 180.0).abs() < 1e-9);
        assert!((west.degrees - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_stays_in_half_open_range() {
        let points = [
            NEW_YORK,
            LONDON,
            KAABA,
            GeoPoint::new(-33.8688, 151.2093),
            GeoPoint::new(64.1466, -21.9426),
            GeoPoint::new(-54.8019, -68.3030),
        ];
        for &a in &points {
            for &b in &points {
                if a == b {
                    continue;
                }
                let d = bearing(a, b).degrees;
                assert!((0.0..360.0).contains(&d), "{a} -> {b}: {d}");
            }
        }
    }

    #[test]
    fn kaaba_to_new_york() {
        let d = distance(KAABA, NEW_YORK).kilometers;
        assert!((10_000.0..=11_000.0).contains(&d), "got {d}");
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let there = distance(LONDON, NEW_YORK).kilometers;
        let back = distance(NEW_YORK, LONDON).kilometers;
        assert!((there - back).abs() < 1e-9);
        assert_eq!(distance(KAABA, KAABA).kilometers, 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance(GeoPoint::new(30.0, -88.0), GeoPoint::new(31.0, -88.0));
        assert!((d.kilometers - 111.195).abs() < 0.5, "got {}", d.kilometers);
    }

    #[test]
    fn antipodes_do_not_panic() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let d = distance(a, b).kilometers;
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
        assert!(bearing(a, b).degrees.is_finite());
    }

    #[test]
    fn try_new_validates_ranges() {
        assert!(GeoPoint::try_new(45.0, 90.0).is_ok());
        assert_eq!(
            GeoPoint::try_new(91.0, 0.0),
            Err(GeoError::InvalidLatitude(91.0))
        );
        assert_eq!(
            GeoPoint::try_new(0.0, -180.5),
            Err(GeoError::InvalidLongitude(-180.5))
        );
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn distance_display_switches_units() {
        assert_eq!(DistanceResult { kilometers: 0.25 }.to_string(), "250 m");
        assert_eq!(DistanceResult { kilometers: 12.34 }.to_string(), "12.3 km");
    }
}
