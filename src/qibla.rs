//! # Qibla Direction
//!
//! Bearing and distance to the Kaaba, plus the helpers a compass needle needs:
//! a 16-point rose label and the signed turn from the device heading.

use crate::geo::{bearing, distance, BearingResult, DistanceResult, GeoPoint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The Kaaba, Masjid al-Haram, Makkah.
pub const KAABA: GeoPoint = GeoPoint::new(21.4225, 39.8262);

/// Sixteen-point compass rose.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    const ROSE: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Nearest rose point; each sector is 22.5° wide and centered on its label.
    pub fn from_bearing(b: BearingResult) -> Self {
        let sector = ((b.degrees.rem_euclid(360.0) / 22.5) + 0.5).floor() as usize % 16;
        Self::ROSE[sector]
    }

    pub fn label(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the compass screen shows for one observer position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QiblaReading {
    pub bearing: BearingResult,
    pub distance: DistanceResult,
    pub compass: CompassPoint,
}

pub fn qibla_bearing(from: GeoPoint) -> BearingResult {
    bearing(from, KAABA)
}

pub fn qibla_distance(from: GeoPoint) -> DistanceResult {
    distance(from, KAABA)
}

/// Bearing, distance and rose label toward the Kaaba from `from`.
///
/// At the Kaaba itself the bearing degenerates to 0°.
pub fn qibla(from: GeoPoint) -> QiblaReading {
    let bearing = qibla_bearing(from);
    QiblaReading {
        bearing,
        distance: qibla_distance(from),
        compass: CompassPoint::from_bearing(bearing),
    }
}

/// Signed turn in degrees, in `(-180, 180]`, from the direction the device
/// faces to `target`. Positive means turn clockwise.
pub fn heading_offset(device_heading_deg: f64, target: BearingResult) -> f64 {
    let diff = (target.degrees - device_heading_deg).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}
