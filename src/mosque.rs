//! # Nearby Mosque Ranking
//!
//! Filters a list of mosques by distance and required amenities and sorts
//! what's left nearest-first. The first result carries the "closest" badge.

use crate::geo::{bearing, distance, BearingResult, DistanceResult, GeoPoint};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Parking,
    WomensSection,
    Wudu,
    WheelchairAccess,
    JumuahPrayer,
    Library,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mosque {
    pub name: String,
    pub location: GeoPoint,
    #[serde(default)]
    pub amenities: BTreeSet<Amenity>,
}

/// Search parameters. An empty `required` set matches every mosque.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NearbyQuery {
    pub origin: GeoPoint,
    pub radius_km: f64,
    #[serde(default)]
    pub required: BTreeSet<Amenity>,
}

impl NearbyQuery {
    pub fn new(origin: GeoPoint, radius_km: f64) -> Self {
        Self {
            origin,
            radius_km,
            required: BTreeSet::new(),
        }
    }

    pub fn require(mut self, amenity: Amenity) -> Self {
        self.required.insert(amenity);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedMosque<'a> {
    pub mosque: &'a Mosque,
    pub distance: DistanceResult,
    /// Direction from the query origin, for the "navigate" arrow.
    pub bearing: BearingResult,
    pub closest: bool,
}

/// Mosques within `query.radius_km` offering every required amenity,
/// nearest first. Equal distances are ordered by name.
pub fn rank_nearby<'a>(mosques: &'a [Mosque], query: &NearbyQuery) -> Vec<RankedMosque<'a>> {
    let mut ranked: Vec<RankedMosque<'a>> = mosques
        .iter()
        .filter(|m| query.required.is_subset(&m.amenities))
        .map(|m| RankedMosque {
            mosque: m,
            distance: distance(query.origin, m.location),
            bearing: bearing(query.origin, m.location),
            closest: false,
        })
        .filter(|r| r.distance.kilometers <= query.radius_km)
        .collect();

    ranked.sort_by(|a, b| {
        a.distance
            .kilometers
            .partial_cmp(&b.distance.kilometers)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.mosque.name.cmp(&b.mosque.name))
    });

    if let Some(first) = ranked.first_mut() {
        first.closest = true;
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mosque(name: &str, lat: f64, lon: f64, amenities: &[Amenity]) -> Mosque {
        Mosque {
            name: name.to_string(),
            location: GeoPoint::new(lat, lon),
            amenities: amenities.iter().copied().collect(),
        }
    }

    /// Test helper: a handful of mosques around central London
    fn london() -> Vec<Mosque> {
        vec![
            mosque(
                "East London Mosque",
                51.5175,
                -0.0654,
                &[Amenity::WomensSection, Amenity::Wudu, Amenity::Library],
            ),
            mosque(
                "London Central Mosque",
                51.5287,
                -0.1674,
                &[Amenity::Parking, Amenity::Wudu, Amenity::JumuahPrayer],
            ),
            mosque("Brick Lane Mosque", 51.5204, -0.0716, &[Amenity::Wudu]),
            mosque("Finsbury Park Mosque", 51.5644, -0.1068, &[]),
            mosque("Birmingham Central Mosque", 52.4696, -1.8894, &[Amenity::Parking]),
        ]
    }

    const ALDGATE: GeoPoint = GeoPoint::new(51.5142, -0.0755);

    #[test]
    fn sorted_nearest_first_with_single_closest_badge() {
        let mosques = london();
        let ranked = rank_nearby(&mosques, &NearbyQuery::new(ALDGATE, 10.0));

        assert_eq!(ranked.len(), 4, "Birmingham is out of range");
        assert_eq!(ranked[0].mosque.name, "Brick Lane Mosque");
        assert!(ranked[0].closest);
        assert_eq!(ranked.iter().filter(|r| r.closest).count(), 1);
        for pair in ranked.windows(2) {
            assert!(pair[0].distance.kilometers <= pair[1].distance.kilometers);
        }
    }

    #[test]
    fn amenity_filter_requires_all() {
        let mosques = london();
        let query = NearbyQuery::new(ALDGATE, 10.0)
            .require(Amenity::Wudu)
            .require(Amenity::WomensSection);
        let ranked = rank_nearby(&mosques, &query);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].mosque.name, "East London Mosque");
        assert!(ranked[0].closest);
    }

    #[test]
    fn radius_is_inclusive_and_can_exclude_everything() {
        let mosques = london();
        assert!(rank_nearby(&mosques, &NearbyQuery::new(ALDGATE, 0.1)).is_empty());

        let at_origin = vec![mosque("Here", ALDGATE.latitude, ALDGATE.longitude, &[])];
        let ranked = rank_nearby(&at_origin, &NearbyQuery::new(ALDGATE, 0.0));
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn ties_break_by_name() {
        let mosques = vec![
            mosque("Zeta", 10.0, 10.0, &[]),
            mosque("Alpha", 10.0, 10.0, &[]),
        ];
        let ranked = rank_nearby(&mosques, &NearbyQuery::new(GeoPoint::new(10.1, 10.0), 50.0));
        assert_eq!(ranked[0].mosque.name, "Alpha");
        assert!(ranked[0].closest && !ranked[1].closest);
    }

    #[test]
    fn bearing_points_from_origin_to_mosque() {
        let mosques = vec![mosque("North", 11.0, 10.0, &[])];
        let ranked = rank_nearby(&mosques, &NearbyQuery::new(GeoPoint::new(10.0, 10.0), 200.0));
        assert!(ranked[0].bearing.degrees.abs() < 1e-9);
    }
}
