use std::cmp::Ordering;

use crate::core::distance::great_circle_distance;
use crate::models::{CandidateProfile, DistanceResult, GeoPoint, JobPosting};

/// Great-circle buffer applied before the road-distance phase
///
/// Road routes are longer than straight lines, so the pre-filter keeps
/// everything within 1.5x the requested radius and lets the precise phase
/// make the final call.
pub const PREFILTER_FACTOR: f64 = 1.5;

/// A record that may carry coordinates
pub trait GeoTagged {
    fn coordinates(&self) -> Option<GeoPoint>;
}

impl GeoTagged for JobPosting {
    fn coordinates(&self) -> Option<GeoPoint> {
        JobPosting::coordinates(self)
    }
}

impl GeoTagged for CandidateProfile {
    fn coordinates(&self) -> Option<GeoPoint> {
        CandidateProfile::coordinates(self)
    }
}

/// A record that survived the radius filter, with its travel figures
#[derive(Debug, Clone)]
pub struct RadiusMatch<T> {
    pub record: T,
    pub distance: DistanceResult,
}

/// Phase 1: drop records without coordinates or beyond the buffered
/// great-circle radius, bounding the set sent to the routing provider
pub fn prefilter<T: GeoTagged>(records: Vec<T>, origin: GeoPoint, radius_miles: f64) -> Vec<T> {
    let bound = radius_miles * PREFILTER_FACTOR;
    records
        .into_iter()
        .filter(|record| match record.coordinates() {
            Some(point) => great_circle_distance(origin, point) <= bound,
            None => false,
        })
        .collect()
}

/// Final ordering: ascending road distance, ties broken by ascending drive
/// time with missing drive time last
pub fn rank<T>(matches: &mut [RadiusMatch<T>]) {
    matches.sort_by(|a, b| {
        a.distance
            .distance_miles
            .partial_cmp(&b.distance.distance_miles)
            .unwrap_or(Ordering::Equal)
            .then_with(|| match (a.distance.duration_minutes, b.distance.duration_minutes) {
                (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
    });
}
