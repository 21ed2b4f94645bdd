use std::sync::Arc;

use crate::core::radius::{prefilter, rank, GeoTagged, RadiusMatch};
use crate::models::{GeoPoint, RadiusQuery};
use crate::services::routing::RoutingClient;

/// Two-phase radius search over geo-tagged records
///
/// Phase 1 bounds the candidate set with the cheap great-circle
/// pre-filter; phase 2 batch-routes the survivors and keeps those within
/// the true road-distance radius.
pub struct RadiusSearch {
    routing: Arc<RoutingClient>,
}

impl RadiusSearch {
    pub fn new(routing: Arc<RoutingClient>) -> Self {
        Self { routing }
    }

    /// Filter records to those within road-distance radius of the origin,
    /// attaching travel figures and ordering nearest first
    pub async fn filter_by_radius<T: GeoTagged>(
        &self,
        records: Vec<T>,
        query: &RadiusQuery,
    ) -> Vec<RadiusMatch<T>> {
        let survivors = prefilter(records, query.origin, query.radius_miles);
        if survivors.is_empty() {
            return Vec::new();
        }

        // Pre-filter survivors always carry coordinates
        let (survivors, destinations): (Vec<T>, Vec<GeoPoint>) = survivors
            .into_iter()
            .filter_map(|record| record.coordinates().map(|point| (record, point)))
            .unzip();

        let distances = self
            .routing
            .batch_road_distance(query.origin, &destinations, query.use_traffic)
            .await;

        let mut matches: Vec<RadiusMatch<T>> = survivors
            .into_iter()
            .zip(distances)
            .filter(|(_, distance)| distance.distance_miles <= query.radius_miles)
            .map(|(record, distance)| RadiusMatch { record, distance })
            .collect();

        rank(&mut matches);
        matches
    }
}
