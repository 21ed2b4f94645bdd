use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::distance::{estimate_drive_minutes, great_circle_distance};
use crate::models::{DistanceResult, DistanceStatus, GeoPoint, TrafficModel};
use crate::services::cache::{ttl_for, CacheKey, DistanceCache};

/// Provider-side limit on destinations per distance-matrix call
pub const MAX_BATCH_SIZE: usize = 25;

/// Per-request timeout; a timeout is treated like any other failure
const REQUEST_TIMEOUT_SECS: u64 = 7;

const METERS_PER_MILE: f64 = 1609.344;

/// Internal routing failures
///
/// These never cross the client's public boundary; every failure is
/// converted into a fallback result carrying the error text.
#[derive(Debug, Error)]
enum RoutingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("provider returned status {0}")]
    ProviderStatus(String),

    #[error("invalid response format: {0}")]
    InvalidResponse(String),
}

/// Distance-matrix provider client
///
/// Handles all communication with the routing provider including:
/// - Single origin/destination road distance lookups
/// - Batched lookups chunked at the provider's per-call limit
/// - Great-circle fallback whenever the provider cannot answer
pub struct RoutingClient {
    base_url: String,
    api_key: String,
    traffic_model: TrafficModel,
    client: Client,
    cache: Arc<DistanceCache>,
}

impl RoutingClient {
    /// Create a new routing client
    pub fn new(
        base_url: String,
        api_key: String,
        traffic_model: TrafficModel,
        cache: Arc<DistanceCache>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            traffic_model,
            client,
            cache,
        }
    }

    /// Road distance and travel time for one origin/destination pair
    ///
    /// Never fails: any provider problem degrades to a great-circle
    /// estimate with `FALLBACK` status. Results, fallbacks included, are
    /// cached against the rounded coordinate pair.
    pub async fn road_distance(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        use_traffic: bool,
    ) -> DistanceResult {
        let key = CacheKey::distance(origin, destination, use_traffic, self.traffic_model);
        if let Ok(hit) = self.cache.get(&key).await {
            return hit;
        }

        let result = match self.request_matrix(origin, &[destination], use_traffic).await {
            Ok(mut results) => results.remove(0),
            Err(e) => {
                tracing::warn!("Routing provider failed for {}: {}", key, e);
                self.fallback(origin, destination, &e.to_string())
            }
        };

        self.store(&key, &result, use_traffic).await;
        result
    }

    /// Road distances for many destinations, one result per input in order
    ///
    /// The cache is consulted per destination first; only misses go to the
    /// provider, chunked at the per-call limit. A failed chunk falls back
    /// per destination without aborting the rest of the batch.
    pub async fn batch_road_distance(
        &self,
        origin: GeoPoint,
        destinations: &[GeoPoint],
        use_traffic: bool,
    ) -> Vec<DistanceResult> {
        let mut results: Vec<Option<DistanceResult>> = vec![None; destinations.len()];
        let mut misses: Vec<usize> = Vec::new();

        for (i, destination) in destinations.iter().enumerate() {
            let key = CacheKey::distance(origin, *destination, use_traffic, self.traffic_model);
            match self.cache.get(&key).await {
                Ok(hit) => results[i] = Some(hit),
                Err(_) => misses.push(i),
            }
        }

        tracing::debug!(
            "Batch distance lookup: {} destinations, {} cache misses",
            destinations.len(),
            misses.len()
        );

        for chunk in misses.chunks(MAX_BATCH_SIZE) {
            let points: Vec<GeoPoint> = chunk.iter().map(|&i| destinations[i]).collect();

            let chunk_results = match self.request_matrix(origin, &points, use_traffic).await {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(
                        "Routing provider failed for chunk of {}: {}",
                        points.len(),
                        e
                    );
                    points
                        .iter()
                        .map(|point| self.fallback(origin, *point, &e.to_string()))
                        .collect()
                }
            };

            for (&i, result) in chunk.iter().zip(chunk_results) {
                let key =
                    CacheKey::distance(origin, destinations[i], use_traffic, self.traffic_model);
                self.store(&key, &result, use_traffic).await;
                results[i] = Some(result);
            }
        }

        results
            .into_iter()
            .map(|r| r.expect("every destination resolved via cache or provider"))
            .collect()
    }

    async fn store(&self, key: &str, result: &DistanceResult, use_traffic: bool) {
        let ttl = ttl_for(result, use_traffic);
        if let Err(e) = self.cache.set(key, result, ttl).await {
            tracing::warn!("Failed to cache distance result: {}", e);
        }
    }

    /// Great-circle estimate standing in for a provider answer
    fn fallback(&self, origin: GeoPoint, destination: GeoPoint, error: &str) -> DistanceResult {
        let miles = great_circle_distance(origin, destination);
        DistanceResult {
            distance_miles: miles,
            duration_minutes: Some(estimate_drive_minutes(miles)),
            duration_in_traffic_minutes: None,
            status: DistanceStatus::Fallback,
            error: Some(error.to_string()),
        }
    }

    /// One provider call for up to `MAX_BATCH_SIZE` destinations
    async fn request_matrix(
        &self,
        origin: GeoPoint,
        destinations: &[GeoPoint],
        use_traffic: bool,
    ) -> Result<Vec<DistanceResult>, RoutingError> {
        let origins = format!("{},{}", origin.latitude, origin.longitude);
        let dests = destinations
            .iter()
            .map(|d| format!("{},{}", d.latitude, d.longitude))
            .collect::<Vec<_>>()
            .join("|");

        let mut url = format!(
            "{}/maps/api/distancematrix/json?origins={}&destinations={}&mode=driving&units=imperial&key={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&origins),
            urlencoding::encode(&dests),
            urlencoding::encode(&self.api_key),
        );

        if use_traffic {
            url.push_str("&departure_time=now&traffic_model=");
            url.push_str(self.traffic_model.as_str());
        }

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(RoutingError::ProviderStatus(response.status().to_string()));
        }

        let json: Value = response.json().await?;

        let top_status = json.get("status").and_then(|s| s.as_str()).unwrap_or("MISSING");
        if top_status != "OK" {
            return Err(RoutingError::ProviderStatus(top_status.to_string()));
        }

        let elements = json
            .get("rows")
            .and_then(|r| r.as_array())
            .and_then(|rows| rows.first())
            .and_then(|row| row.get("elements"))
            .and_then(|e| e.as_array())
            .ok_or_else(|| RoutingError::InvalidResponse("missing rows/elements".into()))?;

        if elements.len() != destinations.len() {
            return Err(RoutingError::InvalidResponse(format!(
                "expected {} elements, got {}",
                destinations.len(),
                elements.len()
            )));
        }

        Ok(destinations
            .iter()
            .zip(elements)
            .map(|(destination, element)| self.parse_element(origin, *destination, element))
            .collect())
    }

    /// Parse one matrix element; a non-OK element degrades to a fallback
    /// for that destination only
    fn parse_element(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        element: &Value,
    ) -> DistanceResult {
        let status = element.get("status").and_then(|s| s.as_str()).unwrap_or("MISSING");
        if status != "OK" {
            return self.fallback(origin, destination, &format!("element status {}", status));
        }

        let meters = element
            .get("distance")
            .and_then(|d| d.get("value"))
            .and_then(|v| v.as_f64());
        let seconds = element
            .get("duration")
            .and_then(|d| d.get("value"))
            .and_then(|v| v.as_f64());
        let traffic_seconds = element
            .get("duration_in_traffic")
            .and_then(|d| d.get("value"))
            .and_then(|v| v.as_f64());

        match meters {
            Some(meters) => DistanceResult {
                distance_miles: meters / METERS_PER_MILE,
                duration_minutes: seconds.map(|s| s / 60.0),
                duration_in_traffic_minutes: traffic_seconds.map(|s| s / 60.0),
                status: DistanceStatus::Ok,
                error: None,
            },
            None => self.fallback(origin, destination, "element missing distance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_client() -> RoutingClient {
        RoutingClient::new(
            "https://maps.test".to_string(),
            "test_key".to_string(),
            TrafficModel::BestGuess,
            Arc::new(DistanceCache::in_memory(100)),
        )
    }

    #[test]
    fn test_routing_client_creation() {
        let client = test_client();
        assert_eq!(client.base_url, "https://maps.test");
        assert_eq!(client.api_key, "test_key");
    }

    #[test]
    fn test_parse_element_success() {
        let client = test_client();
        let origin = GeoPoint::new(33.7490, -84.3880);
        let destination = GeoPoint::new(33.7756, -84.3963);

        let element = json!({
            "status": "OK",
            "distance": { "value": 3200.0, "text": "2.0 mi" },
            "duration": { "value": 480.0, "text": "8 mins" }
        });

        let result = client.parse_element(origin, destination, &element);
        assert_eq!(result.status, DistanceStatus::Ok);
        assert!((result.distance_miles - 1.99).abs() < 0.01);
        assert_eq!(result.duration_minutes, Some(8.0));
        assert_eq!(result.duration_in_traffic_minutes, None);
    }

    #[test]
    fn test_parse_element_with_traffic() {
        let client = test_client();
        let origin = GeoPoint::new(33.7490, -84.3880);
        let destination = GeoPoint::new(33.7756, -84.3963);

        let element = json!({
            "status": "OK",
            "distance": { "value": 3200.0 },
            "duration": { "value": 480.0 },
            "duration_in_traffic": { "value": 660.0 }
        });

        let result = client.parse_element(origin, destination, &element);
        assert_eq!(result.duration_in_traffic_minutes, Some(11.0));
    }

    #[test]
    fn test_parse_element_not_found_falls_back() {
        let client = test_client();
        let origin = GeoPoint::new(33.7490, -84.3880);
        let destination = GeoPoint::new(33.7756, -84.3963);

        let element = json!({ "status": "ZERO_RESULTS" });

        let result = client.parse_element(origin, destination, &element);
        assert_eq!(result.status, DistanceStatus::Fallback);
        assert!(result.error.as_deref().unwrap().contains("ZERO_RESULTS"));
        // Fallback figures come from the great-circle estimate
        assert!(result.distance_miles > 0.0);
        assert!(result.duration_minutes.is_some());
    }

    #[test]
    fn test_fallback_duration_uses_assumed_speed() {
        let client = test_client();
        let origin = GeoPoint::new(0.0, 0.0);
        let destination = GeoPoint::new(0.0, 0.1303); // ~9 miles along the equator

        let result = client.fallback(origin, destination, "unreachable");
        let minutes = result.duration_minutes.unwrap();
        assert!((minutes - result.distance_miles * 2.0).abs() < 1e-9);
        assert_eq!(result.status, DistanceStatus::Fallback);
    }
}
