use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::models::{DistanceResult, DistanceStatus, GeoPoint, TrafficModel};

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// TTL for a successful traffic-aware result
pub const TRAFFIC_RESULT_TTL_SECS: u64 = 300;
/// TTL for a successful non-traffic result
pub const DRIVING_RESULT_TTL_SECS: u64 = 3600;
/// TTL for a fallback result; short, so failing calls are retried soon
/// but not hammered
pub const FALLBACK_RESULT_TTL_SECS: u64 = 900;

/// Pick the TTL for a result based on its status and query mode
pub fn ttl_for(result: &DistanceResult, use_traffic: bool) -> u64 {
    match result.status {
        DistanceStatus::Fallback => FALLBACK_RESULT_TTL_SECS,
        DistanceStatus::Ok if use_traffic => TRAFFIC_RESULT_TTL_SECS,
        DistanceStatus::Ok => DRIVING_RESULT_TTL_SECS,
    }
}

/// Cached value with its own expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedEntry {
    result: DistanceResult,
    expires_at: chrono::DateTime<chrono::Utc>,
}

/// Two-tier distance result cache
///
/// L1 is an in-process moka cache, L2 an optional Redis shared across
/// instances. Entries carry their own expiry because traffic-aware,
/// plain, and fallback results age out at different rates. Concurrent
/// writers of the same key are last-write-wins; staleness is bounded by
/// the entry TTL.
pub struct DistanceCache {
    l1: moka::future::Cache<String, Vec<u8>>,
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
}

impl DistanceCache {
    /// Create a cache backed by Redis, with an in-process L1 in front
    pub async fn with_redis(redis_url: &str, l1_size: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            l1: Self::build_l1(l1_size),
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
        })
    }

    /// Create a process-local cache with no L2
    pub fn in_memory(l1_size: u64) -> Self {
        Self {
            l1: Self::build_l1(l1_size),
            redis: None,
        }
    }

    fn build_l1(l1_size: u64) -> moka::future::Cache<String, Vec<u8>> {
        // Cache-wide bound at the longest TTL; per-entry expiry is checked
        // on read
        moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(DRIVING_RESULT_TTL_SECS))
            .build()
    }

    /// Get a live entry (L1 first, then L2); expired entries count as misses
    pub async fn get(&self, key: &str) -> Result<DistanceResult, CacheError> {
        if let Some(bytes) = self.l1.get(key).await {
            let entry: CachedEntry = serde_json::from_slice(&bytes)?;
            if entry.expires_at > chrono::Utc::now() {
                tracing::trace!("L1 cache hit: {}", key);
                return Ok(entry.result);
            }
            self.l1.invalidate(key).await;
        }

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            let value: Option<String> = redis::cmd("GET")
                .arg(key)
                .query_async(&mut *conn)
                .await?;
            drop(conn);

            if let Some(json) = value {
                let entry: CachedEntry = serde_json::from_str(&json)?;
                if entry.expires_at > chrono::Utc::now() {
                    tracing::trace!("L2 cache hit: {}", key);
                    self.l1.insert(key.to_string(), json.into_bytes()).await;
                    return Ok(entry.result);
                }
            }
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Store a result with an explicit TTL in both tiers
    pub async fn set(
        &self,
        key: &str,
        result: &DistanceResult,
        ttl_secs: u64,
    ) -> Result<(), CacheError> {
        let entry = CachedEntry {
            result: result.clone(),
            expires_at: chrono::Utc::now() + chrono::Duration::seconds(ttl_secs as i64),
        };
        let json = serde_json::to_string(&entry)?;

        self.l1.insert(key.to_string(), json.as_bytes().to_vec()).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {} (ttl {}s)", key, ttl_secs);
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Key for one origin/destination pair, coordinates rounded to four
    /// decimals so nearby lookups share entries
    pub fn distance(
        origin: GeoPoint,
        destination: GeoPoint,
        use_traffic: bool,
        traffic_model: TrafficModel,
    ) -> String {
        format!(
            "driving:{:.4},{:.4}->{:.4},{:.4}:{}:{}",
            origin.latitude,
            origin.longitude,
            destination.latitude,
            destination.longitude,
            use_traffic,
            traffic_model.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: DistanceStatus) -> DistanceResult {
        DistanceResult {
            distance_miles: 1.99,
            duration_minutes: Some(8.0),
            duration_in_traffic_minutes: None,
            status,
            error: None,
        }
    }

    #[test]
    fn test_cache_key_format() {
        let origin = GeoPoint::new(33.7490, -84.3880);
        let destination = GeoPoint::new(33.77561, -84.39634);

        let key = CacheKey::distance(origin, destination, true, TrafficModel::BestGuess);
        assert_eq!(key, "driving:33.7490,-84.3880->33.7756,-84.3963:true:best_guess");
    }

    #[test]
    fn test_ttl_selection() {
        assert_eq!(ttl_for(&result(DistanceStatus::Ok), true), 300);
        assert_eq!(ttl_for(&result(DistanceStatus::Ok), false), 3600);
        assert_eq!(ttl_for(&result(DistanceStatus::Fallback), true), 900);
        assert_eq!(ttl_for(&result(DistanceStatus::Fallback), false), 900);
    }

    #[tokio::test]
    async fn test_in_memory_set_get() {
        let cache = DistanceCache::in_memory(100);
        let key = "driving:1.0000,2.0000->3.0000,4.0000:false:best_guess";

        assert!(cache.get(key).await.is_err());

        cache.set(key, &result(DistanceStatus::Ok), 60).await.unwrap();
        let hit = cache.get(key).await.unwrap();
        assert_eq!(hit.distance_miles, 1.99);
        assert_eq!(hit.status, DistanceStatus::Ok);
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = DistanceCache::in_memory(100);
        let key = "driving:1.0000,2.0000->3.0000,4.0000:false:best_guess";

        cache.set(key, &result(DistanceStatus::Ok), 0).await.unwrap();
        assert!(cache.get(key).await.is_err());
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_set_get() {
        let cache = DistanceCache::with_redis("redis://127.0.0.1:6379", 100)
            .await
            .expect("Failed to create cache");

        let key = "driving:5.0000,6.0000->7.0000,8.0000:false:best_guess";
        cache.set(key, &result(DistanceStatus::Ok), 60).await.unwrap();
        assert!(cache.get(key).await.is_ok());
    }
}
