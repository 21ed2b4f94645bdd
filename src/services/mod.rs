// Service exports
pub mod cache;
pub mod notifications;
pub mod postgres;
pub mod radius;
pub mod routing;

pub use cache::{CacheError, CacheKey, DistanceCache};
pub use notifications::NotificationService;
pub use postgres::{PostgresClient, PostgresError};
pub use radius::RadiusSearch;
pub use routing::{RoutingClient, MAX_BATCH_SIZE};
