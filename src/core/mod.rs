// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod filters;
pub mod radius;

pub use distance::{estimate_drive_minutes, great_circle_distance};
pub use engine::{evaluate_filters, fresh_outcomes, MatchOutcome, NotificationKey};
pub use filters::{composed_location, matches_filter};
pub use radius::{prefilter, rank, GeoTagged, RadiusMatch, PREFILTER_FACTOR};
