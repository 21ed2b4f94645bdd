use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::Privacy;

/// Request for a radius job search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct JobSearchRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.1, max = 500.0))]
    #[serde(alias = "radius_miles", rename = "radiusMiles")]
    pub radius_miles: f64,
    #[serde(default)]
    #[serde(alias = "use_traffic", rename = "useTraffic")]
    pub use_traffic: bool,
}

/// Request for an on-demand candidate search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateSearchRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "recruiter_id", rename = "recruiterId")]
    pub recruiter_id: i64,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub project: String,
}

/// Request to save a candidate filter
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveFilterRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "recruiter_id", rename = "recruiterId")]
    pub recruiter_id: i64,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub project: String,
    #[validate(range(min = 0.1, max = 500.0))]
    #[serde(default, alias = "radius_miles", rename = "radiusMiles")]
    pub radius_miles: Option<f64>,
    #[serde(default = "default_notify", alias = "notify_on_match", rename = "notifyOnMatch")]
    pub notify_on_match: bool,
}

fn default_notify() -> bool {
    true
}

impl SaveFilterRequest {
    /// True when every clause is absent; such filters cannot be saved
    pub fn is_empty(&self) -> bool {
        self.skill.trim().is_empty()
            && self.location.trim().is_empty()
            && self.project.trim().is_empty()
            && self.radius_miles.is_none()
    }
}

/// Request to create or update a candidate profile
///
/// This is the write path that drives the filter-notification trigger.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertProfileRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: i64,
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "state_region", rename = "stateRegion")]
    pub state_region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub privacy: Privacy,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
}
