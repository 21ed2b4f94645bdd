use serde::{Deserialize, Serialize};

/// Geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Traffic model selector forwarded to the routing provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficModel {
    #[default]
    BestGuess,
    Pessimistic,
    Optimistic,
}

impl TrafficModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficModel::BestGuess => "best_guess",
            TrafficModel::Pessimistic => "pessimistic",
            TrafficModel::Optimistic => "optimistic",
        }
    }
}

/// Outcome of a road distance lookup
///
/// `Fallback` means the routing provider could not be used and the figures
/// are great-circle estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DistanceStatus {
    Ok,
    Fallback,
}

/// Road distance and travel time for one origin/destination pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResult {
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: Option<f64>,
    #[serde(rename = "durationInTrafficMinutes", default)]
    pub duration_in_traffic_minutes: Option<f64>,
    pub status: DistanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Radius search parameters
#[derive(Debug, Clone, Copy)]
pub struct RadiusQuery {
    pub origin: GeoPoint,
    pub radius_miles: f64,
    pub use_traffic: bool,
    pub traffic_model: TrafficModel,
}

/// Candidate profile visibility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Privacy {
    #[default]
    Public,
    EmployersOnly,
    Private,
}

impl Privacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::EmployersOnly => "employers_only",
            Privacy::Private => "private",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "public" => Some(Privacy::Public),
            "employers_only" => Some(Privacy::EmployersOnly),
            "private" => Some(Privacy::Private),
            _ => None,
        }
    }

    /// Whether recruiters may see the profile in candidate search
    pub fn visible_to_recruiters(&self) -> bool {
        matches!(self, Privacy::Public | Privacy::EmployersOnly)
    }
}

/// Profile kind, resolved once at the data-access boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    JobSeeker,
    Recruiter,
}

impl ProfileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileKind::JobSeeker => "job_seeker",
            ProfileKind::Recruiter => "recruiter",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "job_seeker" => Some(ProfileKind::JobSeeker),
            "recruiter" => Some(ProfileKind::Recruiter),
            _ => None,
        }
    }
}

/// Candidate profile with skills and location data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(rename = "stateRegion", default)]
    pub state_region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub privacy: Privacy,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl CandidateProfile {
    /// Coordinates, if the profile has location data
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

/// Pay period for a job posting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayType {
    #[default]
    Annual,
    Hourly,
    Monthly,
}

impl PayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayType::Annual => "annual",
            PayType::Hourly => "hourly",
            PayType::Monthly => "monthly",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "annual" => Some(PayType::Annual),
            "hourly" => Some(PayType::Hourly),
            "monthly" => Some(PayType::Monthly),
            _ => None,
        }
    }
}

/// Job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    pub name: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "payMin")]
    pub pay_min: f64,
    #[serde(rename = "payMax")]
    pub pay_max: f64,
    #[serde(rename = "payType", default)]
    pub pay_type: PayType,
}

impl JobPosting {
    /// Coordinates, if the posting has been geocoded
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }
}

/// Recruiter-authored persistent candidate query
///
/// Empty strings mean the clause is absent. A filter with every clause
/// absent cannot be persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedFilter {
    pub id: i64,
    #[serde(rename = "recruiterId")]
    pub recruiter_id: i64,
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub project: String,
    #[serde(rename = "radiusMiles", default)]
    pub radius_miles: Option<f64>,
    #[serde(rename = "notifyOnMatch")]
    pub notify_on_match: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl SavedFilter {
    pub fn is_empty(&self) -> bool {
        self.skill.is_empty()
            && self.location.is_empty()
            && self.project.is_empty()
            && self.radius_miles.is_none()
    }
}

/// Standing-match notification for a recruiter
///
/// At most one exists per (recruiter, filter, candidate). Only `is_read`
/// ever changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterNotification {
    pub id: i64,
    #[serde(rename = "recruiterId")]
    pub recruiter_id: i64,
    #[serde(rename = "filterId")]
    pub filter_id: i64,
    #[serde(rename = "candidateId")]
    pub candidate_id: i64,
    pub message: String,
    #[serde(rename = "isRead")]
    pub is_read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
