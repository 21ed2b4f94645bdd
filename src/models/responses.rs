use serde::{Deserialize, Serialize};

use crate::models::domain::{CandidateProfile, DistanceResult, FilterNotification, JobPosting, SavedFilter};

/// A job posting that survived the radius filter, with its travel figures
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub job: JobPosting,
    pub distance: DistanceResult,
}

/// Response for the radius job search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchResponse {
    pub matches: Vec<JobMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the candidate search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSearchResponse {
    pub candidates: Vec<CandidateProfile>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Response after saving a filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFilterResponse {
    pub success: bool,
    pub filter: SavedFilter,
}

/// Response listing a recruiter's saved filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterListResponse {
    pub filters: Vec<SavedFilter>,
}

/// Response listing a recruiter's notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<FilterNotification>,
    #[serde(rename = "unreadCount")]
    pub unread_count: i64,
}

/// Response after marking notifications read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkReadResponse {
    pub success: bool,
    pub updated: u64,
}

/// Response after a candidate profile write commits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileCommittedResponse {
    pub success: bool,
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "notificationsCreated")]
    pub notifications_created: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
