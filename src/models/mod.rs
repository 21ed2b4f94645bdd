// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateProfile, DistanceResult, DistanceStatus, FilterNotification, GeoPoint, JobPosting,
    PayType, Privacy, ProfileKind, RadiusQuery, SavedFilter, TrafficModel,
};
pub use requests::{CandidateSearchRequest, JobSearchRequest, SaveFilterRequest, UpsertProfileRequest};
pub use responses::{
    CandidateSearchResponse, ErrorResponse, FilterListResponse, HealthResponse, JobMatch,
    JobSearchResponse, MarkReadResponse, NotificationListResponse, ProfileCommittedResponse,
    SaveFilterResponse,
};
