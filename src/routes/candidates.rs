use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::matches_filter;
use crate::models::{
    CandidateProfile, CandidateSearchRequest, CandidateSearchResponse, ErrorResponse,
    ProfileCommittedResponse, SavedFilter, UpsertProfileRequest,
};
use crate::routes::filters::require_recruiter;
use crate::routes::AppState;

/// Configure candidate routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/candidates/search", web::post().to(search_candidates))
        .route("/candidates/profile", web::post().to(upsert_profile));
}

/// On-demand candidate search
///
/// POST /api/v1/candidates/search
///
/// Applies the same predicate as the standing-match notifications, over
/// recruiter-visible profiles only.
async fn search_candidates(
    state: web::Data<AppState>,
    req: web::Json<CandidateSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if let Err(response) = require_recruiter(&state, req.recruiter_id).await {
        return response;
    }

    // Transient filter carrying the query clauses; never persisted
    let filter = SavedFilter {
        id: 0,
        recruiter_id: req.recruiter_id,
        skill: req.skill.trim().to_string(),
        location: req.location.trim().to_string(),
        project: req.project.trim().to_string(),
        radius_miles: None,
        notify_on_match: false,
        created_at: chrono::Utc::now(),
    };

    let candidates = match state.postgres.visible_candidates().await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to load candidate profiles: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load candidate profiles".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let matched: Vec<CandidateProfile> = candidates
        .into_iter()
        .filter(|candidate| matches_filter(&filter, candidate))
        .collect();

    tracing::debug!(
        "Candidate search for recruiter {} matched {} profiles",
        req.recruiter_id,
        matched.len()
    );

    let total_results = matched.len();
    HttpResponse::Ok().json(CandidateSearchResponse {
        candidates: matched,
        total_results,
    })
}

/// Create or update a candidate profile
///
/// POST /api/v1/candidates/profile
///
/// The standing-match trigger runs after the write commits; a trigger
/// failure is logged but never fails the committed write.
async fn upsert_profile(
    state: web::Data<AppState>,
    req: web::Json<UpsertProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let profile = match state.postgres.upsert_candidate_profile(&req).await {
        Ok(profile) => profile,
        Err(e) => {
            tracing::error!("Failed to upsert profile for user {}: {}", req.user_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let notifications_created = match state.notifications.on_candidate_committed(&profile).await {
        Ok(created) => created,
        Err(e) => {
            tracing::warn!(
                "Profile committed but filter-match trigger failed for user {}: {}",
                profile.user_id,
                e
            );
            0
        }
    };

    HttpResponse::Ok().json(ProfileCommittedResponse {
        success: true,
        event_id: uuid::Uuid::new_v4().to_string(),
        notifications_created,
    })
}
