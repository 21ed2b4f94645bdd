use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ErrorResponse, GeoPoint, HealthResponse, JobMatch, JobSearchRequest, JobSearchResponse,
    RadiusQuery,
};
use crate::routes::AppState;

/// Configure job search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/jobs/search", web::post().to(search_jobs));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Radius job search endpoint
///
/// POST /api/v1/jobs/search
///
/// Request body:
/// ```json
/// {
///   "latitude": 33.7490,
///   "longitude": -84.3880,
///   "radiusMiles": 5.0,
///   "useTraffic": false
/// }
/// ```
async fn search_jobs(
    state: web::Data<AppState>,
    req: web::Json<JobSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = RadiusQuery {
        origin: GeoPoint::new(req.latitude, req.longitude),
        radius_miles: req.radius_miles,
        use_traffic: req.use_traffic,
        traffic_model: state.traffic_model,
    };

    tracing::info!(
        "Radius job search at ({}, {}) within {} miles (traffic: {})",
        req.latitude,
        req.longitude,
        req.radius_miles,
        req.use_traffic
    );

    let jobs = match state.postgres.geocoded_jobs().await {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!("Failed to load job postings: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to load job postings".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let total_candidates = jobs.len();
    let matches = state.radius.filter_by_radius(jobs, &query).await;

    tracing::info!(
        "Radius search kept {} of {} geocoded jobs",
        matches.len(),
        total_candidates
    );

    HttpResponse::Ok().json(JobSearchResponse {
        matches: matches
            .into_iter()
            .map(|m| JobMatch {
                job: m.record,
                distance: m.distance,
            })
            .collect(),
        total_candidates,
    })
}
