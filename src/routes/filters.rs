use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use validator::Validate;

use crate::models::{
    ErrorResponse, FilterListResponse, MarkReadResponse, NotificationListResponse, ProfileKind,
    SaveFilterRequest, SaveFilterResponse,
};
use crate::routes::AppState;

/// Configure saved-filter and notification routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/filters", web::post().to(save_filter))
        .route("/filters", web::get().to(list_filters))
        .route("/filters/{id}", web::delete().to(delete_filter))
        .route("/notifications", web::get().to(list_notifications))
        .route("/notifications/{id}/read", web::post().to(mark_notification_read))
        .route("/notifications/read-all", web::post().to(mark_all_notifications_read));
}

/// Resolve the acting user and require a recruiter profile
///
/// Authentication is external; callers supply the user id and this is
/// where it is resolved to a profile kind, once.
pub(crate) async fn require_recruiter(
    state: &AppState,
    user_id: i64,
) -> Result<(), HttpResponse> {
    match state.postgres.profile_kind(user_id).await {
        Ok(Some(ProfileKind::Recruiter)) => Ok(()),
        Ok(_) => Err(HttpResponse::Forbidden().json(ErrorResponse {
            error: "Recruiter profile required".to_string(),
            message: format!("User {} is not a recruiter", user_id),
            status_code: 403,
        })),
        Err(e) => {
            tracing::error!("Failed to resolve profile kind for {}: {}", user_id, e);
            Err(HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to resolve profile".to_string(),
                message: e.to_string(),
                status_code: 500,
            }))
        }
    }
}

/// Extract a required `recruiterId` query parameter
fn recruiter_id_param(query: &HashMap<String, String>) -> Result<i64, HttpResponse> {
    query
        .get("recruiterId")
        .and_then(|id| id.parse::<i64>().ok())
        .ok_or_else(|| {
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Missing recruiterId parameter".to_string(),
                message: "recruiterId query parameter is required".to_string(),
                status_code: 400,
            })
        })
}

/// Save a candidate filter
///
/// POST /api/v1/filters
///
/// Request body:
/// ```json
/// {
///   "recruiterId": 1,
///   "skill": "Python",
///   "location": "Atlanta",
///   "project": "",
///   "radiusMiles": 25.0,
///   "notifyOnMatch": true
/// }
/// ```
async fn save_filter(
    state: web::Data<AppState>,
    req: web::Json<SaveFilterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if req.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Empty filter".to_string(),
            message: "Cannot save an empty filter".to_string(),
            status_code: 400,
        });
    }

    if let Err(response) = require_recruiter(&state, req.recruiter_id).await {
        return response;
    }

    match state.postgres.create_filter(&req).await {
        Ok(filter) => {
            tracing::info!("Recruiter {} saved filter {}", filter.recruiter_id, filter.id);
            HttpResponse::Ok().json(SaveFilterResponse {
                success: true,
                filter,
            })
        }
        Err(e) => {
            tracing::error!("Failed to save filter for {}: {}", req.recruiter_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to save filter".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List the recruiter's saved filters
///
/// GET /api/v1/filters?recruiterId={id}
async fn list_filters(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let recruiter_id = match recruiter_id_param(&query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    if let Err(response) = require_recruiter(&state, recruiter_id).await {
        return response;
    }

    match state.postgres.list_filters(recruiter_id).await {
        Ok(filters) => HttpResponse::Ok().json(FilterListResponse { filters }),
        Err(e) => {
            tracing::error!("Failed to list filters for {}: {}", recruiter_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list filters".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Delete a saved filter; cascades to its notifications
///
/// DELETE /api/v1/filters/{id}?recruiterId={id}
async fn delete_filter(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let filter_id = path.into_inner();
    let recruiter_id = match recruiter_id_param(&query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.postgres.delete_filter(recruiter_id, filter_id).await {
        Ok(true) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: format!("Filter {} not found", filter_id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to delete filter {}: {}", filter_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to delete filter".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// List the recruiter's notifications with the unread count
///
/// GET /api/v1/notifications?recruiterId={id}
async fn list_notifications(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let recruiter_id = match recruiter_id_param(&query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let notifications = match state.postgres.list_notifications(recruiter_id).await {
        Ok(notifications) => notifications,
        Err(e) => {
            tracing::error!("Failed to list notifications for {}: {}", recruiter_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to list notifications".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    match state.postgres.unread_count(recruiter_id).await {
        Ok(unread_count) => HttpResponse::Ok().json(NotificationListResponse {
            notifications,
            unread_count,
        }),
        Err(e) => {
            tracing::error!("Failed to count notifications for {}: {}", recruiter_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to count notifications".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Mark one notification read
///
/// POST /api/v1/notifications/{id}/read?recruiterId={id}
async fn mark_notification_read(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let notification_id = path.into_inner();
    let recruiter_id = match recruiter_id_param(&query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.postgres.mark_read(recruiter_id, notification_id).await {
        Ok(true) => HttpResponse::Ok().json(MarkReadResponse {
            success: true,
            updated: 1,
        }),
        Ok(false) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Not found".to_string(),
            message: format!("Notification {} not found", notification_id),
            status_code: 404,
        }),
        Err(e) => {
            tracing::error!("Failed to mark notification {} read: {}", notification_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to mark notification read".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Mark all of the recruiter's notifications read
///
/// POST /api/v1/notifications/read-all?recruiterId={id}
async fn mark_all_notifications_read(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let recruiter_id = match recruiter_id_param(&query) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.postgres.mark_all_read(recruiter_id).await {
        Ok(updated) => HttpResponse::Ok().json(MarkReadResponse {
            success: true,
            updated,
        }),
        Err(e) => {
            tracing::error!("Failed to mark notifications read for {}: {}", recruiter_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to mark notifications read".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
