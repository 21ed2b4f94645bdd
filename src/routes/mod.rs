// Route exports
pub mod candidates;
pub mod filters;
pub mod jobs;

use actix_web::web;
use std::sync::Arc;

use crate::models::TrafficModel;
use crate::services::{NotificationService, PostgresClient, RadiusSearch};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub radius: Arc<RadiusSearch>,
    pub notifications: Arc<NotificationService>,
    pub traffic_model: TrafficModel,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(jobs::configure)
            .configure(candidates::configure)
            .configure(filters::configure),
    );
}
