use std::sync::Arc;

use crate::core::engine::fresh_outcomes;
use crate::models::CandidateProfile;
use crate::services::postgres::{PostgresClient, PostgresError};

/// Standing-match notification trigger
///
/// The explicit event-handler seam for the write path: whenever a
/// candidate profile commit lands, `on_candidate_committed` evaluates the
/// notify-enabled filters and records fresh matches. Pure evaluation
/// happens in `core::engine`; this service only loads state and persists
/// outcomes, so repeated triggers are idempotent.
pub struct NotificationService {
    db: Arc<PostgresClient>,
}

impl NotificationService {
    pub fn new(db: Arc<PostgresClient>) -> Self {
        Self { db }
    }

    /// Evaluate every notify-enabled filter against a freshly committed
    /// profile; returns how many notifications were created
    pub async fn on_candidate_committed(
        &self,
        profile: &CandidateProfile,
    ) -> Result<usize, PostgresError> {
        let filters = self.db.notify_filters().await?;
        if filters.is_empty() {
            return Ok(0);
        }

        let existing = self.db.existing_notification_keys(profile.user_id).await?;
        let outcomes = fresh_outcomes(&filters, profile, &existing);

        let mut created = 0;
        for outcome in &outcomes {
            // The insert re-checks the triple, so a concurrent trigger
            // racing past the snapshot above still cannot duplicate
            if self.db.insert_notification(outcome).await? {
                created += 1;
            }
        }

        if created > 0 {
            tracing::info!(
                "Created {} filter notifications for candidate {}",
                created,
                profile.user_id
            );
        }

        Ok(created)
    }
}
