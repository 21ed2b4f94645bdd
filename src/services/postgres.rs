use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use crate::core::engine::{MatchOutcome, NotificationKey};
use crate::models::requests::{SaveFilterRequest, UpsertProfileRequest};
use crate::models::{
    CandidateProfile, FilterNotification, JobPosting, PayType, Privacy, ProfileKind, SavedFilter,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// PostgreSQL client for profiles, jobs, saved filters and notifications
///
/// Owns all SQL in the service. The duplicate-notification guard lives
/// here as a UNIQUE constraint on (recruiter, filter, candidate) with
/// insert-if-absent semantics.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    /// Resolve a user id to its profile kind
    pub async fn profile_kind(&self, user_id: i64) -> Result<Option<ProfileKind>, PostgresError> {
        let row = sqlx::query("SELECT kind FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.and_then(|r| ProfileKind::from_str(r.get::<String, _>("kind").as_str())))
    }

    /// Create or update a candidate profile
    ///
    /// Both the account row and the candidate detail row are written in one
    /// transaction so the notification trigger only ever sees committed
    /// state.
    pub async fn upsert_candidate_profile(
        &self,
        req: &UpsertProfileRequest,
    ) -> Result<CandidateProfile, PostgresError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, username, kind)
            VALUES ($1, $2, 'job_seeker')
            ON CONFLICT (user_id)
            DO UPDATE SET username = EXCLUDED.username
            "#,
        )
        .bind(req.user_id)
        .bind(&req.username)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO candidate_profiles
                (user_id, headline, skills, city, state_region, country,
                 location, projects, privacy, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (user_id)
            DO UPDATE SET
                headline = EXCLUDED.headline,
                skills = EXCLUDED.skills,
                city = EXCLUDED.city,
                state_region = EXCLUDED.state_region,
                country = EXCLUDED.country,
                location = EXCLUDED.location,
                projects = EXCLUDED.projects,
                privacy = EXCLUDED.privacy,
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude
            "#,
        )
        .bind(req.user_id)
        .bind(&req.headline)
        .bind(&req.skills)
        .bind(&req.city)
        .bind(&req.state_region)
        .bind(&req.country)
        .bind(&req.location)
        .bind(&req.projects)
        .bind(req.privacy.as_str())
        .bind(req.latitude)
        .bind(req.longitude)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!("Upserted candidate profile for user {}", req.user_id);

        Ok(CandidateProfile {
            user_id: req.user_id,
            username: req.username.clone(),
            headline: req.headline.clone(),
            skills: req.skills.clone(),
            city: req.city.clone(),
            state_region: req.state_region.clone(),
            country: req.country.clone(),
            location: req.location.clone(),
            projects: req.projects.clone(),
            privacy: req.privacy,
            latitude: req.latitude,
            longitude: req.longitude,
        })
    }

    /// All candidate profiles visible to recruiters
    pub async fn visible_candidates(&self) -> Result<Vec<CandidateProfile>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT c.user_id, p.username, c.headline, c.skills, c.city,
                   c.state_region, c.country, c.location, c.projects,
                   c.privacy, c.latitude, c.longitude
            FROM candidate_profiles c
            JOIN profiles p ON p.user_id = c.user_id
            WHERE c.privacy IN ('public', 'employers_only')
            ORDER BY p.username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(candidate_from_row).collect())
    }

    /// All job postings with coordinates, for radius search
    pub async fn geocoded_jobs(&self) -> Result<Vec<JobPosting>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, company, location, latitude, longitude,
                   pay_min, pay_max, pay_type
            FROM jobs
            WHERE latitude IS NOT NULL AND longitude IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(job_from_row).collect())
    }

    /// Persist a new saved filter
    ///
    /// Empty filters are rejected here as well as at the request boundary;
    /// the table carries a matching CHECK constraint.
    pub async fn create_filter(
        &self,
        req: &SaveFilterRequest,
    ) -> Result<SavedFilter, PostgresError> {
        if req.is_empty() {
            return Err(PostgresError::InvalidInput(
                "Cannot save an empty filter".to_string(),
            ));
        }

        let row = sqlx::query(
            r#"
            INSERT INTO saved_filters
                (recruiter_id, skill, location, project, radius_miles, notify_on_match)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at
            "#,
        )
        .bind(req.recruiter_id)
        .bind(req.skill.trim())
        .bind(req.location.trim())
        .bind(req.project.trim())
        .bind(req.radius_miles)
        .bind(req.notify_on_match)
        .fetch_one(&self.pool)
        .await?;

        Ok(SavedFilter {
            id: row.get("id"),
            recruiter_id: req.recruiter_id,
            skill: req.skill.trim().to_string(),
            location: req.location.trim().to_string(),
            project: req.project.trim().to_string(),
            radius_miles: req.radius_miles,
            notify_on_match: req.notify_on_match,
            created_at: row.get("created_at"),
        })
    }

    /// A recruiter's saved filters, newest first
    pub async fn list_filters(&self, recruiter_id: i64) -> Result<Vec<SavedFilter>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recruiter_id, skill, location, project, radius_miles,
                   notify_on_match, created_at
            FROM saved_filters
            WHERE recruiter_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(filter_from_row).collect())
    }

    /// Delete a filter owned by the recruiter
    pub async fn delete_filter(
        &self,
        recruiter_id: i64,
        filter_id: i64,
    ) -> Result<bool, PostgresError> {
        let result = sqlx::query(
            "DELETE FROM saved_filters WHERE id = $1 AND recruiter_id = $2",
        )
        .bind(filter_id)
        .bind(recruiter_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All filters with match notifications enabled, across recruiters
    pub async fn notify_filters(&self) -> Result<Vec<SavedFilter>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recruiter_id, skill, location, project, radius_miles,
                   notify_on_match, created_at
            FROM saved_filters
            WHERE notify_on_match = TRUE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(filter_from_row).collect())
    }

    /// Notification keys already recorded for a candidate
    pub async fn existing_notification_keys(
        &self,
        candidate_id: i64,
    ) -> Result<HashSet<NotificationKey>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT recruiter_id, filter_id, candidate_id
            FROM filter_notifications
            WHERE candidate_id = $1
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                (
                    row.get::<i64, _>("recruiter_id"),
                    row.get::<i64, _>("filter_id"),
                    row.get::<i64, _>("candidate_id"),
                )
            })
            .collect())
    }

    /// Insert a notification unless its (recruiter, filter, candidate)
    /// triple already exists
    ///
    /// The UNIQUE constraint makes concurrent triggers race-safe; returns
    /// whether a row was actually created.
    pub async fn insert_notification(
        &self,
        outcome: &MatchOutcome,
    ) -> Result<bool, PostgresError> {
        let result = sqlx::query(
            r#"
            INSERT INTO filter_notifications
                (recruiter_id, filter_id, candidate_id, message)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (recruiter_id, filter_id, candidate_id) DO NOTHING
            "#,
        )
        .bind(outcome.recruiter_id)
        .bind(outcome.filter_id)
        .bind(outcome.candidate_id)
        .bind(&outcome.message)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// A recruiter's notifications, 20 newest
    pub async fn list_notifications(
        &self,
        recruiter_id: i64,
    ) -> Result<Vec<FilterNotification>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT id, recruiter_id, filter_id, candidate_id, message,
                   is_read, created_at
            FROM filter_notifications
            WHERE recruiter_id = $1
            ORDER BY created_at DESC
            LIMIT 20
            "#,
        )
        .bind(recruiter_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(notification_from_row).collect())
    }

    /// Count of unread notifications for a recruiter
    pub async fn unread_count(&self, recruiter_id: i64) -> Result<i64, PostgresError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS unread
            FROM filter_notifications
            WHERE recruiter_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(recruiter_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("unread"))
    }

    /// Mark one notification read; scoped to the requesting recruiter
    pub async fn mark_read(
        &self,
        recruiter_id: i64,
        notification_id: i64,
    ) -> Result<bool, PostgresError> {
        let result = sqlx::query(
            r#"
            UPDATE filter_notifications
            SET is_read = TRUE
            WHERE id = $1 AND recruiter_id = $2
            "#,
        )
        .bind(notification_id)
        .bind(recruiter_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark all of a recruiter's notifications read
    pub async fn mark_all_read(&self, recruiter_id: i64) -> Result<u64, PostgresError> {
        let result = sqlx::query(
            r#"
            UPDATE filter_notifications
            SET is_read = TRUE
            WHERE recruiter_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(recruiter_id)
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            "Marked {} notifications read for recruiter {}",
            result.rows_affected(),
            recruiter_id
        );

        Ok(result.rows_affected())
    }
}

fn candidate_from_row(row: &sqlx::postgres::PgRow) -> CandidateProfile {
    CandidateProfile {
        user_id: row.get("user_id"),
        username: row.get("username"),
        headline: row.get("headline"),
        skills: row.get("skills"),
        city: row.get("city"),
        state_region: row.get("state_region"),
        country: row.get("country"),
        location: row.get("location"),
        projects: row.get("projects"),
        privacy: Privacy::from_str(row.get::<String, _>("privacy").as_str()).unwrap_or_default(),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
    }
}

fn job_from_row(row: &sqlx::postgres::PgRow) -> JobPosting {
    JobPosting {
        id: row.get("id"),
        name: row.get("name"),
        company: row.get("company"),
        location: row.get("location"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        pay_min: row.get("pay_min"),
        pay_max: row.get("pay_max"),
        pay_type: PayType::from_str(row.get::<String, _>("pay_type").as_str()).unwrap_or_default(),
    }
}

fn filter_from_row(row: &sqlx::postgres::PgRow) -> SavedFilter {
    SavedFilter {
        id: row.get("id"),
        recruiter_id: row.get("recruiter_id"),
        skill: row.get("skill"),
        location: row.get("location"),
        project: row.get("project"),
        radius_miles: row.get("radius_miles"),
        notify_on_match: row.get("notify_on_match"),
        created_at: row.get("created_at"),
    }
}

fn notification_from_row(row: &sqlx::postgres::PgRow) -> FilterNotification {
    FilterNotification {
        id: row.get("id"),
        recruiter_id: row.get("recruiter_id"),
        filter_id: row.get("filter_id"),
        candidate_id: row.get("candidate_id"),
        message: row.get("message"),
        is_read: row.get("is_read"),
        created_at: row.get("created_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::requests::SaveFilterRequest;

    fn empty_request() -> SaveFilterRequest {
        SaveFilterRequest {
            recruiter_id: 1,
            skill: String::new(),
            location: String::new(),
            project: String::new(),
            radius_miles: None,
            notify_on_match: true,
        }
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL"]
    async fn test_empty_filter_rejected() {
        let client = PostgresClient::new("postgres://localhost/buzzedin_test", 5, 1)
            .await
            .expect("Failed to connect");

        let err = client.create_filter(&empty_request()).await.unwrap_err();
        assert!(matches!(err, PostgresError::InvalidInput(_)));
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL"]
    async fn test_duplicate_notification_suppressed() {
        let client = PostgresClient::new("postgres://localhost/buzzedin_test", 5, 1)
            .await
            .expect("Failed to connect");

        let outcome = MatchOutcome {
            recruiter_id: 1,
            filter_id: 1,
            candidate_id: 2,
            message: "New candidate matches your filter: gburdell".to_string(),
        };

        let first = client.insert_notification(&outcome).await.unwrap();
        let second = client.insert_notification(&outcome).await.unwrap();
        assert!(first);
        assert!(!second);
    }
}
