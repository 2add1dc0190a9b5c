//! Donor match repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::{DonorMatchDetailEntity, DonorMatchEntity};

const MATCH_COLUMNS: &str = "id, request_id, donor_id, status, notified_at";

const DETAIL_SELECT: &str = r#"
    SELECT m.id, m.request_id, m.donor_id, m.status, m.notified_at,
           d.name AS donor_name, d.email AS donor_email,
           r.blood_type AS request_blood_type,
           r.units_needed AS request_units_needed,
           r.urgency_level AS request_urgency_level,
           r.status AS request_status
    FROM donor_matches m
    LEFT JOIN donors d ON d.id = m.donor_id
    LEFT JOIN blood_requests r ON r.id = m.request_id
"#;

/// Repository for donor-match database operations.
#[derive(Clone)]
pub struct DonorMatchRepository {
    pool: PgPool,
}

impl DonorMatchRepository {
    /// Creates a new DonorMatchRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all matches with donor and request summaries.
    pub async fn list_detailed(&self) -> Result<Vec<DonorMatchDetailEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchDetailEntity>(&format!("{DETAIL_SELECT} ORDER BY m.id"))
            .fetch_all(&self.pool)
            .await
    }

    /// Find a match by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<DonorMatchEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchEntity>(&format!(
            "SELECT {MATCH_COLUMNS} FROM donor_matches WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a match by id with donor and request summaries.
    pub async fn find_detail_by_id(
        &self,
        id: i64,
    ) -> Result<Option<DonorMatchDetailEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchDetailEntity>(&format!("{DETAIL_SELECT} WHERE m.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find the match for a (request, donor) pair.
    pub async fn find_by_pair(
        &self,
        request_id: i64,
        donor_id: i64,
    ) -> Result<Option<DonorMatchEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchEntity>(&format!(
            "SELECT {MATCH_COLUMNS} FROM donor_matches WHERE request_id = $1 AND donor_id = $2"
        ))
        .bind(request_id)
        .bind(donor_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a match for a (request, donor) pair.
    ///
    /// Returns `None` when the pair is already matched: the unique
    /// constraint resolves the check-then-insert race and the caller treats
    /// the conflict as an idempotent "already matched" outcome.
    pub async fn create(
        &self,
        request_id: i64,
        donor_id: i64,
        status: &str,
    ) -> Result<Option<DonorMatchEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchEntity>(&format!(
            r#"
            INSERT INTO donor_matches (request_id, donor_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT (request_id, donor_id) DO NOTHING
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(donor_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    /// Update a match's status and/or notified_at timestamp.
    pub async fn update(
        &self,
        id: i64,
        status: Option<&str>,
        notified_at: Option<DateTime<Utc>>,
    ) -> Result<Option<DonorMatchEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchEntity>(&format!(
            r#"
            UPDATE donor_matches
            SET status = COALESCE($2, status),
                notified_at = COALESCE($3, notified_at)
            WHERE id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .bind(notified_at)
        .fetch_optional(&self.pool)
        .await
    }

    /// Record a successful notification: status Notified plus timestamp.
    pub async fn mark_notified(
        &self,
        id: i64,
        notified_at: DateTime<Utc>,
    ) -> Result<Option<DonorMatchEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchEntity>(&format!(
            r#"
            UPDATE donor_matches
            SET status = 'Notified', notified_at = $2
            WHERE id = $1
            RETURNING {MATCH_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(notified_at)
        .fetch_optional(&self.pool)
        .await
    }

    /// List matches for a request.
    pub async fn list_by_request(
        &self,
        request_id: i64,
    ) -> Result<Vec<DonorMatchEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchEntity>(&format!(
            "SELECT {MATCH_COLUMNS} FROM donor_matches WHERE request_id = $1 ORDER BY id"
        ))
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
    }

    /// List a request's matches in the given status.
    pub async fn list_by_request_and_status(
        &self,
        request_id: i64,
        status: &str,
    ) -> Result<Vec<DonorMatchEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorMatchEntity>(&format!(
            "SELECT {MATCH_COLUMNS} FROM donor_matches \
             WHERE request_id = $1 AND status = $2 ORDER BY id"
        ))
        .bind(request_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    /// Ids of donors that already have a match for the request.
    pub async fn donor_ids_for_request(&self, request_id: i64) -> Result<Vec<i64>, sqlx::Error> {
        let rows: Vec<(i64,)> =
            sqlx::query_as("SELECT donor_id FROM donor_matches WHERE request_id = $1")
                .bind(request_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }

    /// Delete a match. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donor_matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
