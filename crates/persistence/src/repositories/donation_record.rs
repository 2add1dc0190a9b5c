//! Donation record repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::DonationRecordEntity;

const RECORD_COLUMNS: &str =
    "id, donor_id, hospital_id, blood_type, donated_at, next_eligible_donation";

/// Repository for donation-record database operations.
#[derive(Clone)]
pub struct DonationRecordRepository {
    pool: PgPool,
}

impl DonationRecordRepository {
    /// Creates a new DonationRecordRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all donation records, newest first.
    pub async fn list(&self) -> Result<Vec<DonationRecordEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonationRecordEntity>(&format!(
            "SELECT {RECORD_COLUMNS} FROM donation_records ORDER BY donated_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Find a record by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<DonationRecordEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonationRecordEntity>(&format!(
            "SELECT {RECORD_COLUMNS} FROM donation_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// The donor's most recent record by donation time, if any.
    pub async fn find_latest_for_donor(
        &self,
        donor_id: i64,
    ) -> Result<Option<DonationRecordEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonationRecordEntity>(&format!(
            "SELECT {RECORD_COLUMNS} FROM donation_records \
             WHERE donor_id = $1 ORDER BY donated_at DESC, id DESC LIMIT 1"
        ))
        .bind(donor_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a new donation record.
    pub async fn create(
        &self,
        donor_id: i64,
        hospital_id: i64,
        blood_type: &str,
        donated_at: DateTime<Utc>,
        next_eligible_donation: DateTime<Utc>,
    ) -> Result<DonationRecordEntity, sqlx::Error> {
        sqlx::query_as::<_, DonationRecordEntity>(&format!(
            r#"
            INSERT INTO donation_records
                (donor_id, hospital_id, blood_type, donated_at, next_eligible_donation)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(donor_id)
        .bind(hospital_id)
        .bind(blood_type)
        .bind(donated_at)
        .bind(next_eligible_donation)
        .fetch_one(&self.pool)
        .await
    }

    /// Delete a record. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donation_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
