//! Blood request repository for database operations.

use sqlx::PgPool;

use crate::entities::{BloodRequestEntity, BloodRequestWithHospitalEntity};

const REQUEST_COLUMNS: &str = "id, name, city, location, contact_number, blood_type, \
     urgency_level, status, units_needed, hospital_id, created_at";

/// Repository for blood-request database operations.
#[derive(Clone)]
pub struct BloodRequestRepository {
    pool: PgPool,
}

impl BloodRequestRepository {
    /// Creates a new BloodRequestRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all blood requests with their hospital name.
    pub async fn list_with_hospital(
        &self,
    ) -> Result<Vec<BloodRequestWithHospitalEntity>, sqlx::Error> {
        sqlx::query_as::<_, BloodRequestWithHospitalEntity>(
            r#"
            SELECT r.id, r.name, r.city, r.location, r.contact_number, r.blood_type,
                   r.urgency_level, r.status, r.units_needed, r.hospital_id, r.created_at,
                   h.name AS hospital_name
            FROM blood_requests r
            LEFT JOIN hospitals h ON h.id = r.hospital_id
            ORDER BY r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Find a blood request by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<BloodRequestEntity>, sqlx::Error> {
        sqlx::query_as::<_, BloodRequestEntity>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Find a blood request by id with its hospital name.
    pub async fn find_with_hospital(
        &self,
        id: i64,
    ) -> Result<Option<BloodRequestWithHospitalEntity>, sqlx::Error> {
        sqlx::query_as::<_, BloodRequestWithHospitalEntity>(
            r#"
            SELECT r.id, r.name, r.city, r.location, r.contact_number, r.blood_type,
                   r.urgency_level, r.status, r.units_needed, r.hospital_id, r.created_at,
                   h.name AS hospital_name
            FROM blood_requests r
            LEFT JOIN hospitals h ON h.id = r.hospital_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// List blood requests in the given status, ordered by id.
    pub async fn list_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<BloodRequestEntity>, sqlx::Error> {
        sqlx::query_as::<_, BloodRequestEntity>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE status = $1 ORDER BY id"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
    }

    /// Insert a new blood request.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        city: &str,
        location: Option<&str>,
        contact_number: &str,
        blood_type: &str,
        urgency_level: &str,
        status: &str,
        units_needed: i32,
        hospital_id: i64,
    ) -> Result<BloodRequestEntity, sqlx::Error> {
        sqlx::query_as::<_, BloodRequestEntity>(&format!(
            r#"
            INSERT INTO blood_requests
                (name, city, location, contact_number, blood_type, urgency_level,
                 status, units_needed, hospital_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(city)
        .bind(location)
        .bind(contact_number)
        .bind(blood_type)
        .bind(urgency_level)
        .bind(status)
        .bind(units_needed)
        .bind(hospital_id)
        .fetch_one(&self.pool)
        .await
    }

    /// Update a blood request. Omitted fields keep their current value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        city: Option<&str>,
        location: Option<&str>,
        contact_number: Option<&str>,
        blood_type: Option<&str>,
        urgency_level: Option<&str>,
        status: Option<&str>,
        units_needed: Option<i32>,
        hospital_id: Option<i64>,
    ) -> Result<Option<BloodRequestEntity>, sqlx::Error> {
        sqlx::query_as::<_, BloodRequestEntity>(&format!(
            r#"
            UPDATE blood_requests
            SET name = COALESCE($2, name),
                city = COALESCE($3, city),
                location = COALESCE($4, location),
                contact_number = COALESCE($5, contact_number),
                blood_type = COALESCE($6, blood_type),
                urgency_level = COALESCE($7, urgency_level),
                status = COALESCE($8, status),
                units_needed = COALESCE($9, units_needed),
                hospital_id = COALESCE($10, hospital_id)
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(city)
        .bind(location)
        .bind(contact_number)
        .bind(blood_type)
        .bind(urgency_level)
        .bind(status)
        .bind(units_needed)
        .bind(hospital_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Set the status of a blood request.
    pub async fn set_status(&self, id: i64, status: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE blood_requests SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a blood request. Returns whether a row was removed.
    ///
    /// Fails with a foreign-key violation while matches or notifications
    /// still reference the request.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blood_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
