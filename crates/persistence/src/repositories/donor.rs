//! Donor repository for database operations.

use sqlx::PgPool;

use crate::entities::DonorEntity;

const DONOR_COLUMNS: &str =
    "id, name, age, blood_type, phone, email, city, location, availability_status";

/// Repository for donor-related database operations.
#[derive(Clone)]
pub struct DonorRepository {
    pool: PgPool,
}

impl DonorRepository {
    /// Creates a new DonorRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all donors.
    pub async fn list(&self) -> Result<Vec<DonorEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorEntity>(&format!(
            "SELECT {DONOR_COLUMNS} FROM donors ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// List available donors, ordered by id so replacement selection is
    /// deterministic.
    pub async fn list_available(&self) -> Result<Vec<DonorEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorEntity>(&format!(
            "SELECT {DONOR_COLUMNS} FROM donors WHERE availability_status = TRUE ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Find a donor by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<DonorEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorEntity>(&format!(
            "SELECT {DONOR_COLUMNS} FROM donors WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a new donor.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        name: &str,
        age: i32,
        blood_type: &str,
        phone: &str,
        email: Option<&str>,
        city: &str,
        location: Option<&str>,
        availability_status: bool,
    ) -> Result<DonorEntity, sqlx::Error> {
        sqlx::query_as::<_, DonorEntity>(&format!(
            r#"
            INSERT INTO donors (name, age, blood_type, phone, email, city, location, availability_status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {DONOR_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(age)
        .bind(blood_type)
        .bind(phone)
        .bind(email)
        .bind(city)
        .bind(location)
        .bind(availability_status)
        .fetch_one(&self.pool)
        .await
    }

    /// Update a donor. Omitted fields keep their current value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        age: Option<i32>,
        blood_type: Option<&str>,
        phone: Option<&str>,
        email: Option<&str>,
        city: Option<&str>,
        location: Option<&str>,
        availability_status: Option<bool>,
    ) -> Result<Option<DonorEntity>, sqlx::Error> {
        sqlx::query_as::<_, DonorEntity>(&format!(
            r#"
            UPDATE donors
            SET name = COALESCE($2, name),
                age = COALESCE($3, age),
                blood_type = COALESCE($4, blood_type),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email),
                city = COALESCE($7, city),
                location = COALESCE($8, location),
                availability_status = COALESCE($9, availability_status)
            WHERE id = $1
            RETURNING {DONOR_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(age)
        .bind(blood_type)
        .bind(phone)
        .bind(email)
        .bind(city)
        .bind(location)
        .bind(availability_status)
        .fetch_optional(&self.pool)
        .await
    }

    /// Set the availability flag.
    pub async fn set_availability(&self, id: i64, available: bool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE donors SET availability_status = $2 WHERE id = $1")
            .bind(id)
            .bind(available)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a donor. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
