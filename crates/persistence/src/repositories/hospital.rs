//! Hospital repository for database operations.

use sqlx::PgPool;

use crate::entities::HospitalEntity;

/// Repository for hospital-related database operations.
#[derive(Clone)]
pub struct HospitalRepository {
    pool: PgPool,
}

impl HospitalRepository {
    /// Creates a new HospitalRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all hospitals.
    pub async fn list(&self) -> Result<Vec<HospitalEntity>, sqlx::Error> {
        sqlx::query_as::<_, HospitalEntity>(
            r#"
            SELECT id, name, city, location, contact_number
            FROM hospitals
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Find a hospital by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<HospitalEntity>, sqlx::Error> {
        sqlx::query_as::<_, HospitalEntity>(
            r#"
            SELECT id, name, city, location, contact_number
            FROM hospitals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a new hospital.
    pub async fn create(
        &self,
        name: &str,
        city: &str,
        location: Option<&str>,
        contact_number: &str,
    ) -> Result<HospitalEntity, sqlx::Error> {
        sqlx::query_as::<_, HospitalEntity>(
            r#"
            INSERT INTO hospitals (name, city, location, contact_number)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, city, location, contact_number
            "#,
        )
        .bind(name)
        .bind(city)
        .bind(location)
        .bind(contact_number)
        .fetch_one(&self.pool)
        .await
    }

    /// Update a hospital. Omitted fields keep their current value; the
    /// location is always written so it can be cleared.
    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        city: Option<&str>,
        location: Option<&str>,
        contact_number: Option<&str>,
    ) -> Result<Option<HospitalEntity>, sqlx::Error> {
        sqlx::query_as::<_, HospitalEntity>(
            r#"
            UPDATE hospitals
            SET name = COALESCE($2, name),
                city = COALESCE($3, city),
                location = COALESCE($4, location),
                contact_number = COALESCE($5, contact_number)
            WHERE id = $1
            RETURNING id, name, city, location, contact_number
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(city)
        .bind(location)
        .bind(contact_number)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a hospital. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hospitals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
