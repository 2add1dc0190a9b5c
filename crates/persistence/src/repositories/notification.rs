//! Notification repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::NotificationEntity;

const NOTIFICATION_COLUMNS: &str = "id, donor_id, request_id, message, status, sent_at";

/// Repository for notification audit rows.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all notifications, newest first.
    pub async fn list(&self) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        sqlx::query_as::<_, NotificationEntity>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications ORDER BY sent_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Find a notification by id.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<NotificationEntity>, sqlx::Error> {
        sqlx::query_as::<_, NotificationEntity>(&format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Append one dispatch attempt. Re-notification inserts a new row,
    /// never updates an existing one.
    pub async fn create(
        &self,
        donor_id: i64,
        request_id: Option<i64>,
        message: &str,
        status: &str,
        sent_at: DateTime<Utc>,
    ) -> Result<NotificationEntity, sqlx::Error> {
        sqlx::query_as::<_, NotificationEntity>(&format!(
            r#"
            INSERT INTO notifications (donor_id, request_id, message, status, sent_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(donor_id)
        .bind(request_id)
        .bind(message)
        .bind(status)
        .bind(sent_at)
        .fetch_one(&self.pool)
        .await
    }

    /// Correct a notification's message and/or status (provider delivery
    /// callbacks land here).
    pub async fn update(
        &self,
        id: i64,
        message: Option<&str>,
        status: Option<&str>,
    ) -> Result<Option<NotificationEntity>, sqlx::Error> {
        sqlx::query_as::<_, NotificationEntity>(&format!(
            r#"
            UPDATE notifications
            SET message = COALESCE($2, message),
                status = COALESCE($3, status)
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(message)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a notification. Returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
