//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::NotificationStatus;

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: i64,
    pub donor_id: i64,
    pub request_id: Option<i64>,
    pub message: String,
    pub status: String,
    pub sent_at: DateTime<Utc>,
}

impl From<NotificationEntity> for domain::models::Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            donor_id: entity.donor_id,
            request_id: entity.request_id,
            message: entity.message,
            status: NotificationStatus::parse(&entity.status)
                .unwrap_or(NotificationStatus::Pending),
            sent_at: entity.sent_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_entity_to_domain() {
        let entity = NotificationEntity {
            id: 1,
            donor_id: 2,
            request_id: None,
            message: "Hello".to_string(),
            status: "Sent".to_string(),
            sent_at: Utc::now(),
        };
        let n: domain::models::Notification = entity.into();
        assert_eq!(n.status, NotificationStatus::Sent);
        assert!(n.request_id.is_none());
    }
}
