//! Notification domain models.
//!
//! Notifications are an append-only audit trail of SMS dispatch attempts.
//! Re-notification creates a new row, never updates an old one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Delivery status of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationStatus {
    /// Constructed but not yet dispatched.
    Pending,
    /// The gateway accepted the message for the recipient.
    Sent,
    /// Delivery confirmed by the provider (via delivery callback).
    Delivered,
    /// The gateway rejected the message or the call failed.
    Failed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "Pending",
            NotificationStatus::Sent => "Sent",
            NotificationStatus::Delivered => "Delivered",
            NotificationStatus::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Option<NotificationStatus> {
        match s {
            "Pending" => Some(NotificationStatus::Pending),
            "Sent" => Some(NotificationStatus::Sent),
            "Delivered" => Some(NotificationStatus::Delivered),
            "Failed" => Some(NotificationStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded SMS dispatch attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Notification {
    pub id: i64,
    pub donor_id: i64,
    pub request_id: Option<i64>,
    pub message: String,
    pub status: NotificationStatus,
    pub sent_at: DateTime<Utc>,
}

/// Request to send an ad-hoc notification to a donor.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateNotificationRequest {
    pub donor_id: i64,
    pub request_id: Option<i64>,

    #[validate(length(min = 1, max = 640, message = "message must be 1-640 characters"))]
    pub message: String,
}

/// Request to update a notification record (message or status correction,
/// e.g. from a provider delivery callback).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateNotificationRequest {
    #[validate(length(min = 1, max = 640, message = "message must be 1-640 characters"))]
    pub message: Option<String>,

    pub status: Option<NotificationStatus>,
}

/// Result of re-offering every Pending match of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchNotifyOutcome {
    pub request_id: i64,
    pub notifications_sent: u64,
    pub notifications_failed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            NotificationStatus::Pending,
            NotificationStatus::Sent,
            NotificationStatus::Delivered,
            NotificationStatus::Failed,
        ] {
            assert_eq!(NotificationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(NotificationStatus::parse("Queued"), None);
    }

    #[test]
    fn test_create_notification_request_empty_message() {
        let request = CreateNotificationRequest {
            donor_id: 1,
            request_id: None,
            message: String::new(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_notification_serialization() {
        let notification = Notification {
            id: 1,
            donor_id: 2,
            request_id: Some(3),
            message: "Hello".to_string(),
            status: NotificationStatus::Sent,
            sent_at: Utc::now(),
        };
        let json = serde_json::to_string(&notification).unwrap();
        assert!(json.contains("\"status\":\"Sent\""));
        assert!(json.contains("\"request_id\":3"));
    }
}
