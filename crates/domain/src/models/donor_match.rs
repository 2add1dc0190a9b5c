//! Donor match domain models.
//!
//! A match pairs one blood request with one donor and walks a status
//! lifecycle: Pending -> Notified (on successful SMS) -> Accepted, Declined
//! or Completed (client-driven). At most one match exists per
//! (request, donor) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Lifecycle status of a donor match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Pending,
    Notified,
    Accepted,
    /// Terminal for this pairing; triggers replacement matching.
    #[serde(alias = "Rejected")]
    Declined,
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "Pending",
            MatchStatus::Notified => "Notified",
            MatchStatus::Accepted => "Accepted",
            MatchStatus::Declined => "Declined",
            MatchStatus::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<MatchStatus> {
        match s {
            "Pending" => Some(MatchStatus::Pending),
            "Notified" => Some(MatchStatus::Notified),
            "Accepted" => Some(MatchStatus::Accepted),
            // Legacy spelling kept for stored rows from the old system.
            "Declined" | "Rejected" => Some(MatchStatus::Declined),
            "Completed" => Some(MatchStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed pairing between a blood request and a donor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DonorMatch {
    pub id: i64,
    pub request_id: i64,
    pub donor_id: i64,
    pub status: MatchStatus,
    pub notified_at: Option<DateTime<Utc>>,
}

/// Donor fields embedded in a match detail response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchDonorInfo {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// Request fields embedded in a match detail response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MatchRequestInfo {
    pub id: i64,
    pub blood_type: String,
    pub units_needed: i32,
    pub urgency_level: String,
    pub status: super::RequestStatus,
}

/// Match with its donor and request summarized, as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DonorMatchDetail {
    #[serde(flatten)]
    pub donor_match: DonorMatch,
    pub donor: Option<MatchDonorInfo>,
    pub request: Option<MatchRequestInfo>,
}

/// Request to create a donor match.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateMatchRequest {
    pub request_id: i64,
    pub donor_id: i64,
    /// Defaults to Pending when omitted.
    pub status: Option<MatchStatus>,
}

/// Request to update a donor match.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateMatchRequest {
    pub status: Option<MatchStatus>,
    pub notified_at: Option<DateTime<Utc>>,
}

/// Outcome of a batch-match run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchMatchOutcome {
    pub matches_created: u64,
    pub requests_with_no_matches: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_status_roundtrip() {
        for status in [
            MatchStatus::Pending,
            MatchStatus::Notified,
            MatchStatus::Accepted,
            MatchStatus::Declined,
            MatchStatus::Completed,
        ] {
            assert_eq!(MatchStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_match_status_legacy_rejected() {
        assert_eq!(MatchStatus::parse("Rejected"), Some(MatchStatus::Declined));
        let parsed: MatchStatus = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(parsed, MatchStatus::Declined);
    }

    #[test]
    fn test_match_status_unknown() {
        assert_eq!(MatchStatus::parse("Expired"), None);
    }

    #[test]
    fn test_detail_serialization() {
        let detail = DonorMatchDetail {
            donor_match: DonorMatch {
                id: 3,
                request_id: 1,
                donor_id: 2,
                status: MatchStatus::Notified,
                notified_at: Some(Utc::now()),
            },
            donor: Some(MatchDonorInfo {
                id: 2,
                name: "Jane Doe".to_string(),
                email: None,
            }),
            request: None,
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("\"status\":\"Notified\""));
        assert!(json.contains("\"donor\":{"));
        assert!(json.contains("\"request\":null"));
    }
}
