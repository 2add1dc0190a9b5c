//! Donation record domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A completed donation.
///
/// `blood_type` must equal the donor's and `next_eligible_donation` is never
/// earlier than `donated_at` plus the minimum inter-donation interval (see
/// [`crate::services::eligibility`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DonationRecord {
    pub id: i64,
    pub donor_id: i64,
    pub hospital_id: i64,
    pub blood_type: String,
    pub donated_at: DateTime<Utc>,
    pub next_eligible_donation: DateTime<Utc>,
}

/// Request to record a completed donation.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateDonationRecordRequest {
    pub donor_id: i64,
    pub hospital_id: i64,

    #[validate(length(min = 1, max = 5, message = "blood_type must be 1-5 characters"))]
    pub blood_type: String,

    /// Defaults to now when omitted.
    pub donated_at: Option<DateTime<Utc>>,

    /// Clamped up to `donated_at + 56 days` when earlier or omitted.
    pub next_eligible_donation: Option<DateTime<Utc>>,
}

/// Donation record as returned on creation, flagging whether the supplied
/// eligibility date had to be clamped to the 56-day floor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DonationRecordResponse {
    #[serde(flatten)]
    pub record: DonationRecord,
    pub eligibility_adjusted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_record_request_deserialization() {
        let json = r#"{
            "donor_id": 1,
            "hospital_id": 2,
            "blood_type": "B+",
            "donated_at": "2026-01-10T08:00:00Z"
        }"#;
        let request: CreateDonationRecordRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.donor_id, 1);
        assert!(request.next_eligible_donation.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_response_flags_adjustment() {
        let response = DonationRecordResponse {
            record: DonationRecord {
                id: 1,
                donor_id: 1,
                hospital_id: 2,
                blood_type: "B+".to_string(),
                donated_at: Utc::now(),
                next_eligible_donation: Utc::now(),
            },
            eligibility_adjusted: true,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"eligibility_adjusted\":true"));
    }
}
