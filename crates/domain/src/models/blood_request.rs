//! Blood request domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::validation::{validate_phone, validate_units_needed, validate_urgency_level};

/// Lifecycle status of a blood request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    Open,
    Pending,
    Matched,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Open => "Open",
            RequestStatus::Pending => "Pending",
            RequestStatus::Matched => "Matched",
            RequestStatus::Completed => "Completed",
        }
    }

    pub fn parse(s: &str) -> Option<RequestStatus> {
        match s {
            "Open" => Some(RequestStatus::Open),
            "Pending" => Some(RequestStatus::Pending),
            "Matched" => Some(RequestStatus::Matched),
            "Completed" => Some(RequestStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A hospital's request for blood.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BloodRequest {
    pub id: i64,
    /// Patient or contact person name.
    pub name: String,
    pub city: String,
    pub location: Option<String>,
    pub contact_number: String,
    pub blood_type: String,
    pub urgency_level: String,
    pub status: RequestStatus,
    pub units_needed: i32,
    pub hospital_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Blood request with the owning hospital's name resolved, as returned by
/// read endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BloodRequestDetail {
    #[serde(flatten)]
    pub request: BloodRequest,
    pub hospital_name: Option<String>,
}

/// Request to post a new blood request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateBloodRequestRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "city must be 1-50 characters"))]
    pub city: String,

    pub location: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub contact_number: String,

    #[validate(length(min = 1, max = 10, message = "blood_type must be 1-10 characters"))]
    pub blood_type: String,

    #[validate(custom(function = "validate_urgency_level"))]
    pub urgency_level: String,

    pub hospital_id: i64,

    #[validate(custom(function = "validate_units_needed"))]
    pub units_needed: Option<i32>,

    /// Defaults to Open when omitted.
    pub status: Option<RequestStatus>,
}

/// Request to update a blood request. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateBloodRequestRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "city must be 1-50 characters"))]
    pub city: Option<String>,

    pub location: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub contact_number: Option<String>,

    #[validate(length(min = 1, max = 10, message = "blood_type must be 1-10 characters"))]
    pub blood_type: Option<String>,

    #[validate(custom(function = "validate_urgency_level"))]
    pub urgency_level: Option<String>,

    pub hospital_id: Option<i64>,

    #[validate(custom(function = "validate_units_needed"))]
    pub units_needed: Option<i32>,

    pub status: Option<RequestStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_roundtrip() {
        for status in [
            RequestStatus::Open,
            RequestStatus::Pending,
            RequestStatus::Matched,
            RequestStatus::Completed,
        ] {
            assert_eq!(RequestStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RequestStatus::parse("Cancelled"), None);
    }

    #[test]
    fn test_create_request_valid() {
        let request = CreateBloodRequestRequest {
            name: "John Patient".to_string(),
            city: "Kampala".to_string(),
            location: None,
            contact_number: "0771234567".to_string(),
            blood_type: "A+".to_string(),
            urgency_level: "High".to_string(),
            hospital_id: 1,
            units_needed: Some(2),
            status: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_bad_urgency() {
        let request = CreateBloodRequestRequest {
            name: "John Patient".to_string(),
            city: "Kampala".to_string(),
            location: None,
            contact_number: "0771234567".to_string(),
            blood_type: "A+".to_string(),
            urgency_level: "Urgent".to_string(),
            hospital_id: 1,
            units_needed: None,
            status: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_zero_units() {
        let request = CreateBloodRequestRequest {
            name: "John Patient".to_string(),
            city: "Kampala".to_string(),
            location: None,
            contact_number: "0771234567".to_string(),
            blood_type: "A+".to_string(),
            urgency_level: "Low".to_string(),
            hospital_id: 1,
            units_needed: Some(0),
            status: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_detail_serialization_flattens_request() {
        let detail = BloodRequestDetail {
            request: BloodRequest {
                id: 7,
                name: "John Patient".to_string(),
                city: "Kampala".to_string(),
                location: None,
                contact_number: "0771234567".to_string(),
                blood_type: "A+".to_string(),
                urgency_level: "High".to_string(),
                status: RequestStatus::Open,
                units_needed: 1,
                hospital_id: 1,
                created_at: Utc::now(),
            },
            hospital_name: Some("Mulago Hospital".to_string()),
        };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("\"id\":7"));
        assert!(json.contains("\"hospital_name\":\"Mulago Hospital\""));
        assert!(json.contains("\"status\":\"Open\""));
    }
}
