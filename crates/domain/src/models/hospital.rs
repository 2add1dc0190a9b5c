//! Hospital domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::validation::validate_phone;

/// A hospital that posts blood requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Hospital {
    pub id: i64,
    pub name: String,
    pub city: String,
    /// Optional GPS coordinates, stored but not used for routing.
    pub location: Option<String>,
    pub contact_number: String,
}

/// Request to register a hospital.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateHospitalRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "city must be 1-50 characters"))]
    pub city: String,

    pub location: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub contact_number: String,
}

/// Request to update a hospital. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateHospitalRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "city must be 1-50 characters"))]
    pub city: Option<String>,

    pub location: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub contact_number: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_hospital_request_valid() {
        let request = CreateHospitalRequest {
            name: "Mulago Hospital".to_string(),
            city: "Kampala".to_string(),
            location: None,
            contact_number: "0414530001".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_hospital_request_bad_phone() {
        let request = CreateHospitalRequest {
            name: "Mulago Hospital".to_string(),
            city: "Kampala".to_string(),
            location: None,
            contact_number: "abc".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_hospital_request_empty_name() {
        let request = CreateHospitalRequest {
            name: String::new(),
            city: "Kampala".to_string(),
            location: None,
            contact_number: "0414530001".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_hospital_serialization() {
        let hospital = Hospital {
            id: 1,
            name: "Mulago Hospital".to_string(),
            city: "Kampala".to_string(),
            location: Some("0.3378,32.5760".to_string()),
            contact_number: "0414530001".to_string(),
        };
        let json = serde_json::to_string(&hospital).unwrap();
        assert!(json.contains("\"contact_number\":\"0414530001\""));
    }
}
