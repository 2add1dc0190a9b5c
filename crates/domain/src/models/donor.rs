//! Donor domain models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::validation::{validate_donor_age, validate_phone};

/// A registered blood donor.
///
/// `blood_type` is kept as the raw registered string: unknown types are
/// stored (they are never matched, see the compatibility table's permissive
/// default) and the type is an immutable business fact with respect to
/// donation records, which must always carry the same value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Donor {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub blood_type: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: String,
    /// Optional GPS coordinates, stored but not used for routing.
    pub location: Option<String>,
    /// True means the donor is eligible to be matched.
    pub availability_status: bool,
}

/// Request to register a donor.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateDonorRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_donor_age"))]
    pub age: i32,

    #[validate(length(min = 1, max = 5, message = "blood_type must be 1-5 characters"))]
    pub blood_type: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 50, message = "city must be 1-50 characters"))]
    pub city: String,

    pub location: Option<String>,

    /// Defaults to true when omitted.
    pub availability_status: Option<bool>,
}

/// Request to update a donor. All fields optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateDonorRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_donor_age"))]
    pub age: Option<i32>,

    #[validate(length(min = 1, max = 5, message = "blood_type must be 1-5 characters"))]
    pub blood_type: Option<String>,

    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,

    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 50, message = "city must be 1-50 characters"))]
    pub city: Option<String>,

    pub location: Option<String>,

    pub availability_status: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateDonorRequest {
        CreateDonorRequest {
            name: "Jane Doe".to_string(),
            age: 28,
            blood_type: "O-".to_string(),
            phone: "0771234567".to_string(),
            email: Some("jane@example.com".to_string()),
            city: "Kampala".to_string(),
            location: None,
            availability_status: None,
        }
    }

    #[test]
    fn test_create_donor_request_valid() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_create_donor_request_underage() {
        let mut request = valid_request();
        request.age = 15;
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_donor_request_bad_email() {
        let mut request = valid_request();
        request.email = Some("not-an-email".to_string());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_unknown_blood_type_is_accepted_on_registration() {
        // Unknown types are stored; they just never match anything.
        let mut request = valid_request();
        request.blood_type = "XY".to_string();
        assert!(request.validate().is_ok());
    }
}
