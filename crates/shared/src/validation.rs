//! Common validation utilities.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Urgency levels accepted on blood requests.
pub const URGENCY_LEVELS: [&str; 3] = ["High", "Medium", "Low"];

lazy_static! {
    /// Phone numbers: optional `+`, then 7-15 digits. Separators are
    /// stripped before matching.
    static ref PHONE_RE: Regex = Regex::new(r"^\+?[0-9]{7,15}$").unwrap();
}

/// Validates that a phone number looks like a dialable MSISDN.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if PHONE_RE.is_match(&cleaned) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must be 7-15 digits with optional + prefix".into());
        Err(err)
    }
}

/// Validates that an urgency level is one of High, Medium, Low.
pub fn validate_urgency_level(level: &str) -> Result<(), ValidationError> {
    if URGENCY_LEVELS.contains(&level) {
        Ok(())
    } else {
        let mut err = ValidationError::new("urgency_level");
        err.message = Some("Urgency level must be High, Medium or Low".into());
        Err(err)
    }
}

/// Validates that a donor age is within the accepted donation range.
pub fn validate_donor_age(age: i32) -> Result<(), ValidationError> {
    if (16..=70).contains(&age) {
        Ok(())
    } else {
        let mut err = ValidationError::new("age_range");
        err.message = Some("Donor age must be between 16 and 70".into());
        Err(err)
    }
}

/// Validates that units needed is a positive count.
pub fn validate_units_needed(units: i32) -> Result<(), ValidationError> {
    if units >= 1 {
        Ok(())
    } else {
        let mut err = ValidationError::new("units_range");
        err.message = Some("Units needed must be at least 1".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("0771234567").is_ok());
        assert!(validate_phone("+256771234567").is_ok());
        assert!(validate_phone("077-123 4567").is_ok());
    }

    #[test]
    fn test_validate_phone_invalid() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("not-a-number").is_err());
        assert!(validate_phone("").is_err());
        assert!(validate_phone("+1234567890123456").is_err());
    }

    #[test]
    fn test_validate_urgency_level() {
        assert!(validate_urgency_level("High").is_ok());
        assert!(validate_urgency_level("Medium").is_ok());
        assert!(validate_urgency_level("Low").is_ok());
        assert!(validate_urgency_level("high").is_err());
        assert!(validate_urgency_level("Critical").is_err());
    }

    #[test]
    fn test_validate_donor_age() {
        assert!(validate_donor_age(16).is_ok());
        assert!(validate_donor_age(70).is_ok());
        assert!(validate_donor_age(15).is_err());
        assert!(validate_donor_age(71).is_err());
    }

    #[test]
    fn test_validate_units_needed() {
        assert!(validate_units_needed(1).is_ok());
        assert!(validate_units_needed(4).is_ok());
        assert!(validate_units_needed(0).is_err());
        assert!(validate_units_needed(-1).is_err());
    }
}
