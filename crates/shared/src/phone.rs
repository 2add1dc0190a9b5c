//! Phone number (MSISDN) normalization.
//!
//! The SMS gateway requires international E.164-style addresses. Donors and
//! hospitals typically register local numbers ("0771234567"), which are
//! rewritten to "+<country code><subscriber>" before dispatch.

/// Normalizes a phone number into an international address.
///
/// Rules, in order:
/// - separators (spaces, dashes, parentheses) are stripped
/// - a leading `+` means the number is already international and is kept
/// - a leading `00` is replaced with `+`
/// - a leading `0` is replaced with `+<default_country_code>`
/// - anything else gets `+<default_country_code>` prepended
pub fn normalize_msisdn(phone: &str, default_country_code: &str) -> String {
    let cleaned: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();

    if let Some(rest) = cleaned.strip_prefix('+') {
        return format!("+{}", rest);
    }
    if let Some(rest) = cleaned.strip_prefix("00") {
        return format!("+{}", rest);
    }
    if let Some(rest) = cleaned.strip_prefix('0') {
        return format!("+{}{}", default_country_code, rest);
    }
    format!("+{}{}", default_country_code, cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_number_gets_country_code() {
        assert_eq!(normalize_msisdn("0771234567", "256"), "+256771234567");
    }

    #[test]
    fn test_international_number_unchanged() {
        assert_eq!(normalize_msisdn("+256771234567", "256"), "+256771234567");
    }

    #[test]
    fn test_double_zero_prefix() {
        assert_eq!(normalize_msisdn("00256771234567", "256"), "+256771234567");
    }

    #[test]
    fn test_bare_subscriber_number() {
        assert_eq!(normalize_msisdn("771234567", "256"), "+256771234567");
    }

    #[test]
    fn test_separators_stripped() {
        assert_eq!(normalize_msisdn("077-123 4567", "256"), "+256771234567");
        assert_eq!(normalize_msisdn("+256 (77) 123-4567", "256"), "+256771234567");
    }

    #[test]
    fn test_other_country_code() {
        assert_eq!(normalize_msisdn("0712345678", "254"), "+254712345678");
    }
}
