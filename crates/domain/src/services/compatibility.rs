//! Blood-type compatibility table.
//!
//! Static ABO/Rh rules mapping a recipient type to the donor types that may
//! supply it. O- is the universal donor, AB+ the universal recipient.

use crate::models::BloodType;

/// Donor types that may supply a recipient of the given type.
pub fn compatible_donor_types(recipient: BloodType) -> &'static [BloodType] {
    use BloodType::*;
    match recipient {
        ONeg => &[ONeg],
        OPos => &[ONeg, OPos],
        ANeg => &[ONeg, ANeg],
        APos => &[ONeg, OPos, ANeg, APos],
        BNeg => &[ONeg, BNeg],
        BPos => &[ONeg, OPos, BNeg, BPos],
        ABNeg => &[ONeg, ANeg, BNeg, ABNeg],
        ABPos => &BloodType::ALL,
    }
}

/// String-based lookup used by every match-finding path.
///
/// An unknown recipient type yields the empty set rather than an error, so
/// a request carrying a bad type simply finds no donors.
pub fn compatible_donor_types_str(recipient: &str) -> &'static [BloodType] {
    match BloodType::parse(recipient) {
        Some(bt) => compatible_donor_types(bt),
        None => &[],
    }
}

/// Whether a donor with `donor_type` (raw string) may supply `recipient_type`.
pub fn can_donate_to(donor_type: &str, recipient_type: &str) -> bool {
    match BloodType::parse(donor_type) {
        Some(donor) => compatible_donor_types_str(recipient_type).contains(&donor),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BloodType::*;

    #[test]
    fn test_universal_donor() {
        assert_eq!(compatible_donor_types(ONeg), &[ONeg]);
        for recipient in BloodType::ALL {
            assert!(compatible_donor_types(recipient).contains(&ONeg));
        }
    }

    #[test]
    fn test_universal_recipient() {
        assert_eq!(compatible_donor_types(ABPos).len(), 8);
    }

    #[test]
    fn test_documented_sets() {
        assert_eq!(compatible_donor_types(OPos), &[ONeg, OPos]);
        assert_eq!(compatible_donor_types(ANeg), &[ONeg, ANeg]);
        assert_eq!(compatible_donor_types(APos), &[ONeg, OPos, ANeg, APos]);
        assert_eq!(compatible_donor_types(BNeg), &[ONeg, BNeg]);
        assert_eq!(compatible_donor_types(BPos), &[ONeg, OPos, BNeg, BPos]);
        assert_eq!(compatible_donor_types(ABNeg), &[ONeg, ANeg, BNeg, ABNeg]);
    }

    #[test]
    fn test_rh_negative_recipients_only_accept_rh_negative() {
        for recipient in [ONeg, ANeg, BNeg, ABNeg] {
            for donor in compatible_donor_types(recipient) {
                assert!(
                    donor.as_str().ends_with('-'),
                    "{donor} offered to Rh- recipient {recipient}"
                );
            }
        }
    }

    #[test]
    fn test_unknown_recipient_yields_empty_set() {
        assert!(compatible_donor_types_str("C+").is_empty());
        assert!(compatible_donor_types_str("").is_empty());
        assert!(compatible_donor_types_str("o-").is_empty());
    }

    #[test]
    fn test_can_donate_to() {
        assert!(can_donate_to("O-", "AB+"));
        assert!(can_donate_to("O-", "O-"));
        assert!(!can_donate_to("A+", "O-"));
        assert!(!can_donate_to("A+", "A-"));
        assert!(!can_donate_to("junk", "A+"));
        assert!(!can_donate_to("A+", "junk"));
    }
}
