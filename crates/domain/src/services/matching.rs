//! Match candidate selection.
//!
//! Pure filtering over donor lists; the lifecycle engine in the API crate
//! layers persistence and notification dispatch on top.

use crate::models::Donor;
use crate::services::compatibility::can_donate_to;

/// Donors that are available and blood-type compatible with the recipient.
///
/// Order of the input is preserved; callers that need a deterministic order
/// should pass donors sorted by id.
pub fn eligible_donors<'a>(donors: &'a [Donor], recipient_type: &str) -> Vec<&'a Donor> {
    donors
        .iter()
        .filter(|d| d.availability_status && can_donate_to(&d.blood_type, recipient_type))
        .collect()
}

/// Picks one replacement donor after a decline: the first eligible donor
/// that is neither the declining donor nor already matched to the request.
pub fn select_replacement<'a>(
    donors: &'a [Donor],
    recipient_type: &str,
    declined_donor_id: i64,
    already_matched: &[i64],
) -> Option<&'a Donor> {
    eligible_donors(donors, recipient_type)
        .into_iter()
        .find(|d| d.id != declined_donor_id && !already_matched.contains(&d.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donor(id: i64, blood_type: &str, available: bool) -> Donor {
        Donor {
            id,
            name: format!("Donor {id}"),
            age: 30,
            blood_type: blood_type.to_string(),
            phone: format!("077000000{id}"),
            email: None,
            city: "Kampala".to_string(),
            location: None,
            availability_status: available,
        }
    }

    #[test]
    fn test_eligible_donors_filters_type_and_availability() {
        let donors = vec![
            donor(1, "O-", true),
            donor(2, "A+", true),
            donor(3, "O-", false),
            donor(4, "O+", true),
        ];
        let eligible = eligible_donors(&donors, "O+");
        let ids: Vec<i64> = eligible.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_eligible_donors_unknown_recipient_type() {
        let donors = vec![donor(1, "O-", true)];
        assert!(eligible_donors(&donors, "nonsense").is_empty());
    }

    #[test]
    fn test_select_replacement_excludes_decliner() {
        let donors = vec![donor(1, "O-", true), donor(2, "O-", true)];
        let replacement = select_replacement(&donors, "O-", 1, &[1]);
        assert_eq!(replacement.map(|d| d.id), Some(2));
    }

    #[test]
    fn test_select_replacement_excludes_already_matched() {
        let donors = vec![
            donor(1, "O-", true),
            donor(2, "O-", true),
            donor(3, "O-", true),
        ];
        let replacement = select_replacement(&donors, "O-", 1, &[1, 2]);
        assert_eq!(replacement.map(|d| d.id), Some(3));
    }

    #[test]
    fn test_select_replacement_none_left() {
        let donors = vec![donor(1, "O-", true)];
        assert!(select_replacement(&donors, "O-", 1, &[1]).is_none());
    }
}
