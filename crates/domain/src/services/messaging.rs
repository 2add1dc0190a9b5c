//! SMS message templates.
//!
//! All outbound text lives here so wording stays consistent between the
//! single-match, batch-match and lifecycle paths.

/// Message offering a match to a donor.
pub fn match_offer(donor_name: &str, blood_type: &str, urgency_level: &str) -> String {
    format!(
        "Hello {donor_name}, you have been matched with a blood request. \
         Blood type needed: {blood_type}, Urgency: {urgency_level}. \
         Please respond if you can donate."
    )
}

/// Acknowledgment to a donor who accepted a match.
pub fn acceptance_ack(donor_name: &str) -> String {
    format!(
        "Hello {donor_name}, thank you for accepting the blood request. \
         The hospital will contact you shortly."
    )
}

/// Acknowledgment to a donor who declined a match.
pub fn decline_ack(donor_name: &str) -> String {
    format!(
        "Hello {donor_name}, you have declined the blood request. \
         Thank you for letting us know."
    )
}

/// Thanks to a donor after a completed donation.
pub fn completion_thanks(donor_name: &str) -> String {
    format!("Hello {donor_name}, thank you for your donation. You have saved a life.")
}

/// Generic status update to a donor.
pub fn status_update(donor_name: &str, status: &str) -> String {
    format!("Hello {donor_name}, your match status has been updated to {status}.")
}

/// To the requester when a donor accepts.
pub fn requester_accepted(donor_name: &str, blood_type: &str) -> String {
    format!("Good news: donor {donor_name} has accepted your blood request for {blood_type}.")
}

/// To the requester when the donation completes.
pub fn requester_completed(blood_type: &str) -> String {
    format!("Your blood request for {blood_type} has been completed. Thank you.")
}

/// To the requester when batch matching finds no donor.
pub fn requester_no_match() -> String {
    "We could not find a matching donor for your blood request yet. \
     We will notify you as soon as one becomes available."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_offer_mentions_type_and_urgency() {
        let msg = match_offer("Jane", "O-", "High");
        assert!(msg.starts_with("Hello Jane"));
        assert!(msg.contains("Blood type needed: O-"));
        assert!(msg.contains("Urgency: High"));
    }

    #[test]
    fn test_status_update_carries_status() {
        let msg = status_update("Jane", "Notified");
        assert!(msg.contains("updated to Notified"));
    }

    #[test]
    fn test_requester_messages() {
        assert!(requester_accepted("Jane", "B+").contains("accepted"));
        assert!(requester_completed("B+").contains("completed"));
        assert!(requester_no_match().contains("could not find"));
    }
}
