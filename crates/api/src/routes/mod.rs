//! HTTP route handlers.

pub mod blood_requests;
pub mod donation_records;
pub mod donor_matches;
pub mod donors;
pub mod health;
pub mod hospitals;
pub mod notifications;
