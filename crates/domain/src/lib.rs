//! Domain layer for the ReachOut backend.
//!
//! This crate contains:
//! - Domain models (Hospital, Donor, BloodRequest, DonorMatch, Notification,
//!   DonationRecord) and their request/response types
//! - Business logic services (blood-type compatibility, donation eligibility,
//!   match candidate selection, SMS message templates)
//! - The outbound SMS gateway abstraction

pub mod models;
pub mod services;
