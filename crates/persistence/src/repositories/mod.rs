//! Repository implementations for database operations.

pub mod blood_request;
pub mod donation_record;
pub mod donor;
pub mod donor_match;
pub mod hospital;
pub mod notification;

pub use blood_request::BloodRequestRepository;
pub use donation_record::DonationRecordRepository;
pub use donor::DonorRepository;
pub use donor_match::DonorMatchRepository;
pub use hospital::HospitalRepository;
pub use notification::NotificationRepository;
