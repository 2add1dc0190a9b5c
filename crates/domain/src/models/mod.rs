//! Domain models for ReachOut.

pub mod blood_request;
pub mod blood_type;
pub mod donation_record;
pub mod donor;
pub mod donor_match;
pub mod hospital;
pub mod notification;

pub use blood_request::{BloodRequest, RequestStatus};
pub use blood_type::BloodType;
pub use donation_record::DonationRecord;
pub use donor::Donor;
pub use donor_match::{DonorMatch, MatchStatus};
pub use hospital::Hospital;
pub use notification::{Notification, NotificationStatus};
