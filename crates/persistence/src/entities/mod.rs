//! Database entity definitions.
//!
//! Entities are direct mappings to database rows. Enum-valued columns are
//! stored as text and parsed into domain enums on conversion.

pub mod blood_request;
pub mod donation_record;
pub mod donor;
pub mod donor_match;
pub mod hospital;
pub mod notification;

pub use blood_request::{BloodRequestEntity, BloodRequestWithHospitalEntity};
pub use donation_record::DonationRecordEntity;
pub use donor::DonorEntity;
pub use donor_match::{DonorMatchDetailEntity, DonorMatchEntity};
pub use hospital::HospitalEntity;
pub use notification::NotificationEntity;
