//! Domain services for ReachOut.
//!
//! Services contain business logic that operates on domain models.

pub mod compatibility;
pub mod eligibility;
pub mod matching;
pub mod messaging;
pub mod sms;

pub use compatibility::{compatible_donor_types, compatible_donor_types_str, can_donate_to};
pub use eligibility::{resolve_next_eligible, MIN_DONATION_INTERVAL_DAYS};
pub use matching::{eligible_donors, select_replacement};
pub use sms::{
    MockSmsGateway, RecipientReport, SentSms, SmsDeliveryReport, SmsGateway, SmsGatewayError,
};
