//! Donation record entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the donation_records table.
#[derive(Debug, Clone, FromRow)]
pub struct DonationRecordEntity {
    pub id: i64,
    pub donor_id: i64,
    pub hospital_id: i64,
    pub blood_type: String,
    pub donated_at: DateTime<Utc>,
    pub next_eligible_donation: DateTime<Utc>,
}

impl From<DonationRecordEntity> for domain::models::DonationRecord {
    fn from(entity: DonationRecordEntity) -> Self {
        Self {
            id: entity.id,
            donor_id: entity.donor_id,
            hospital_id: entity.hospital_id,
            blood_type: entity.blood_type,
            donated_at: entity.donated_at,
            next_eligible_donation: entity.next_eligible_donation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_donation_record_entity_to_domain() {
        let now = Utc::now();
        let entity = DonationRecordEntity {
            id: 1,
            donor_id: 2,
            hospital_id: 3,
            blood_type: "B+".to_string(),
            donated_at: now,
            next_eligible_donation: now + Duration::days(56),
        };
        let record: domain::models::DonationRecord = entity.into();
        assert_eq!(record.blood_type, "B+");
        assert_eq!(record.next_eligible_donation - record.donated_at, Duration::days(56));
    }
}
