//! Blood request entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::RequestStatus;

/// Database row mapping for the blood_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct BloodRequestEntity {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub location: Option<String>,
    pub contact_number: String,
    pub blood_type: String,
    pub urgency_level: String,
    pub status: String,
    pub units_needed: i32,
    pub hospital_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Blood request joined with its hospital's name.
#[derive(Debug, Clone, FromRow)]
pub struct BloodRequestWithHospitalEntity {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub location: Option<String>,
    pub contact_number: String,
    pub blood_type: String,
    pub urgency_level: String,
    pub status: String,
    pub units_needed: i32,
    pub hospital_id: i64,
    pub created_at: DateTime<Utc>,
    pub hospital_name: Option<String>,
}

impl From<BloodRequestEntity> for domain::models::BloodRequest {
    fn from(entity: BloodRequestEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            city: entity.city,
            location: entity.location,
            contact_number: entity.contact_number,
            blood_type: entity.blood_type,
            urgency_level: entity.urgency_level,
            // The status column carries a CHECK constraint; an unparseable
            // value can only come from manual edits and degrades to Open.
            status: RequestStatus::parse(&entity.status).unwrap_or(RequestStatus::Open),
            units_needed: entity.units_needed,
            hospital_id: entity.hospital_id,
            created_at: entity.created_at,
        }
    }
}

impl From<BloodRequestWithHospitalEntity> for domain::models::blood_request::BloodRequestDetail {
    fn from(entity: BloodRequestWithHospitalEntity) -> Self {
        let hospital_name = entity.hospital_name.clone();
        let request = BloodRequestEntity {
            id: entity.id,
            name: entity.name,
            city: entity.city,
            location: entity.location,
            contact_number: entity.contact_number,
            blood_type: entity.blood_type,
            urgency_level: entity.urgency_level,
            status: entity.status,
            units_needed: entity.units_needed,
            hospital_id: entity.hospital_id,
            created_at: entity.created_at,
        };
        Self {
            request: request.into(),
            hospital_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> BloodRequestEntity {
        BloodRequestEntity {
            id: 1,
            name: "John Patient".to_string(),
            city: "Kampala".to_string(),
            location: None,
            contact_number: "0771234567".to_string(),
            blood_type: "A+".to_string(),
            urgency_level: "High".to_string(),
            status: "Pending".to_string(),
            units_needed: 2,
            hospital_id: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_blood_request_entity_to_domain() {
        let request: domain::models::BloodRequest = entity().into();
        assert_eq!(request.status, RequestStatus::Pending);
        assert_eq!(request.units_needed, 2);
    }

    #[test]
    fn test_unknown_status_degrades_to_open() {
        let mut e = entity();
        e.status = "Garbage".to_string();
        let request: domain::models::BloodRequest = e.into();
        assert_eq!(request.status, RequestStatus::Open);
    }
}
