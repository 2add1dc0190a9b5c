//! Donor match entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use domain::models::donor_match::{DonorMatchDetail, MatchDonorInfo, MatchRequestInfo};
use domain::models::{MatchStatus, RequestStatus};

/// Database row mapping for the donor_matches table.
#[derive(Debug, Clone, FromRow)]
pub struct DonorMatchEntity {
    pub id: i64,
    pub request_id: i64,
    pub donor_id: i64,
    pub status: String,
    pub notified_at: Option<DateTime<Utc>>,
}

/// Match row joined with donor and request summaries.
#[derive(Debug, Clone, FromRow)]
pub struct DonorMatchDetailEntity {
    pub id: i64,
    pub request_id: i64,
    pub donor_id: i64,
    pub status: String,
    pub notified_at: Option<DateTime<Utc>>,
    pub donor_name: Option<String>,
    pub donor_email: Option<String>,
    pub request_blood_type: Option<String>,
    pub request_units_needed: Option<i32>,
    pub request_urgency_level: Option<String>,
    pub request_status: Option<String>,
}

impl From<DonorMatchEntity> for domain::models::DonorMatch {
    fn from(entity: DonorMatchEntity) -> Self {
        Self {
            id: entity.id,
            request_id: entity.request_id,
            donor_id: entity.donor_id,
            status: MatchStatus::parse(&entity.status).unwrap_or(MatchStatus::Pending),
            notified_at: entity.notified_at,
        }
    }
}

impl From<DonorMatchDetailEntity> for DonorMatchDetail {
    fn from(entity: DonorMatchDetailEntity) -> Self {
        let donor = entity.donor_name.as_ref().map(|name| MatchDonorInfo {
            id: entity.donor_id,
            name: name.clone(),
            email: entity.donor_email.clone(),
        });
        let request = entity
            .request_blood_type
            .as_ref()
            .map(|blood_type| MatchRequestInfo {
                id: entity.request_id,
                blood_type: blood_type.clone(),
                units_needed: entity.request_units_needed.unwrap_or(1),
                urgency_level: entity.request_urgency_level.clone().unwrap_or_default(),
                status: entity
                    .request_status
                    .as_deref()
                    .and_then(RequestStatus::parse)
                    .unwrap_or(RequestStatus::Open),
            });

        Self {
            donor_match: domain::models::DonorMatch {
                id: entity.id,
                request_id: entity.request_id,
                donor_id: entity.donor_id,
                status: MatchStatus::parse(&entity.status).unwrap_or(MatchStatus::Pending),
                notified_at: entity.notified_at,
            },
            donor,
            request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_entity_to_domain() {
        let entity = DonorMatchEntity {
            id: 1,
            request_id: 2,
            donor_id: 3,
            status: "Notified".to_string(),
            notified_at: Some(Utc::now()),
        };
        let m: domain::models::DonorMatch = entity.into();
        assert_eq!(m.status, MatchStatus::Notified);
    }

    #[test]
    fn test_legacy_rejected_status_parses_as_declined() {
        let entity = DonorMatchEntity {
            id: 1,
            request_id: 2,
            donor_id: 3,
            status: "Rejected".to_string(),
            notified_at: None,
        };
        let m: domain::models::DonorMatch = entity.into();
        assert_eq!(m.status, MatchStatus::Declined);
    }

    #[test]
    fn test_detail_entity_embeds_donor_and_request() {
        let entity = DonorMatchDetailEntity {
            id: 1,
            request_id: 2,
            donor_id: 3,
            status: "Pending".to_string(),
            notified_at: None,
            donor_name: Some("Jane Doe".to_string()),
            donor_email: None,
            request_blood_type: Some("O-".to_string()),
            request_units_needed: Some(2),
            request_urgency_level: Some("High".to_string()),
            request_status: Some("Pending".to_string()),
        };
        let detail: DonorMatchDetail = entity.into();
        assert_eq!(detail.donor.as_ref().unwrap().name, "Jane Doe");
        let request = detail.request.unwrap();
        assert_eq!(request.blood_type, "O-");
        assert_eq!(request.status, RequestStatus::Pending);
    }
}
