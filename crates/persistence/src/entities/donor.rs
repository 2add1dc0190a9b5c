//! Donor entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the donors table.
#[derive(Debug, Clone, FromRow)]
pub struct DonorEntity {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub blood_type: String,
    pub phone: String,
    pub email: Option<String>,
    pub city: String,
    pub location: Option<String>,
    pub availability_status: bool,
}

impl From<DonorEntity> for domain::models::Donor {
    fn from(entity: DonorEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            age: entity.age,
            blood_type: entity.blood_type,
            phone: entity.phone,
            email: entity.email,
            city: entity.city,
            location: entity.location,
            availability_status: entity.availability_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity() -> DonorEntity {
        DonorEntity {
            id: 7,
            name: "Jane Doe".to_string(),
            age: 28,
            blood_type: "O-".to_string(),
            phone: "0771234567".to_string(),
            email: Some("jane@example.com".to_string()),
            city: "Kampala".to_string(),
            location: None,
            availability_status: true,
        }
    }

    #[test]
    fn test_donor_entity_to_domain() {
        let donor: domain::models::Donor = entity().into();
        assert_eq!(donor.id, 7);
        assert_eq!(donor.blood_type, "O-");
        assert!(donor.availability_status);
    }

    #[test]
    fn test_donor_entity_optional_fields() {
        let mut e = entity();
        e.email = None;
        let donor: domain::models::Donor = e.into();
        assert!(donor.email.is_none());
    }
}
