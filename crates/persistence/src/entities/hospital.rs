//! Hospital entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the hospitals table.
#[derive(Debug, Clone, FromRow)]
pub struct HospitalEntity {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub location: Option<String>,
    pub contact_number: String,
}

impl From<HospitalEntity> for domain::models::Hospital {
    fn from(entity: HospitalEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            city: entity.city,
            location: entity.location,
            contact_number: entity.contact_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hospital_entity_to_domain() {
        let entity = HospitalEntity {
            id: 1,
            name: "Mulago Hospital".to_string(),
            city: "Kampala".to_string(),
            location: None,
            contact_number: "0414530001".to_string(),
        };
        let hospital: domain::models::Hospital = entity.clone().into();
        assert_eq!(hospital.id, entity.id);
        assert_eq!(hospital.name, entity.name);
        assert_eq!(hospital.contact_number, entity.contact_number);
    }
}
