//! Hospital endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::hospital::{CreateHospitalRequest, UpdateHospitalRequest};
use domain::models::Hospital;
use persistence::repositories::HospitalRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::{delete_conflict, ApiError};

/// GET /api/v1/hospitals
pub async fn list_hospitals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Hospital>>, ApiError> {
    let repo = HospitalRepository::new(state.pool.clone());
    let hospitals: Vec<Hospital> = repo.list().await?.into_iter().map(Hospital::from).collect();
    Ok(Json(hospitals))
}

/// GET /api/v1/hospitals/:id
pub async fn get_hospital(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Hospital>, ApiError> {
    let repo = HospitalRepository::new(state.pool.clone());
    let hospital = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Hospital not found".to_string()))?;
    Ok(Json(hospital.into()))
}

/// POST /api/v1/hospitals
pub async fn create_hospital(
    State(state): State<AppState>,
    Json(request): Json<CreateHospitalRequest>,
) -> Result<(StatusCode, Json<Hospital>), ApiError> {
    request.validate()?;

    let repo = HospitalRepository::new(state.pool.clone());
    let entity = repo
        .create(
            &request.name,
            &request.city,
            request.location.as_deref(),
            &request.contact_number,
        )
        .await?;
    let hospital: Hospital = entity.into();

    info!(hospital_id = hospital.id, name = %hospital.name, "Hospital created");
    Ok((StatusCode::CREATED, Json(hospital)))
}

/// PUT /api/v1/hospitals/:id
pub async fn update_hospital(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateHospitalRequest>,
) -> Result<Json<Hospital>, ApiError> {
    request.validate()?;

    let repo = HospitalRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.name.as_deref(),
            request.city.as_deref(),
            request.location.as_deref(),
            request.contact_number.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Hospital not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// DELETE /api/v1/hospitals/:id
pub async fn delete_hospital(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = HospitalRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await.map_err(|e| {
        delete_conflict(
            e,
            "Hospital still has blood requests or donation records",
        )
    })?;
    if !deleted {
        return Err(ApiError::NotFound("Hospital not found".to_string()));
    }
    info!(hospital_id = id, "Hospital deleted");
    Ok(StatusCode::NO_CONTENT)
}
