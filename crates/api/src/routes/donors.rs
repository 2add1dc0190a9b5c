//! Donor endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::donor::{CreateDonorRequest, UpdateDonorRequest};
use domain::models::Donor;
use persistence::repositories::DonorRepository;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::{delete_conflict, ApiError};

/// GET /api/v1/donors
pub async fn list_donors(State(state): State<AppState>) -> Result<Json<Vec<Donor>>, ApiError> {
    let repo = DonorRepository::new(state.pool.clone());
    let donors: Vec<Donor> = repo.list().await?.into_iter().map(Donor::from).collect();
    Ok(Json(donors))
}

/// GET /api/v1/donors/:id
pub async fn get_donor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Donor>, ApiError> {
    let repo = DonorRepository::new(state.pool.clone());
    let donor = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;
    Ok(Json(donor.into()))
}

/// POST /api/v1/donors
pub async fn create_donor(
    State(state): State<AppState>,
    Json(request): Json<CreateDonorRequest>,
) -> Result<(StatusCode, Json<Donor>), ApiError> {
    request.validate()?;

    let repo = DonorRepository::new(state.pool.clone());
    let entity = repo
        .create(
            &request.name,
            request.age,
            &request.blood_type,
            &request.phone,
            request.email.as_deref(),
            &request.city,
            request.location.as_deref(),
            request.availability_status.unwrap_or(true),
        )
        .await?;
    let donor: Donor = entity.into();

    info!(donor_id = donor.id, blood_type = %donor.blood_type, "Donor registered");
    Ok((StatusCode::CREATED, Json(donor)))
}

/// PUT /api/v1/donors/:id
pub async fn update_donor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDonorRequest>,
) -> Result<Json<Donor>, ApiError> {
    request.validate()?;

    let repo = DonorRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.name.as_deref(),
            request.age,
            request.blood_type.as_deref(),
            request.phone.as_deref(),
            request.email.as_deref(),
            request.city.as_deref(),
            request.location.as_deref(),
            request.availability_status,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;

    Ok(Json(entity.into()))
}

#[derive(Debug, Deserialize)]
pub struct SetAvailabilityRequest {
    pub availability_status: bool,
}

/// PUT /api/v1/donors/:id/availability
pub async fn set_donor_availability(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<SetAvailabilityRequest>,
) -> Result<Json<Donor>, ApiError> {
    let repo = DonorRepository::new(state.pool.clone());
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;

    repo.set_availability(id, request.availability_status).await?;

    let donor = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;
    Ok(Json(donor.into()))
}

/// DELETE /api/v1/donors/:id
pub async fn delete_donor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = DonorRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await.map_err(|e| {
        delete_conflict(
            e,
            "Donor still has matches, notifications or donation records",
        )
    })?;
    if !deleted {
        return Err(ApiError::NotFound("Donor not found".to_string()));
    }
    info!(donor_id = id, "Donor deleted");
    Ok(StatusCode::NO_CONTENT)
}
