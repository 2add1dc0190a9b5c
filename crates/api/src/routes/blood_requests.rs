//! Blood request endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::blood_request::{
    BloodRequestDetail, CreateBloodRequestRequest, UpdateBloodRequestRequest,
};
use domain::models::{BloodRequest, RequestStatus};
use persistence::repositories::{BloodRequestRepository, HospitalRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::{delete_conflict, ApiError};

/// GET /api/v1/blood_requests
pub async fn list_blood_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<BloodRequestDetail>>, ApiError> {
    let repo = BloodRequestRepository::new(state.pool.clone());
    let requests: Vec<BloodRequestDetail> = repo
        .list_with_hospital()
        .await?
        .into_iter()
        .map(BloodRequestDetail::from)
        .collect();
    Ok(Json(requests))
}

/// GET /api/v1/blood_requests/:id
pub async fn get_blood_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BloodRequestDetail>, ApiError> {
    let repo = BloodRequestRepository::new(state.pool.clone());
    let request = repo
        .find_with_hospital(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blood request not found".to_string()))?;
    Ok(Json(request.into()))
}

/// POST /api/v1/blood_requests
pub async fn create_blood_request(
    State(state): State<AppState>,
    Json(request): Json<CreateBloodRequestRequest>,
) -> Result<(StatusCode, Json<BloodRequest>), ApiError> {
    request.validate()?;

    // FK check up front so a bad hospital id is a 404, not a 500
    let hospital_repo = HospitalRepository::new(state.pool.clone());
    hospital_repo
        .find_by_id(request.hospital_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Hospital not found".to_string()))?;

    let status = request.status.unwrap_or(RequestStatus::Open);
    let repo = BloodRequestRepository::new(state.pool.clone());
    let entity = repo
        .create(
            &request.name,
            &request.city,
            request.location.as_deref(),
            &request.contact_number,
            &request.blood_type,
            &request.urgency_level,
            status.as_str(),
            request.units_needed.unwrap_or(1),
            request.hospital_id,
        )
        .await?;
    let blood_request: BloodRequest = entity.into();

    info!(
        request_id = blood_request.id,
        blood_type = %blood_request.blood_type,
        urgency = %blood_request.urgency_level,
        "Blood request posted"
    );
    Ok((StatusCode::CREATED, Json(blood_request)))
}

/// PUT /api/v1/blood_requests/:id
pub async fn update_blood_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateBloodRequestRequest>,
) -> Result<Json<BloodRequest>, ApiError> {
    request.validate()?;

    if let Some(hospital_id) = request.hospital_id {
        let hospital_repo = HospitalRepository::new(state.pool.clone());
        hospital_repo
            .find_by_id(hospital_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Hospital not found".to_string()))?;
    }

    let repo = BloodRequestRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.name.as_deref(),
            request.city.as_deref(),
            request.location.as_deref(),
            request.contact_number.as_deref(),
            request.blood_type.as_deref(),
            request.urgency_level.as_deref(),
            request.status.map(|s| s.as_str()),
            request.units_needed,
            request.hospital_id,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Blood request not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// DELETE /api/v1/blood_requests/:id
pub async fn delete_blood_request(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = BloodRequestRepository::new(state.pool.clone());
    let deleted = repo.delete(id).await.map_err(|e| {
        delete_conflict(e, "Blood request still has matches or notifications")
    })?;
    if !deleted {
        return Err(ApiError::NotFound("Blood request not found".to_string()));
    }
    info!(request_id = id, "Blood request deleted");
    Ok(StatusCode::NO_CONTENT)
}
