//! Donor match endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::donor_match::{
    BatchMatchOutcome, CreateMatchRequest, DonorMatch, DonorMatchDetail, UpdateMatchRequest,
};
use domain::models::Donor;
use persistence::repositories::DonorMatchRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/donor_matches
pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<Vec<DonorMatchDetail>>, ApiError> {
    let repo = DonorMatchRepository::new(state.pool.clone());
    let matches: Vec<DonorMatchDetail> = repo
        .list_detailed()
        .await?
        .into_iter()
        .map(DonorMatchDetail::from)
        .collect();
    Ok(Json(matches))
}

/// GET /api/v1/donor_matches/:id
pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DonorMatchDetail>, ApiError> {
    let repo = DonorMatchRepository::new(state.pool.clone());
    let detail = repo
        .find_detail_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?;
    Ok(Json(detail.into()))
}

/// POST /api/v1/donor_matches/create_match
///
/// Returns 201 for a new match and 200 when the (request, donor) pair was
/// already matched; either way the body carries the match.
pub async fn create_match(
    State(state): State<AppState>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<(StatusCode, Json<DonorMatch>), ApiError> {
    request.validate()?;

    let lifecycle = state.lifecycle();
    let (donor_match, created) = lifecycle
        .create_match(request.request_id, request.donor_id, request.status)
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(donor_match)))
}

/// PUT /api/v1/donor_matches/:id
pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateMatchRequest>,
) -> Result<Json<DonorMatch>, ApiError> {
    request.validate()?;

    let lifecycle = state.lifecycle();
    let updated = lifecycle
        .update_match(id, request.status, request.notified_at)
        .await?;
    Ok(Json(updated))
}

/// GET /api/v1/donor_matches/find-matches/:request_id
pub async fn find_matches(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
) -> Result<Json<Vec<Donor>>, ApiError> {
    let lifecycle = state.lifecycle();
    let donors = lifecycle.find_potential_matches(request_id).await?;
    Ok(Json(donors))
}

/// POST /api/v1/donor_matches/batch-match
pub async fn batch_match(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<BatchMatchOutcome>), ApiError> {
    let lifecycle = state.lifecycle();
    let outcome = lifecycle.batch_match().await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// DELETE /api/v1/donor_matches/:id
pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = DonorMatchRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(ApiError::NotFound("Match not found".to_string()));
    }
    info!(match_id = id, "Match deleted");
    Ok(StatusCode::NO_CONTENT)
}
