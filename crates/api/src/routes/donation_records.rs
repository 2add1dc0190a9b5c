//! Donation record endpoint handlers.
//!
//! Recording a donation has two side effects: the donor is flagged
//! unavailable until their next eligible date, and a caller-supplied
//! next-eligible date earlier than the 56-day floor is clamped up to it.
//! Deleting a record recomputes the donor's availability from what remains.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::donation_record::{
    CreateDonationRecordRequest, DonationRecord, DonationRecordResponse,
};
use domain::services::eligibility::resolve_next_eligible;
use persistence::repositories::{DonationRecordRepository, DonorRepository, HospitalRepository};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/donation_records
pub async fn list_donation_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<DonationRecord>>, ApiError> {
    let repo = DonationRecordRepository::new(state.pool.clone());
    let records: Vec<DonationRecord> = repo
        .list()
        .await?
        .into_iter()
        .map(DonationRecord::from)
        .collect();
    Ok(Json(records))
}

/// GET /api/v1/donation_records/:id
pub async fn get_donation_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DonationRecord>, ApiError> {
    let repo = DonationRecordRepository::new(state.pool.clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Donation record not found".to_string()))?;
    Ok(Json(record.into()))
}

/// POST /api/v1/donation_records
pub async fn create_donation_record(
    State(state): State<AppState>,
    Json(request): Json<CreateDonationRecordRequest>,
) -> Result<(StatusCode, Json<DonationRecordResponse>), ApiError> {
    request.validate()?;

    let donor_repo = DonorRepository::new(state.pool.clone());
    let donor = donor_repo
        .find_by_id(request.donor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?;

    let hospital_repo = HospitalRepository::new(state.pool.clone());
    hospital_repo
        .find_by_id(request.hospital_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Hospital not found".to_string()))?;

    // A donation record documents a physical donation; its blood type is
    // the donor's, not a free choice.
    if request.blood_type != donor.blood_type {
        return Err(ApiError::Validation(format!(
            "blood_type {} does not match the donor's registered type {}",
            request.blood_type, donor.blood_type
        )));
    }

    let donated_at = request.donated_at.unwrap_or_else(Utc::now);
    let (next_eligible, eligibility_adjusted) =
        resolve_next_eligible(donated_at, request.next_eligible_donation);

    let repo = DonationRecordRepository::new(state.pool.clone());
    let entity = repo
        .create(
            request.donor_id,
            request.hospital_id,
            &request.blood_type,
            donated_at,
            next_eligible,
        )
        .await?;
    let record: DonationRecord = entity.into();

    donor_repo.set_availability(request.donor_id, false).await?;

    info!(
        record_id = record.id,
        donor_id = request.donor_id,
        eligibility_adjusted,
        "Donation recorded, donor marked unavailable"
    );

    Ok((
        StatusCode::CREATED,
        Json(DonationRecordResponse {
            record,
            eligibility_adjusted,
        }),
    ))
}

/// DELETE /api/v1/donation_records/:id
///
/// Removes the record and recomputes the donor's availability from the
/// remaining ones: available again unless some remaining record still has
/// a next-eligible date in the future.
pub async fn delete_donation_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = DonationRecordRepository::new(state.pool.clone());
    let record = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Donation record not found".to_string()))?;

    if !repo.delete(id).await? {
        return Err(ApiError::NotFound("Donation record not found".to_string()));
    }

    let available = match repo.find_latest_for_donor(record.donor_id).await? {
        Some(latest) => latest.next_eligible_donation <= Utc::now(),
        None => true,
    };

    let donor_repo = DonorRepository::new(state.pool.clone());
    donor_repo.set_availability(record.donor_id, available).await?;

    info!(
        record_id = id,
        donor_id = record.donor_id,
        available,
        "Donation record deleted, donor availability recomputed"
    );
    Ok(StatusCode::NO_CONTENT)
}
