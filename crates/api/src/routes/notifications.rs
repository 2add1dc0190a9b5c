//! Notification endpoint handlers.
//!
//! Creating a notification is not a plain insert: the message is dispatched
//! through the SMS gateway and the stored row reflects the delivery outcome.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::notification::{
    BatchNotifyOutcome, CreateNotificationRequest, UpdateNotificationRequest,
};
use domain::models::{Donor, Notification};
use domain::services::messaging;
use persistence::repositories::{
    BloodRequestRepository, DonorMatchRepository, DonorRepository, NotificationRepository,
};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
/// GET /api/v1/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    let notifications: Vec<Notification> = repo
        .list()
        .await?
        .into_iter()
        .map(Notification::from)
        .collect();
    Ok(Json(notifications))
}

/// GET /api/v1/notifications/:id
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Notification>, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    let notification = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))?;
    Ok(Json(notification.into()))
}

/// POST /api/v1/notifications
///
/// Dispatches the message to the donor and records the attempt. The row is
/// written even when the gateway call fails; only a gateway error turns
/// into an error response.
pub async fn create_notification(
    State(state): State<AppState>,
    Json(request): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    request.validate()?;

    let donor_repo = DonorRepository::new(state.pool.clone());
    let donor: Donor = donor_repo
        .find_by_id(request.donor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?
        .into();

    if let Some(request_id) = request.request_id {
        let request_repo = BloodRequestRepository::new(state.pool.clone());
        request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Blood request not found".to_string()))?;
    }

    let dispatcher = state.dispatcher();
    let notification = dispatcher
        .notify_donor(&donor, &request.message, request.request_id)
        .await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// POST /api/v1/notifications/notify-match/:match_id
///
/// Re-sends the match offer for an existing match and advances it to
/// Notified when the provider accepts the message.
pub async fn notify_match(
    State(state): State<AppState>,
    Path(match_id): Path<i64>,
) -> Result<(StatusCode, Json<Notification>), ApiError> {
    let match_repo = DonorMatchRepository::new(state.pool.clone());
    let donor_match = match_repo
        .find_by_id(match_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?;

    let donor_repo = DonorRepository::new(state.pool.clone());
    let donor: Donor = donor_repo
        .find_by_id(donor_match.donor_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?
        .into();

    let request_repo = BloodRequestRepository::new(state.pool.clone());
    let request = request_repo
        .find_by_id(donor_match.request_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Blood request not found".to_string()))?;

    let message = messaging::match_offer(&donor.name, &request.blood_type, &request.urgency_level);
    let dispatcher = state.dispatcher();
    let notification = dispatcher
        .notify_donor(&donor, &message, Some(request.id))
        .await?;

    if notification.status == domain::models::NotificationStatus::Sent {
        match_repo.mark_notified(donor_match.id, Utc::now()).await?;
        info!(match_id = donor_match.id, "Match notified");
    }

    Ok((StatusCode::CREATED, Json(notification)))
}

/// POST /api/v1/notifications/batch-notify-request/:request_id
///
/// Re-offers every Pending match of the request in one pass, including
/// leftovers on requests that have since moved past Pending.
pub async fn batch_notify_request(
    State(state): State<AppState>,
    Path(request_id): Path<i64>,
) -> Result<Json<BatchNotifyOutcome>, ApiError> {
    let outcome = state.lifecycle().batch_notify_request(request_id).await?;
    Ok(Json(outcome))
}

/// PUT /api/v1/notifications/:id
pub async fn update_notification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateNotificationRequest>,
) -> Result<Json<Notification>, ApiError> {
    request.validate()?;

    let repo = NotificationRepository::new(state.pool.clone());
    let entity = repo
        .update(
            id,
            request.message.as_deref(),
            request.status.map(|s| s.as_str()),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))?;

    Ok(Json(entity.into()))
}

/// DELETE /api/v1/notifications/:id
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let repo = NotificationRepository::new(state.pool.clone());
    if !repo.delete(id).await? {
        return Err(ApiError::NotFound("Notification not found".to_string()));
    }
    info!(notification_id = id, "Notification deleted");
    Ok(StatusCode::NO_CONTENT)
}
