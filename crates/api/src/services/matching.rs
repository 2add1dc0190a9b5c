//! Match lifecycle engine.
//!
//! Creates donor matches, walks them through their status transitions and
//! triggers the SMS side effects each transition carries. Notification
//! failures around a committed write are logged and counted, never
//! propagated; the match and request state changes are the source of truth.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use domain::models::{
    donor_match::BatchMatchOutcome, notification::BatchNotifyOutcome, BloodRequest, Donor,
    DonorMatch, MatchStatus, NotificationStatus, RequestStatus,
};
use domain::services::sms::SmsGateway;
use domain::services::{eligible_donors, messaging, select_replacement};
use persistence::repositories::{BloodRequestRepository, DonorMatchRepository, DonorRepository};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::middleware::metrics::{record_batch_matches_created, record_swallowed_dispatch_failure};
use crate::services::dispatch::NotificationDispatcher;

pub struct MatchLifecycle {
    pool: PgPool,
    dispatcher: NotificationDispatcher,
}

impl MatchLifecycle {
    pub fn new(pool: PgPool, sms: Arc<dyn SmsGateway>, default_country_code: String) -> Self {
        let dispatcher = NotificationDispatcher::new(pool.clone(), sms, default_country_code);
        Self { pool, dispatcher }
    }

    /// Create a match between a request and a donor.
    ///
    /// Both sides must exist (404 otherwise). A duplicate (request, donor)
    /// pair is not an error: the existing match is returned and the second
    /// element of the result is false. A freshly created Pending match is
    /// immediately offered to the donor by SMS and advances to Notified
    /// when the provider accepts the message; a dispatch failure leaves it
    /// Pending and never fails the create.
    pub async fn create_match(
        &self,
        request_id: i64,
        donor_id: i64,
        status: Option<MatchStatus>,
    ) -> Result<(DonorMatch, bool), ApiError> {
        let request_repo = BloodRequestRepository::new(self.pool.clone());
        let request: BloodRequest = request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Blood request not found".to_string()))?
            .into();

        let donor_repo = DonorRepository::new(self.pool.clone());
        let donor: Donor = donor_repo
            .find_by_id(donor_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Donor not found".to_string()))?
            .into();

        let status = status.unwrap_or(MatchStatus::Pending);
        let match_repo = DonorMatchRepository::new(self.pool.clone());

        let entity = match match_repo
            .create(request_id, donor_id, status.as_str())
            .await?
        {
            Some(entity) => entity,
            None => {
                // Unique constraint hit: this pair is already matched.
                let existing = match_repo
                    .find_by_pair(request_id, donor_id)
                    .await?
                    .ok_or_else(|| {
                        ApiError::Internal("Match disappeared during creation".to_string())
                    })?;
                info!(
                    match_id = existing.id,
                    request_id, donor_id, "Match already exists, returning it"
                );
                return Ok((existing.into(), false));
            }
        };

        let mut donor_match: DonorMatch = entity.into();
        info!(
            match_id = donor_match.id,
            request_id, donor_id, "Match created"
        );

        if status == MatchStatus::Pending {
            donor_match = self.offer_match(&donor, &request, donor_match).await?;
        }

        Ok((donor_match, true))
    }

    /// Send the match offer SMS and advance the match to Notified when the
    /// provider accepts it. Failures leave the match Pending.
    async fn offer_match(
        &self,
        donor: &Donor,
        request: &BloodRequest,
        donor_match: DonorMatch,
    ) -> Result<DonorMatch, ApiError> {
        let message =
            messaging::match_offer(&donor.name, &request.blood_type, &request.urgency_level);

        match self
            .dispatcher
            .notify_donor(donor, &message, Some(request.id))
            .await
        {
            Ok(notification) if notification.status == NotificationStatus::Sent => {
                let match_repo = DonorMatchRepository::new(self.pool.clone());
                let updated = match_repo
                    .mark_notified(donor_match.id, Utc::now())
                    .await?
                    .map(DonorMatch::from)
                    .unwrap_or(donor_match);
                Ok(updated)
            }
            Ok(_) => {
                warn!(
                    match_id = donor_match.id,
                    "Match offer SMS not delivered, match stays Pending"
                );
                record_swallowed_dispatch_failure("match_offer");
                Ok(donor_match)
            }
            Err(e) => {
                warn!(match_id = donor_match.id, error = %e, "Match offer dispatch failed");
                record_swallowed_dispatch_failure("match_offer");
                Ok(donor_match)
            }
        }
    }

    /// Update a match's status and/or notified_at, running the side effects
    /// a status change carries.
    pub async fn update_match(
        &self,
        id: i64,
        status: Option<MatchStatus>,
        notified_at: Option<chrono::DateTime<Utc>>,
    ) -> Result<DonorMatch, ApiError> {
        let match_repo = DonorMatchRepository::new(self.pool.clone());
        let existing = match_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?;
        let previous_status = MatchStatus::parse(&existing.status);

        let updated: DonorMatch = match_repo
            .update(id, status.map(|s| s.as_str()), notified_at)
            .await?
            .ok_or_else(|| ApiError::NotFound("Match not found".to_string()))?
            .into();

        if let Some(new_status) = status {
            if previous_status != Some(new_status) {
                self.run_transition_effects(&updated, new_status).await?;
            }
        }

        Ok(updated)
    }

    /// Side effects of a status transition. SMS failures are swallowed;
    /// request status updates and replacement matching propagate errors.
    async fn run_transition_effects(
        &self,
        donor_match: &DonorMatch,
        new_status: MatchStatus,
    ) -> Result<(), ApiError> {
        let donor_repo = DonorRepository::new(self.pool.clone());
        let request_repo = BloodRequestRepository::new(self.pool.clone());

        let donor: Option<Donor> = donor_repo
            .find_by_id(donor_match.donor_id)
            .await?
            .map(Donor::from);
        let request: Option<BloodRequest> = request_repo
            .find_by_id(donor_match.request_id)
            .await?
            .map(BloodRequest::from);

        let (Some(donor), Some(request)) = (donor, request) else {
            // Row deleted between the update and here; nothing to notify.
            warn!(
                match_id = donor_match.id,
                "Donor or request missing during transition effects"
            );
            return Ok(());
        };

        match new_status {
            MatchStatus::Accepted => {
                self.notify_donor_swallowing(
                    &donor,
                    &messaging::acceptance_ack(&donor.name),
                    Some(request.id),
                    "acceptance_ack",
                )
                .await;
                self.dispatcher
                    .notify_contact(
                        &request.contact_number,
                        &messaging::requester_accepted(&donor.name, &request.blood_type),
                        "requester_accepted",
                    )
                    .await;
                request_repo
                    .set_status(request.id, RequestStatus::Matched.as_str())
                    .await?;
                info!(request_id = request.id, "Request marked Matched");
            }
            MatchStatus::Declined => {
                self.notify_donor_swallowing(
                    &donor,
                    &messaging::decline_ack(&donor.name),
                    Some(request.id),
                    "decline_ack",
                )
                .await;
                self.find_replacement(&request, donor.id).await?;
            }
            MatchStatus::Completed => {
                self.notify_donor_swallowing(
                    &donor,
                    &messaging::completion_thanks(&donor.name),
                    Some(request.id),
                    "completion_thanks",
                )
                .await;
                self.dispatcher
                    .notify_contact(
                        &request.contact_number,
                        &messaging::requester_completed(&request.blood_type),
                        "requester_completed",
                    )
                    .await;
                request_repo
                    .set_status(request.id, RequestStatus::Completed.as_str())
                    .await?;
                info!(request_id = request.id, "Request marked Completed");
            }
            MatchStatus::Pending | MatchStatus::Notified => {
                self.notify_donor_swallowing(
                    &donor,
                    &messaging::status_update(&donor.name, new_status.as_str()),
                    Some(request.id),
                    "status_update",
                )
                .await;
            }
        }

        Ok(())
    }

    /// Create at most one replacement match after a decline.
    async fn find_replacement(
        &self,
        request: &BloodRequest,
        declined_donor_id: i64,
    ) -> Result<(), ApiError> {
        let donor_repo = DonorRepository::new(self.pool.clone());
        let match_repo = DonorMatchRepository::new(self.pool.clone());

        let donors: Vec<Donor> = donor_repo
            .list_available()
            .await?
            .into_iter()
            .map(Donor::from)
            .collect();
        let already_matched = match_repo.donor_ids_for_request(request.id).await?;

        let Some(replacement) = select_replacement(
            &donors,
            &request.blood_type,
            declined_donor_id,
            &already_matched,
        ) else {
            info!(
                request_id = request.id,
                "No replacement donor available after decline"
            );
            return Ok(());
        };

        let replacement_id = replacement.id;
        let (created, _) = self.create_match(request.id, replacement_id, None).await?;
        info!(
            request_id = request.id,
            donor_id = replacement_id,
            match_id = created.id,
            "Replacement match created after decline"
        );
        Ok(())
    }

    /// Re-offer every Pending match of one request, whatever the request's
    /// own status. Recovers matches whose offer SMS never went out without
    /// touching them one at a time.
    pub async fn batch_notify_request(
        &self,
        request_id: i64,
    ) -> Result<BatchNotifyOutcome, ApiError> {
        let request_repo = BloodRequestRepository::new(self.pool.clone());
        let request: BloodRequest = request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Blood request not found".to_string()))?
            .into();

        let match_repo = DonorMatchRepository::new(self.pool.clone());
        let donor_repo = DonorRepository::new(self.pool.clone());
        let pending = match_repo
            .list_by_request_and_status(request_id, MatchStatus::Pending.as_str())
            .await?;

        let mut notifications_sent: u64 = 0;
        let mut notifications_failed: u64 = 0;

        for entity in pending {
            let donor_match: DonorMatch = entity.into();
            let Some(donor) = donor_repo
                .find_by_id(donor_match.donor_id)
                .await?
                .map(Donor::from)
            else {
                warn!(
                    match_id = donor_match.id,
                    "Donor missing for pending match, skipping"
                );
                continue;
            };

            let offered = self.offer_match(&donor, &request, donor_match).await?;
            if offered.status == MatchStatus::Notified {
                notifications_sent += 1;
            } else {
                notifications_failed += 1;
            }
        }

        info!(
            request_id,
            notifications_sent, notifications_failed, "Batch notify run finished"
        );

        Ok(BatchNotifyOutcome {
            request_id,
            notifications_sent,
            notifications_failed,
        })
    }

    /// Read-only list of donors that could serve a request right now.
    pub async fn find_potential_matches(&self, request_id: i64) -> Result<Vec<Donor>, ApiError> {
        let request_repo = BloodRequestRepository::new(self.pool.clone());
        let request: BloodRequest = request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Blood request not found".to_string()))?
            .into();

        let donor_repo = DonorRepository::new(self.pool.clone());
        let donors: Vec<Donor> = donor_repo
            .list_available()
            .await?
            .into_iter()
            .map(Donor::from)
            .collect();

        Ok(eligible_donors(&donors, &request.blood_type)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Match every Pending request against the current donor pool.
    ///
    /// Already-matched pairs are skipped, so re-running the batch is
    /// idempotent against an unchanged pool. Requests that end the run with
    /// no compatible available donor get one "no matches yet" SMS to their
    /// contact number.
    pub async fn batch_match(&self) -> Result<BatchMatchOutcome, ApiError> {
        let request_repo = BloodRequestRepository::new(self.pool.clone());
        let donor_repo = DonorRepository::new(self.pool.clone());
        let match_repo = DonorMatchRepository::new(self.pool.clone());

        let requests: Vec<BloodRequest> = request_repo
            .list_by_status(RequestStatus::Pending.as_str())
            .await?
            .into_iter()
            .map(BloodRequest::from)
            .collect();

        let donors: Vec<Donor> = donor_repo
            .list_available()
            .await?
            .into_iter()
            .map(Donor::from)
            .collect();
        let donors_by_id: HashMap<i64, &Donor> = donors.iter().map(|d| (d.id, d)).collect();

        let mut matches_created: u64 = 0;
        let mut unmatched_requests: Vec<&BloodRequest> = Vec::new();

        for request in &requests {
            let already_matched = match_repo.donor_ids_for_request(request.id).await?;
            let candidates: Vec<&Donor> = eligible_donors(&donors, &request.blood_type)
                .into_iter()
                .filter(|d| !already_matched.contains(&d.id))
                .collect();

            if candidates.is_empty() {
                // Only requests with no matches at all get the
                // "no matches yet" message; fully-matched requests are done
                if already_matched.is_empty() {
                    unmatched_requests.push(request);
                }
                continue;
            }

            for candidate in candidates {
                if match_repo
                    .create(request.id, candidate.id, MatchStatus::Pending.as_str())
                    .await?
                    .is_some()
                {
                    matches_created += 1;
                }
            }

            // Offer every Pending match for this request, including leftovers
            // from earlier runs whose SMS never went out.
            let pending = match_repo
                .list_by_request_and_status(request.id, MatchStatus::Pending.as_str())
                .await?;
            for entity in pending {
                let donor_match: DonorMatch = entity.into();
                if let Some(donor) = donors_by_id.get(&donor_match.donor_id).copied() {
                    self.offer_match(donor, request, donor_match).await?;
                }
            }
        }

        for request in &unmatched_requests {
            self.dispatcher
                .notify_contact(
                    &request.contact_number,
                    &messaging::requester_no_match(),
                    "requester_no_match",
                )
                .await;
        }

        record_batch_matches_created(matches_created);
        info!(
            requests = requests.len(),
            matches_created,
            without_matches = unmatched_requests.len(),
            "Batch match run finished"
        );

        Ok(BatchMatchOutcome {
            matches_created,
            requests_with_no_matches: unmatched_requests.len() as u64,
        })
    }

    async fn notify_donor_swallowing(
        &self,
        donor: &Donor,
        message: &str,
        request_id: Option<i64>,
        context: &'static str,
    ) {
        match self.dispatcher.notify_donor(donor, message, request_id).await {
            Ok(notification) if notification.status == NotificationStatus::Sent => {}
            Ok(_) => {
                record_swallowed_dispatch_failure(context);
            }
            Err(e) => {
                warn!(donor_id = donor.id, context, error = %e, "Donor notification failed");
                record_swallowed_dispatch_failure(context);
            }
        }
    }
}
