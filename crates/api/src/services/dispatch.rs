//! Notification dispatcher.
//!
//! Sends SMS through the injected gateway and records every donor-facing
//! dispatch attempt as a `Notification` row, including attempts where the
//! gateway call itself failed. Requester-facing messages have no donor row
//! to hang an audit record on; those are logged and counted only.

use std::sync::Arc;

use chrono::Utc;
use domain::models::{Donor, Notification, NotificationStatus};
use domain::services::sms::{SmsGateway, SmsGatewayError};
use persistence::repositories::NotificationRepository;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::middleware::metrics::{record_sms_dispatch, record_swallowed_dispatch_failure};

/// Errors surfaced by the dispatcher.
///
/// A logical delivery failure (provider reports a non-Success status) is
/// not an error; it shows up as a `Failed` notification row instead.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Gateway(#[from] SmsGatewayError),

    #[error("Failed to persist notification: {0}")]
    Database(#[from] sqlx::Error),
}

pub struct NotificationDispatcher {
    pool: PgPool,
    sms: Arc<dyn SmsGateway>,
    default_country_code: String,
}

impl NotificationDispatcher {
    pub fn new(pool: PgPool, sms: Arc<dyn SmsGateway>, default_country_code: String) -> Self {
        Self {
            pool,
            sms,
            default_country_code,
        }
    }

    /// Send `message` to a donor and record the attempt.
    ///
    /// The notification row is written regardless of the outcome: `Sent`
    /// when the provider accepted the message, `Failed` otherwise. Only a
    /// gateway error (network, auth, provider outage) is returned as an
    /// error, and even then the `Failed` row has already been persisted.
    pub async fn notify_donor(
        &self,
        donor: &Donor,
        message: &str,
        request_id: Option<i64>,
    ) -> Result<Notification, DispatchError> {
        let recipient = shared::phone::normalize_msisdn(&donor.phone, &self.default_country_code);
        let recipients = vec![recipient];

        let (status, gateway_error) = match self.sms.send(message, &recipients).await {
            Ok(report) if report.first_delivered() => (NotificationStatus::Sent, None),
            Ok(report) => {
                let detail = report
                    .recipients
                    .first()
                    .map(|r| r.status.clone())
                    .unwrap_or_else(|| "no recipients in report".to_string());
                warn!(
                    donor_id = donor.id,
                    detail = %detail,
                    "SMS delivery rejected by provider"
                );
                (NotificationStatus::Failed, None)
            }
            Err(e) => {
                warn!(donor_id = donor.id, error = %e, "SMS gateway call failed");
                (NotificationStatus::Failed, Some(e))
            }
        };

        record_sms_dispatch(status == NotificationStatus::Sent);

        let repo = NotificationRepository::new(self.pool.clone());
        let entity = repo
            .create(donor.id, request_id, message, status.as_str(), Utc::now())
            .await?;
        let notification: Notification = entity.into();

        info!(
            notification_id = notification.id,
            donor_id = donor.id,
            status = %status.as_str(),
            "Notification recorded"
        );

        match gateway_error {
            Some(e) => Err(DispatchError::Gateway(e)),
            None => Ok(notification),
        }
    }

    /// Best-effort SMS to an arbitrary contact number (request submitters).
    ///
    /// No audit row is written; failures are logged and counted under the
    /// given context label and never propagated.
    pub async fn notify_contact(&self, phone: &str, message: &str, context: &'static str) {
        let recipient = shared::phone::normalize_msisdn(phone, &self.default_country_code);
        match self.sms.send(message, &[recipient]).await {
            Ok(report) if report.first_delivered() => {
                info!(context, "Contact SMS delivered");
            }
            Ok(_) => {
                warn!(context, "Contact SMS rejected by provider");
                record_swallowed_dispatch_failure(context);
            }
            Err(e) => {
                warn!(context, error = %e, "Contact SMS gateway call failed");
                record_swallowed_dispatch_failure(context);
            }
        }
    }
}
