//! Periodic batch matching job.
//!
//! Off by default; when enabled it runs the same batch matcher the
//! on-demand endpoint triggers, so requests posted while nobody calls the
//! API still get donors offered to them.

use std::sync::Arc;

use domain::services::sms::SmsGateway;
use sqlx::PgPool;
use tracing::info;

use super::scheduler::{Job, JobFrequency};
use crate::services::MatchLifecycle;

pub struct BatchMatchJob {
    lifecycle: MatchLifecycle,
    interval_minutes: u64,
}

impl BatchMatchJob {
    pub fn new(
        pool: PgPool,
        sms: Arc<dyn SmsGateway>,
        default_country_code: String,
        interval_minutes: u64,
    ) -> Self {
        Self {
            lifecycle: MatchLifecycle::new(pool, sms, default_country_code),
            interval_minutes,
        }
    }
}

#[async_trait::async_trait]
impl Job for BatchMatchJob {
    fn name(&self) -> &'static str {
        "batch_match"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(self.interval_minutes)
    }

    async fn execute(&self) -> Result<(), String> {
        let outcome = self
            .lifecycle
            .batch_match()
            .await
            .map_err(|e| format!("Batch match failed: {}", e))?;

        info!(
            matches_created = outcome.matches_created,
            requests_with_no_matches = outcome.requests_with_no_matches,
            "Scheduled batch match finished"
        );
        Ok(())
    }
}
