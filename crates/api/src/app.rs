use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use domain::services::sms::SmsGateway;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{
    blood_requests, donation_records, donor_matches, donors, health, hospitals, notifications,
};
use crate::services::{MatchLifecycle, NotificationDispatcher};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub sms: Arc<dyn SmsGateway>,
}

impl AppState {
    pub fn dispatcher(&self) -> NotificationDispatcher {
        NotificationDispatcher::new(
            self.pool.clone(),
            self.sms.clone(),
            self.config.sms.default_country_code.clone(),
        )
    }

    pub fn lifecycle(&self) -> MatchLifecycle {
        MatchLifecycle::new(
            self.pool.clone(),
            self.sms.clone(),
            self.config.sms.default_country_code.clone(),
        )
    }
}

pub fn create_app(config: Config, pool: PgPool, sms: Arc<dyn SmsGateway>) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        sms,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Hospital routes
        .route(
            "/api/v1/hospitals",
            get(hospitals::list_hospitals).post(hospitals::create_hospital),
        )
        .route(
            "/api/v1/hospitals/:id",
            get(hospitals::get_hospital)
                .put(hospitals::update_hospital)
                .delete(hospitals::delete_hospital),
        )
        // Donor routes
        .route(
            "/api/v1/donors",
            get(donors::list_donors).post(donors::create_donor),
        )
        .route(
            "/api/v1/donors/:id",
            get(donors::get_donor)
                .put(donors::update_donor)
                .delete(donors::delete_donor),
        )
        // Blood request routes
        .route(
            "/api/v1/blood_requests",
            get(blood_requests::list_blood_requests).post(blood_requests::create_blood_request),
        )
        .route(
            "/api/v1/blood_requests/:id",
            get(blood_requests::get_blood_request)
                .put(blood_requests::update_blood_request)
                .delete(blood_requests::delete_blood_request),
        )
        // Donor match routes
        .route("/api/v1/donor_matches", get(donor_matches::list_matches))
        .route(
            "/api/v1/donor_matches/create_match",
            post(donor_matches::create_match),
        )
        .route(
            "/api/v1/donor_matches/batch-match",
            post(donor_matches::batch_match),
        )
        .route(
            "/api/v1/donor_matches/find-matches/:request_id",
            get(donor_matches::find_matches),
        )
        .route(
            "/api/v1/donor_matches/:id",
            get(donor_matches::get_match)
                .put(donor_matches::update_match)
                .delete(donor_matches::delete_match),
        )
        // Notification routes
        .route(
            "/api/v1/notifications",
            get(notifications::list_notifications).post(notifications::create_notification),
        )
        .route(
            "/api/v1/notifications/notify-match/:match_id",
            post(notifications::notify_match),
        )
        .route(
            "/api/v1/notifications/batch-notify-request/:request_id",
            post(notifications::batch_notify_request),
        )
        .route(
            "/api/v1/notifications/:id",
            get(notifications::get_notification)
                .put(notifications::update_notification)
                .delete(notifications::delete_notification),
        )
        // Donation record routes
        .route(
            "/api/v1/donation_records",
            get(donation_records::list_donation_records)
                .post(donation_records::create_donation_record),
        )
        .route(
            "/api/v1/donation_records/:id",
            get(donation_records::get_donation_record)
                .delete(donation_records::delete_donation_record),
        );

    // keep PUT donor availability as a dedicated route for clients that
    // only toggle the flag
    let api_routes = api_routes.route(
        "/api/v1/donors/:id/availability",
        put(donors::set_donor_availability),
    );

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
