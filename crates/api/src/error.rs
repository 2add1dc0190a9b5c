use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Dispatch failed: {0}")]
    Dispatch(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".into(),
                )
            }
            // Unlike Internal, the gateway message stays in the body: the
            // caller needs to know the write succeeded and only the SMS
            // leg failed.
            ApiError::Dispatch(msg) => {
                tracing::warn!("Dispatch error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "dispatch_error",
                    msg.clone(),
                )
            }
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "service_unavailable",
                msg.clone(),
            ),
        };

        let body = ErrorBody {
            error: error_code.into(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ApiError::Conflict("Resource already exists".into()),
                        "23503" => ApiError::NotFound("Referenced resource not found".into()),
                        _ => ApiError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ApiError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<crate::services::dispatch::DispatchError> for ApiError {
    fn from(err: crate::services::dispatch::DispatchError) -> Self {
        use crate::services::dispatch::DispatchError;
        match err {
            DispatchError::Gateway(e) => ApiError::Dispatch(format!("SMS sending failed: {}", e)),
            DispatchError::Database(e) => e.into(),
        }
    }
}

/// Map a foreign-key violation on a DELETE to 409.
///
/// The generic 23503 mapping reads the violation as a missing referenced
/// row, which fits inserts; on a delete the row exists and dependent rows
/// still point at it.
pub fn delete_conflict(err: sqlx::Error, message: &str) -> ApiError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23503") {
            return ApiError::Conflict(message.to_string());
        }
    }
    err.into()
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let message = e.message.clone().map(|m| m.to_string()).unwrap_or_default();
                    format!("{}: {}", field, message)
                })
            })
            .collect();

        ApiError::Validation(details.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound("Donor not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response = ApiError::Validation("age out of range".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let response = ApiError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_row_not_found_converts_to_not_found() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_dispatch_error_keeps_message_in_body() {
        let response =
            ApiError::Dispatch("SMS sending failed: connection timed out".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "dispatch_error");
        assert_eq!(body["message"], "SMS sending failed: connection timed out");
    }

    #[tokio::test]
    async fn test_internal_error_hides_message_in_body() {
        let response = ApiError::Internal("pool exhausted".into()).into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "An internal error occurred");
    }

    #[test]
    fn test_delete_conflict_passes_through_other_errors() {
        let err = delete_conflict(sqlx::Error::RowNotFound, "still referenced");
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
