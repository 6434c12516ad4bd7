//! Unified error handling for the dashboard.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::ApiError;
use crate::services::{ExportError, SessionError};

/// Application-level error type for the dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// The data source failed.
    #[error("Data source error: {0}")]
    Api(#[from] ApiError),

    /// Building a CSV download failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Session operation failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// No page at this path.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Api(_) | Self::Session(SessionError::Closed) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Session(SessionError::Superseded) => StatusCode::CONFLICT,
            Self::Export(ExportError::NoData) => StatusCode::BAD_REQUEST,
            Self::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Report server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Dashboard request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Export(ExportError::NoData) => crate::services::NO_DATA_MESSAGE.to_string(),
            Self::Export(_) => "Internal server error".to_string(),
            Self::Api(_) => "Data source unavailable".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context for the signed-in operator.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("/reports".to_string());
        assert_eq!(err.to_string(), "Not found: /reports");

        let err = AppError::Session(SessionError::Closed);
        assert_eq!(err.to_string(), "Session error: session is closed");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Export(ExportError::NotARecord { index: 0 })),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Api(ApiError::Unavailable {
                resource: "customers"
            })),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            get_status(AppError::Export(ExportError::NoData)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Session(SessionError::Superseded)),
            StatusCode::CONFLICT
        );
    }
}
