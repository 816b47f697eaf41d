use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::constants::CONTACT_NOT_FOUND;
use crate::services::ServiceError;
use crate::store::StoreError;

/// Error returned by HTTP handlers, rendered as `{"detail": ...}`
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    /// Request rejected by an extractor before reaching the handler
    Rejection(StatusCode, String),
    Service(ServiceError),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl ApiError {
    fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, CONTACT_NOT_FOUND.to_string()),
            ApiError::Rejection(status, detail) => {
                debug!("Rejected request: {}", detail);
                (*status, detail.clone())
            }
            ApiError::Service(ServiceError::Validation(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            ApiError::Service(ServiceError::Store(err @ StoreError::DuplicateEmail(_))) => {
                (StatusCode::CONFLICT, err.to_string())
            }
            ApiError::Service(ServiceError::Store(err @ StoreError::Database(_))) => {
                error!("Contact store failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
