use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every failure a handler can hit is folded into one of these variants, and
/// each variant renders to a fixed status code and JSON message. Details of
/// internal failures are logged, never returned to the client.
#[derive(Debug)]
pub enum ApiError {
    /// Collection or record addressed by id does not exist
    ItemNotFound,
    /// No route matches the request method and path
    RouteNotFound,
    /// Storage failure: unreadable or corrupt data file, failed write
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::ItemNotFound => (StatusCode::NOT_FOUND, "Item not found"),
            ApiError::RouteNotFound => (StatusCode::NOT_FOUND, "Not found"),
            ApiError::Internal(err) => {
                tracing::error!("Request failed: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

/// Fallback for unmatched paths and unsupported methods.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
