use crate::document::Record;
use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /api/{collection}/{id} handler - Retrieve one record
#[utoipa::path(
    get,
    path = routes::ITEM,
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record found", body = serde_json::Value),
        (status = 404, description = "Collection or record not found", body = ErrorResponse),
        (status = 500, description = "Data file unreadable", body = ErrorResponse)
    ),
    tag = "collections"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let document = state.store.load().await?;

    match document.get(&collection, &id) {
        Some(record) => {
            tracing::info!("Retrieved record {} from collection: {}", id, collection);
            Ok((StatusCode::OK, Json(record.clone())))
        }
        None => {
            tracing::info!("Record {} not found in collection: {}", id, collection);
            Err(ApiError::ItemNotFound)
        }
    }
}
