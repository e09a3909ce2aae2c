use crate::document::Record;
use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /api/{collection} handler - List every record in a collection
///
/// A collection that was never written to lists as an empty array.
#[utoipa::path(
    get,
    path = routes::COLLECTION,
    params(
        ("collection" = String, Path, description = "Collection name")
    ),
    responses(
        (status = 200, description = "Records in insertion order", body = Vec<serde_json::Value>),
        (status = 500, description = "Data file unreadable", body = ErrorResponse)
    ),
    tag = "collections"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Result<(StatusCode, Json<Vec<Record>>), ApiError> {
    let document = state.store.load().await?;
    let records = document.list(&collection).to_vec();

    tracing::info!("Listed {} records from collection: {}", records.len(), collection);
    Ok((StatusCode::OK, Json(records)))
}
