use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use crate::store::mutate;
use axum::{extract::Path, extract::State, http::StatusCode};

/// DELETE /api/{collection}/{id} handler - Remove a record
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 404, description = "Collection or record not found", body = ErrorResponse),
        (status = 500, description = "Data file unreadable or unwritable", body = ErrorResponse)
    ),
    tag = "collections"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let deleted = mutate(state.store.as_ref(), |document| {
        document.delete(&collection, &id).then_some(())
    })
    .await?;

    if deleted.is_none() {
        tracing::info!("Record {} not found in collection: {}", id, collection);
        return Err(ApiError::ItemNotFound);
    }

    tracing::info!("Deleted record {} from collection: {}", id, collection);
    Ok(StatusCode::NO_CONTENT)
}
