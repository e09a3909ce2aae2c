use crate::document::Record;
use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use crate::store::mutate;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// PUT /api/{collection}/{id} handler - Merge fields into an existing record
///
/// Fields in the body overwrite the stored ones, absent fields are kept and
/// the `id` always stays the one from the path. Without a JSON content type
/// the body is empty and the record comes back unchanged.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("collection" = String, Path, description = "Collection name"),
        ("id" = String, Path, description = "Record id")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Merged record", body = serde_json::Value),
        (status = 400, description = "Malformed JSON body"),
        (status = 404, description = "Collection or record not found", body = ErrorResponse),
        (status = 422, description = "Body is not a JSON object"),
        (status = 500, description = "Data file unreadable or unwritable", body = ErrorResponse)
    ),
    tag = "collections"
)]
pub async fn replace_handler(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    body: Option<Json<Record>>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();

    let merged = mutate(state.store.as_ref(), |document| {
        document.replace(&collection, &id, body)
    })
    .await?;

    match merged {
        Some(record) => {
            tracing::info!("Replaced record {} in collection: {}", id, collection);
            Ok((StatusCode::OK, Json(record)))
        }
        None => {
            tracing::info!("Record {} not found in collection: {}", id, collection);
            Err(ApiError::ItemNotFound)
        }
    }
}
