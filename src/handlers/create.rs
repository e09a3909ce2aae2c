use crate::document::{Record, ID_FIELD};
use crate::error::{ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use crate::store::mutate;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// POST /api/{collection} handler - Append a new record
///
/// The record gets a server-generated UUID v4 `id`, overriding any `id` in the
/// body. Posting to an unknown collection creates it. A request without a JSON
/// content type is treated as an empty body.
#[utoipa::path(
    post,
    path = routes::COLLECTION,
    params(
        ("collection" = String, Path, description = "Collection name")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Record created", body = serde_json::Value),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Body is not a JSON object"),
        (status = 500, description = "Data file unreadable or unwritable", body = ErrorResponse)
    ),
    tag = "collections"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    body: Option<Json<Record>>,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let body = body.map(|Json(body)| body).unwrap_or_default();

    let record = mutate(state.store.as_ref(), |document| {
        Some(document.create(&collection, body))
    })
    .await?
    .ok_or_else(|| anyhow::anyhow!("create produced no record"))?;

    tracing::info!(
        "Created record {} in collection: {}",
        record.get(ID_FIELD).and_then(|id| id.as_str()).unwrap_or_default(),
        collection
    );
    Ok((StatusCode::CREATED, Json(record)))
}
