use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use service::pagination::PageRequest;
use service::ship::{ShipFilter, ShipInput, ShipOrder};
use tracing::info;

use crate::{errors::JsonApiError, metrics, state::AppState};

#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    #[serde(default)]
    pub order: ShipOrder,
}

/// Path ids must be a plain positive decimal integer; `0`, signs and
/// anything non-numeric are client errors rather than misses.
pub fn parse_id(raw: &str) -> Result<i64, JsonApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(JsonApiError::bad_request(format!("wrong id: {raw:?}")));
    }
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(JsonApiError::bad_request(format!("wrong id: {raw:?}"))),
    }
}

#[utoipa::path(
    get, path = "/rest/ships", tag = "ships",
    params(crate::openapi::ShipFilterDoc, crate::openapi::ShipListDoc),
    responses(
        (status = 200, description = "One page of matching ships", body = [crate::openapi::ShipDoc]),
        (status = 400, description = "Malformed filter or paging parameter")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<ShipFilter>, QueryRejection>,
    order: Result<Query<OrderQuery>, QueryRejection>,
    page: Result<Query<PageRequest>, QueryRejection>,
) -> Result<Json<Vec<models::ship::Model>>, JsonApiError> {
    let Query(filter) = filter?;
    let Query(OrderQuery { order }) = order?;
    let Query(page) = page?;
    let rows = state.ships.list(&filter, order, page).await?;
    info!(count = rows.len(), ?order, page = page.page_number, "list ships");
    Ok(Json(rows))
}

#[utoipa::path(
    get, path = "/rest/ships/count", tag = "ships",
    params(crate::openapi::ShipFilterDoc),
    responses(
        (status = 200, description = "Number of matching ships", body = u64),
        (status = 400, description = "Malformed filter parameter")
    )
)]
pub async fn count(
    State(state): State<AppState>,
    filter: Result<Query<ShipFilter>, QueryRejection>,
) -> Result<Json<u64>, JsonApiError> {
    let Query(filter) = filter?;
    Ok(Json(state.ships.count(&filter).await?))
}

#[utoipa::path(
    post, path = "/rest/ships", tag = "ships",
    request_body = crate::openapi::ShipInputDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::ShipDoc),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    input: Result<Json<ShipInput>, JsonRejection>,
) -> Result<Json<models::ship::Model>, JsonApiError> {
    let Json(input) = input?;
    let created = state.ships.create(input).await?;
    metrics::record_change("created");
    info!(id = created.id, name = %created.name, rating = created.rating, "created ship");
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive ship id")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ShipDoc),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<Json<models::ship::Model>, JsonApiError> {
    let id = parse_id(&raw_id)?;
    Ok(Json(state.ships.get(id).await?))
}

#[utoipa::path(
    post, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive ship id")),
    request_body = crate::openapi::ShipInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ShipDoc),
        (status = 400, description = "Malformed id or Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    input: Result<Json<ShipInput>, JsonRejection>,
) -> Result<Json<models::ship::Model>, JsonApiError> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = input?;
    let updated = state.ships.edit(id, patch).await?;
    metrics::record_change("updated");
    info!(id = updated.id, rating = updated.rating, "updated ship");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/rest/ships/{id}", tag = "ships",
    params(("id" = String, Path, description = "Positive ship id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = parse_id(&raw_id)?;
    state.ships.delete(id).await?;
    metrics::record_change("deleted");
    info!(id, "deleted ship");
    Ok(StatusCode::OK)
}

/// `/rest/ships/` with nothing after the slash: an empty id, not a miss.
pub async fn empty_id() -> JsonApiError {
    JsonApiError::bad_request("wrong id: \"\"")
}
