use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use helpdesk_auth::api::AdminToken;
use helpdesk_core::{ListResult, ServiceError};

use crate::api::AppState;
use crate::model::{CreateStore, PinReset, Store, UpdateStore};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/stores", get(list_stores).post(create_store))
        .route("/admin/stores/{id}", patch(update_store))
        .route("/admin/stores/{id}/reset-pin", post(reset_pin))
}

async fn list_stores(
    State(state): State<AppState>,
    _: AdminToken,
) -> Result<Json<ListResult<Store>>, ServiceError> {
    Ok(Json(ListResult::from_items(state.svc.list_stores()?)))
}

async fn create_store(
    State(state): State<AppState>,
    _: AdminToken,
    Json(input): Json<CreateStore>,
) -> Result<(StatusCode, Json<Store>), ServiceError> {
    let store = state.svc.create_store(input)?;
    Ok((StatusCode::CREATED, Json(store)))
}

async fn update_store(
    State(state): State<AppState>,
    _: AdminToken,
    Path(id): Path<String>,
    Json(patch): Json<UpdateStore>,
) -> Result<Json<Store>, ServiceError> {
    Ok(Json(state.svc.update_store(&id, patch)?))
}

/// POST /admin/stores/{id}/reset-pin: the new PIN is only ever shown here.
async fn reset_pin(
    State(state): State<AppState>,
    _: AdminToken,
    Path(id): Path<String>,
) -> Result<Json<PinReset>, ServiceError> {
    Ok(Json(state.svc.reset_pin(&id)?))
}
