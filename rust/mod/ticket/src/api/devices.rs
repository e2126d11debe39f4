use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};

use helpdesk_auth::api::AdminToken;
use helpdesk_core::{ListResult, ServiceError};

use crate::api::AppState;
use crate::model::{CreateDevice, Device, UpdateDevice};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/stores/{id}/devices",
            get(list_devices).post(create_device),
        )
        .route(
            "/admin/devices/{id}",
            patch(update_device).delete(delete_device),
        )
        .route("/stores/{id}/devices", get(public_devices))
}

async fn list_devices(
    State(state): State<AppState>,
    _: AdminToken,
    Path(store_id): Path<String>,
) -> Result<Json<ListResult<Device>>, ServiceError> {
    Ok(Json(ListResult::from_items(state.svc.list_devices(&store_id)?)))
}

async fn create_device(
    State(state): State<AppState>,
    _: AdminToken,
    Path(store_id): Path<String>,
    Json(input): Json<CreateDevice>,
) -> Result<(StatusCode, Json<Device>), ServiceError> {
    let device = state.svc.create_device(&store_id, input)?;
    Ok((StatusCode::CREATED, Json(device)))
}

async fn update_device(
    State(state): State<AppState>,
    _: AdminToken,
    Path(id): Path<String>,
    Json(patch): Json<UpdateDevice>,
) -> Result<Json<Device>, ServiceError> {
    Ok(Json(state.svc.update_device(&id, patch)?))
}

async fn delete_device(
    State(state): State<AppState>,
    _: AdminToken,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    state.svc.delete_device(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /stores/{id}/devices: unauthenticated, used by the ticket form.
async fn public_devices(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<ListResult<Device>>, ServiceError> {
    Ok(Json(ListResult::from_items(state.svc.list_devices(&store_id)?)))
}
