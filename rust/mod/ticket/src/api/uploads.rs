use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

use helpdesk_core::ServiceError;

use crate::api::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/uploads/{name}", get(download))
}

/// GET /uploads/{name}: raw attachment bytes.
async fn download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
    let (mime, data) = state.svc.read_upload(&name)?;
    Ok(([(header::CONTENT_TYPE, mime)], data))
}
