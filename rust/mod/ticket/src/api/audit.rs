use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use helpdesk_auth::api::{AdminToken, AnyCaller};
use helpdesk_core::{ListResult, ServiceError};

use crate::api::AppState;
use crate::model::{AuditEntry, AuditFilter, RecordAudit};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/audit-log", post(record))
        .route("/admin/audit-log", get(list))
}

/// POST /audit-log: a store reports a client-side event.
async fn record(
    State(state): State<AppState>,
    AnyCaller(caller): AnyCaller,
    Json(input): Json<RecordAudit>,
) -> Result<(StatusCode, Json<AuditEntry>), ServiceError> {
    let entry = state.svc.record_audit(&caller, input)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list(
    State(state): State<AppState>,
    _: AdminToken,
    Query(filter): Query<AuditFilter>,
) -> Result<Json<ListResult<AuditEntry>>, ServiceError> {
    Ok(Json(ListResult::from_items(state.svc.list_audit(&filter)?)))
}
