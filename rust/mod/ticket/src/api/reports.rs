use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use helpdesk_auth::api::AdminToken;
use helpdesk_core::ServiceError;

use crate::api::AppState;
use crate::model::{Overview, StoreCategoryCount, Timeline};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/reports/overview", get(overview))
        .route("/admin/reports/store-category", get(store_category))
        .route("/admin/reports/timeline", get(timeline))
}

#[derive(Debug, Deserialize)]
struct TimelineQuery {
    days: Option<i64>,
}

async fn overview(
    State(state): State<AppState>,
    _: AdminToken,
) -> Result<Json<Overview>, ServiceError> {
    Ok(Json(state.svc.report_overview()?))
}

async fn store_category(
    State(state): State<AppState>,
    _: AdminToken,
) -> Result<Json<Vec<StoreCategoryCount>>, ServiceError> {
    Ok(Json(state.svc.report_store_category()?))
}

async fn timeline(
    State(state): State<AppState>,
    _: AdminToken,
    Query(q): Query<TimelineQuery>,
) -> Result<Json<Timeline>, ServiceError> {
    Ok(Json(state.svc.report_timeline(q.days)?))
}
