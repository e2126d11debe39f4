//! Route registration: module routes plus system endpoints, all behind
//! caller resolution.

use std::sync::Arc;

use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tracing::info;

use helpdesk_auth::AuthService;

/// Build the complete router.
pub fn build_router(auth: Arc<AuthService>, module_routes: Vec<(&str, Router)>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    for (name, router) in module_routes {
        info!("Mounted {} routes", name);
        app = app.merge(router);
    }

    app.layer(middleware::from_fn_with_state(
        auth,
        helpdesk_auth::api::resolve_caller,
    ))
}

async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
    }))
}

async fn version() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "helpdeskd",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
