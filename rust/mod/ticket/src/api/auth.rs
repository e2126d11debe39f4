use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::warn;

use helpdesk_auth::api::StoreToken;
use helpdesk_auth::TokenResponse;
use helpdesk_core::ServiceError;

use crate::api::AppState;
use crate::model::{AdminLogin, Store, StoreLogin};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/store/login", post(store_login))
        .route("/auth/admin/login", post(admin_login))
        .route("/store/me", get(store_me))
}

/// POST /auth/store/login: exchange a store code and PIN for a store token.
async fn store_login(
    State(state): State<AppState>,
    Json(req): Json<StoreLogin>,
) -> Result<Json<TokenResponse>, ServiceError> {
    let store = state.svc.authenticate_store(&req.code, &req.pin)?;
    let token = state.auth.issue_store_token(&store.id, &store.code)?;
    Ok(Json(TokenResponse { token }))
}

/// POST /auth/admin/login: exchange the admin password for an admin token.
async fn admin_login(
    State(state): State<AppState>,
    Json(req): Json<AdminLogin>,
) -> Result<Json<TokenResponse>, ServiceError> {
    if !state.auth.verify_admin_password(&req.password) {
        warn!("admin login rejected");
        return Err(ServiceError::Unauthorized("invalid password".into()));
    }
    let token = state.auth.issue_admin_token()?;
    Ok(Json(TokenResponse { token }))
}

/// GET /store/me: the calling store's record.
async fn store_me(
    State(state): State<AppState>,
    caller: StoreToken,
) -> Result<Json<Store>, ServiceError> {
    Ok(Json(state.svc.store_profile(&caller.store_id)?))
}
