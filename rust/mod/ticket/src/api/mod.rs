mod audit;
mod auth;
mod devices;
mod reports;
mod stores;
mod tickets;
mod uploads;

use std::sync::Arc;

use axum::Router;

use helpdesk_auth::AuthService;

use crate::service::HelpdeskService;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub svc: Arc<HelpdeskService>,
    pub auth: Arc<AuthService>,
}

/// Build the helpdesk router.
///
/// Handlers take their caller from the request extensions, so the caller
/// resolution middleware must wrap this router (the server does so once
/// for all modules).
///
/// Routes:
/// - `POST  /auth/store/login`, `POST /auth/admin/login`
/// - `GET   /store/me`
/// - `GET|POST /admin/stores`, `PATCH /admin/stores/{id}`, `POST /admin/stores/{id}/reset-pin`
/// - `GET|POST /admin/stores/{id}/devices`, `PATCH|DELETE /admin/devices/{id}`
/// - `GET   /stores/{id}/devices`
/// - `POST|GET /tickets`, `GET /tickets/{id}`
/// - `POST  /tickets/{id}/comments`, `POST /tickets/{id}/attachments`
/// - `GET   /admin/tickets`, `PATCH /admin/tickets/{id}`
/// - `GET   /admin/reports/{overview,store-category,timeline}`
/// - `POST  /audit-log`, `GET /admin/audit-log`
/// - `GET   /uploads/{name}`
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(auth::routes())
        .merge(stores::routes())
        .merge(devices::routes())
        .merge(tickets::routes())
        .merge(reports::routes())
        .merge(uploads::routes())
        .merge(audit::routes())
        .with_state(state)
}
