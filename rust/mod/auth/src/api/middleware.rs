use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::service::AuthService;

/// Exact paths that never look at credentials.
const PUBLIC_PATHS: &[&str] = &["/health", "/version", "/auth/store/login", "/auth/admin/login"];

/// Caller resolution middleware.
///
/// Resolves the request's [`Caller`](crate::Caller) from its headers and
/// stores it as a request extension. A request without credentials passes
/// through untouched; the extractors decide whether the route needs one.
/// A bearer token that fails verification is rejected here with 401.
pub async fn resolve_caller(
    State(svc): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_public_path(req.uri().path()) {
        return next.run(req).await;
    }

    match svc.resolve_caller(req.headers()) {
        Ok(Some(caller)) => {
            debug!(role = caller.role().as_str(), "caller resolved");
            req.extensions_mut().insert(caller);
            next.run(req).await
        }
        Ok(None) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}

/// Public routes: the exact paths above, `/uploads/{name}` and
/// `/stores/{id}/devices`. Anything else under those prefixes still goes
/// through caller resolution.
fn is_public_path(path: &str) -> bool {
    if PUBLIC_PATHS.contains(&path) {
        return true;
    }
    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        ["uploads", name] => !name.is_empty(),
        ["stores", id, "devices"] => !id.is_empty(),
        _ => false,
    }
}
