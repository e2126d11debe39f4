pub mod password;
pub mod session;

use axum::http::HeaderMap;
use helpdesk_core::ServiceError;
use tracing::warn;

use crate::model::Caller;
use crate::model::Credential;

/// Header carrying the shared admin password on ticket operations.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Configuration for the auth service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret (HS256).
    pub jwt_secret: String,
    /// Token lifetime in seconds (default: 7 days).
    pub token_ttl: i64,
    /// argon2id PHC string of the admin password.
    pub admin_password_hash: String,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>, admin_password_hash: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: 7 * 24 * 3600,
            admin_password_hash: admin_password_hash.into(),
        }
    }
}

/// The auth service: verifies credentials and issues/validates tokens.
pub struct AuthService {
    pub(crate) config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Check an admin password attempt against the configured hash.
    pub fn verify_admin_password(&self, password: &str) -> bool {
        password::verify_password(password, &self.config.admin_password_hash)
    }

    /// Resolve the caller of a request from its headers.
    ///
    /// A bearer token wins over the password header. An invalid token is
    /// an error; a wrong password header is ignored, leaving the request
    /// unauthenticated. `Ok(None)` means no credentials were presented.
    pub fn resolve_caller(&self, headers: &HeaderMap) -> Result<Option<Caller>, ServiceError> {
        if let Some(token) = extract_bearer(headers) {
            let claims = self.verify_token(token)?;
            return Caller::from_claims(claims).map(Some);
        }

        if let Some(password) = headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            if self.verify_admin_password(password) {
                return Ok(Some(Caller::Admin {
                    via: Credential::PasswordHeader,
                }));
            }
            warn!("rejected admin password header");
        }

        Ok(None)
    }
}

/// Extract the Bearer token from the Authorization header.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}
