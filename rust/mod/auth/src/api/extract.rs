//! Capability extractors.
//!
//! Each extractor reads the [`Caller`] stored by the middleware and
//! rejects the request when it lacks the capability the handler needs.
//! A missing caller is always 401; a caller of the wrong kind is 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use helpdesk_core::ServiceError;

use crate::model::{Caller, Credential};

fn caller_of(parts: &Parts) -> Option<&Caller> {
    parts.extensions.get::<Caller>()
}

fn unauthenticated() -> ServiceError {
    ServiceError::Unauthorized("authentication required".into())
}

/// Any authenticated caller.
#[derive(Debug, Clone)]
pub struct AnyCaller(pub Caller);

impl<S: Send + Sync> FromRequestParts<S> for AnyCaller {
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        caller_of(parts)
            .cloned()
            .map(AnyCaller)
            .ok_or_else(unauthenticated)
    }
}

/// An admin holding a bearer token. Store and device management require
/// this; the password header alone is not enough.
#[derive(Debug, Clone, Copy)]
pub struct AdminToken;

impl<S: Send + Sync> FromRequestParts<S> for AdminToken {
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match caller_of(parts) {
            Some(Caller::Admin { via: Credential::Token }) => Ok(AdminToken),
            Some(Caller::Store { .. }) => {
                Err(ServiceError::PermissionDenied("admin only".into()))
            }
            _ => Err(unauthenticated()),
        }
    }
}

/// An admin by token or by password header. Used by the admin ticket routes.
#[derive(Debug, Clone)]
pub struct TicketAdmin(pub Caller);

impl<S: Send + Sync> FromRequestParts<S> for TicketAdmin {
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match caller_of(parts) {
            Some(caller @ Caller::Admin { .. }) => Ok(TicketAdmin(caller.clone())),
            Some(Caller::Store { .. }) => {
                Err(ServiceError::PermissionDenied("admin only".into()))
            }
            None => Err(unauthenticated()),
        }
    }
}

/// A store holding its own token.
#[derive(Debug, Clone)]
pub struct StoreToken {
    pub store_id: String,
}

impl<S: Send + Sync> FromRequestParts<S> for StoreToken {
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match caller_of(parts) {
            Some(Caller::Store { store_id }) => Ok(StoreToken {
                store_id: store_id.clone(),
            }),
            Some(Caller::Admin { .. }) => {
                Err(ServiceError::PermissionDenied("store only".into()))
            }
            None => Err(unauthenticated()),
        }
    }
}
