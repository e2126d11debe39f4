//! Credential and token handling for the helpdesk.
//!
//! Two ways to authenticate reach the same [`Caller`] capability:
//! a bearer JWT issued at login (admin or store), and, for ticket
//! operations only, the shared admin password in `X-Admin-Password`.
//! The [`api::middleware`] resolves one of them per request; handlers ask
//! for the capability they need through the extractors in [`api::extract`].

pub mod api;
pub mod model;
pub mod service;

pub use model::{Caller, Claims, Credential, Role, TokenResponse};
pub use service::password::{hash_password, verify_password};
pub use service::{AuthConfig, AuthService};
