//! Store IT helpdesk: stores, devices, tickets and their conversation.
//!
//! [`service::HelpdeskService`] holds the ticket lifecycle rules and
//! runs every operation in one SQL transaction; [`api`] exposes it over
//! HTTP behind the capability extractors from `helpdesk-auth`.

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use helpdesk_auth::AuthService;
use helpdesk_blob::BlobStore;
use helpdesk_core::{Module, ServiceError};
use helpdesk_sql::SQLStore;

use api::AppState;
use service::HelpdeskService;

/// The helpdesk module, ready to be merged into the server router.
pub struct TicketModule {
    state: AppState,
}

impl TicketModule {
    /// Create the module and initialise its schema.
    pub fn new(
        sql: Arc<dyn SQLStore>,
        blob: Arc<dyn BlobStore>,
        auth: Arc<AuthService>,
    ) -> Result<Self, ServiceError> {
        let svc = Arc::new(HelpdeskService::new(sql, blob)?);
        Ok(Self {
            state: AppState { svc, auth },
        })
    }

    pub fn service(&self) -> &Arc<HelpdeskService> {
        &self.state.svc
    }
}

impl Module for TicketModule {
    fn name(&self) -> &str {
        "ticket"
    }

    fn routes(&self) -> Router {
        api::router(self.state.clone())
    }
}
