pub mod config;
pub mod error;
pub mod module;
pub mod types;

pub use config::ServiceConfig;
pub use error::{ErrorBody, ServiceError};
pub use module::Module;
pub use types::{format_timestamp, new_id, now_rfc3339, ListResult};
