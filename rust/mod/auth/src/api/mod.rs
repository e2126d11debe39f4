//! HTTP plumbing shared by every module: caller resolution and the
//! capability extractors.

pub mod extract;
pub mod middleware;

pub use extract::{AdminToken, AnyCaller, StoreToken, TicketAdmin};
pub use middleware::resolve_caller;
