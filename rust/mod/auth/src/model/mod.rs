mod caller;
mod session;

pub use caller::{Caller, Credential};
pub use session::{Claims, Role, TokenResponse};
