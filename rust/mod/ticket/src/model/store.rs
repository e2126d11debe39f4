use serde::{Deserialize, Serialize};

/// A retail location. The PIN hash never leaves the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: String,
    pub name: String,
    /// Login identifier, unique across stores.
    pub code: String,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStore {
    pub name: String,
    pub code: String,
    pub pin: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStore {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// A freshly generated PIN, shown to the admin exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinReset {
    pub pin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreLogin {
    pub code: String,
    pub pin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminLogin {
    pub password: String,
}
