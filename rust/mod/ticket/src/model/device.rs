use serde::{Deserialize, Serialize};

/// A piece of equipment at a store that tickets can point at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub store_id: String,
    pub label: String,
    /// Free-text kind ("POS terminal", "router", ...).
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDevice {
    pub label: String,
    #[serde(rename = "type")]
    pub device_type: String,
    #[serde(default)]
    pub serial: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDevice {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub serial: Option<String>,
}
