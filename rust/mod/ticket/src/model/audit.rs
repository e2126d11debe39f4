use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action recorded when a ticket is filed.
pub const TICKET_CREATE: &str = "ticket_create";

/// One store-side event: what happened, on which screen, with free-form
/// details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: String,
    pub store_id: String,
    pub action: String,
    pub path: String,
    pub metadata: Value,
    pub created_at: String,
}

/// Body of `POST /audit-log`. A store caller may omit `store_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordAudit {
    #[serde(default)]
    pub store_id: Option<String>,
    pub action: String,
    pub path: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditFilter {
    pub store_id: Option<String>,
    pub action: Option<String>,
}
