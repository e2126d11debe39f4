use serde::{Deserialize, Serialize};

use super::{AuthorRole, Category, CloseCode, Impact, Priority, Status};

/// A support request raised by a store.
///
/// `store_id` never changes after creation. `priority` starts out derived
/// from `impact` and afterwards moves only when an admin sets it.
/// The close fields are stamped when the ticket is closed and are left in
/// place if it is later reopened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub store_id: String,
    pub device_id: Option<String>,
    pub requester_name: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub impact: Impact,
    pub priority: Priority,
    pub status: Status,
    pub assigned_to: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub closed_at: Option<String>,
    pub close_code: Option<CloseCode>,
    pub resolution_note: Option<String>,
}

/// A ticket together with its conversation, oldest entries first.
#[derive(Debug, Clone, Serialize)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: Ticket,
    pub comments: Vec<Comment>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub ticket_id: String,
    pub author_role: AuthorRole,
    pub author_name: String,
    pub body: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub ticket_id: String,
    pub uploader_role: AuthorRole,
    /// Name the client uploaded the file under.
    pub file_name: String,
    pub mime_type: String,
    pub size: i64,
    /// Where the bytes can be fetched: `/uploads/<stored name>`.
    pub url: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicket {
    pub store_id: String,
    pub requester_name: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub impact: Impact,
    #[serde(default)]
    pub device_id: Option<String>,
}

/// Partial admin update. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTicket {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    pub close_code: Option<CloseCode>,
    pub resolution_note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub author_name: String,
    pub body: String,
}

/// An uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// List filters, combined with AND. Dates accept RFC 3339 or `YYYY-MM-DD`
/// and bound `created_at` inclusively.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketFilter {
    pub store_id: Option<String>,
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub impact: Option<Impact>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
