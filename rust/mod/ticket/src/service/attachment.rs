use std::path::Path;
use std::sync::Arc;

use tracing::info;

use helpdesk_auth::Caller;
use helpdesk_blob::{BlobError, BlobStore};
use helpdesk_core::{new_id, now_rfc3339, ServiceError};
use helpdesk_sql::{Row, SQLExecutor, Value};

use super::store::ensure_active_caller;
use super::ticket::{ensure_visible, load_ticket};
use super::{storage, text, wire, HelpdeskService};
use crate::model::{Attachment, AuthorRole, Upload};

const DEFAULT_MIME: &str = "application/octet-stream";

/// Result of persisting an upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFile {
    pub stored_name: String,
    pub url: String,
    pub size: u64,
}

/// Puts upload bytes into the blob store under a generated name.
///
/// Stored names are a random hex id plus the original file's extension,
/// so client-supplied names never reach the filesystem.
pub struct AttachmentStore {
    blob: Arc<dyn BlobStore>,
}

impl AttachmentStore {
    pub fn new(blob: Arc<dyn BlobStore>) -> Self {
        Self { blob }
    }

    pub fn save(&self, data: &[u8], original_name: &str) -> Result<SavedFile, ServiceError> {
        let stored_name = format!("{}{}", new_id(), extension_of(original_name));
        self.blob.put(&stored_name, data).map_err(storage)?;
        let size = self
            .blob
            .size(&stored_name)
            .map_err(storage)?
            .unwrap_or(data.len() as u64);
        Ok(SavedFile {
            url: format!("/uploads/{stored_name}"),
            stored_name,
            size,
        })
    }

    /// Bytes of a stored upload. Unknown or malformed names are `NotFound`.
    pub fn open(&self, stored_name: &str) -> Result<Vec<u8>, ServiceError> {
        match self.blob.get(stored_name) {
            Ok(Some(data)) => Ok(data),
            Ok(None) | Err(BlobError::InvalidKey(_)) => {
                Err(ServiceError::NotFound(format!("upload '{stored_name}' not found")))
            }
            Err(e) => Err(storage(e)),
        }
    }
}

/// `.ext` of the client's file name, or nothing if it has no usable one.
fn extension_of(name: &str) -> String {
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) => {
            format!(".{ext}")
        }
        _ => String::new(),
    }
}

impl HelpdeskService {
    /// Store an uploaded file against a ticket the caller can see.
    ///
    /// Any admin uploads as `ADMIN`. The file is written between two short
    /// transactions so the SQL connection is never held during disk I/O.
    /// If the row insert fails the written file is left behind.
    pub fn add_attachment(
        &self,
        caller: &Caller,
        ticket_id: &str,
        upload: Upload,
    ) -> Result<Attachment, ServiceError> {
        let ticket_id = self.in_tx(|tx| {
            ensure_active_caller(tx, caller)?;
            let ticket = load_ticket(tx, ticket_id)?;
            ensure_visible(caller, &ticket)?;
            Ok(ticket.id)
        })?;

        let saved = self.files.save(&upload.data, &upload.file_name)?;
        let attachment = Attachment {
            id: new_id(),
            ticket_id,
            uploader_role: if caller.is_admin() {
                AuthorRole::Admin
            } else {
                AuthorRole::Store
            },
            file_name: upload.file_name,
            mime_type: upload
                .content_type
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_MIME.to_string()),
            size: saved.size as i64,
            url: saved.url,
            created_at: now_rfc3339(),
        };

        self.in_tx(|tx| {
            // The ticket may have been removed while the file was written.
            load_ticket(tx, &attachment.ticket_id)?;
            tx.exec(
                "INSERT INTO attachments (id, ticket_id, uploader_role, file_name, stored_name, \
                 mime_type, size, url, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                &[
                    Value::Text(attachment.id.clone()),
                    Value::Text(attachment.ticket_id.clone()),
                    Value::Text(attachment.uploader_role.as_str().into()),
                    Value::Text(attachment.file_name.clone()),
                    Value::Text(saved.stored_name.clone()),
                    Value::Text(attachment.mime_type.clone()),
                    Value::Integer(attachment.size),
                    Value::Text(attachment.url.clone()),
                    Value::Text(attachment.created_at.clone()),
                ],
            )
            .map_err(storage)?;
            Ok(())
        })?;

        info!(
            ticket_id = %attachment.ticket_id,
            url = %attachment.url,
            size = attachment.size,
            "attachment stored"
        );
        Ok(attachment)
    }

    /// Bytes and MIME type of an upload, for the public download route.
    pub fn read_upload(&self, stored_name: &str) -> Result<(String, Vec<u8>), ServiceError> {
        let data = self.files.open(stored_name)?;
        let mime = self.in_tx(|tx| {
            let rows = tx
                .query(
                    "SELECT mime_type FROM attachments WHERE stored_name = ?1",
                    &[Value::Text(stored_name.to_string())],
                )
                .map_err(storage)?;
            Ok(rows.first().and_then(|r| r.get_str("mime_type")).map(String::from))
        })?;
        Ok((mime.unwrap_or_else(|| DEFAULT_MIME.to_string()), data))
    }
}

/// Attachments of a ticket, oldest first.
pub(super) fn list_attachments(
    tx: &dyn SQLExecutor,
    ticket_id: &str,
) -> Result<Vec<Attachment>, ServiceError> {
    let rows = tx
        .query(
            "SELECT id, ticket_id, uploader_role, file_name, mime_type, size, url, created_at \
             FROM attachments WHERE ticket_id = ?1 ORDER BY created_at ASC, rowid ASC",
            &[Value::Text(ticket_id.to_string())],
        )
        .map_err(storage)?;
    rows.iter().map(row_to_attachment).collect()
}

fn row_to_attachment(row: &Row) -> Result<Attachment, ServiceError> {
    Ok(Attachment {
        id: text(row, "id")?,
        ticket_id: text(row, "ticket_id")?,
        uploader_role: wire(row, "uploader_role", AuthorRole::parse)?,
        file_name: text(row, "file_name")?,
        mime_type: text(row, "mime_type")?,
        size: row.get_i64("size").unwrap_or(0),
        url: text(row, "url")?,
        created_at: text(row, "created_at")?,
    })
}
