mod attachment;
mod audit;
mod comment;
mod device;
mod report;
pub mod schema;
mod store;
mod ticket;

use std::sync::Arc;

use helpdesk_blob::BlobStore;
use helpdesk_core::ServiceError;
use helpdesk_sql::{Row, SQLError, SQLExecutor, SQLStore};

pub use attachment::{AttachmentStore, SavedFile};

/// The helpdesk engine.
///
/// Owns the relational store and the attachment store. Every public
/// operation runs inside one SQL transaction, so a load-check-write
/// sequence is never interleaved with another request's writes.
pub struct HelpdeskService {
    sql: Arc<dyn SQLStore>,
    files: AttachmentStore,
}

impl HelpdeskService {
    /// Create the service and make sure the schema exists.
    pub fn new(sql: Arc<dyn SQLStore>, blob: Arc<dyn BlobStore>) -> Result<Self, ServiceError> {
        schema::init_schema(sql.as_ref())?;
        Ok(Self {
            sql,
            files: AttachmentStore::new(blob),
        })
    }

    /// Run `f` inside a transaction.
    ///
    /// An `Err` from `f` rolls the transaction back and is returned as is.
    /// Failures of the transaction itself surface as `Storage`.
    fn in_tx<T>(
        &self,
        f: impl FnOnce(&dyn SQLExecutor) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut body = Some(f);
        let mut outcome: Option<Result<T, ServiceError>> = None;

        let committed = self.sql.transaction(&mut |tx: &dyn SQLExecutor| -> Result<(), SQLError> {
            let f = body.take().ok_or(SQLError::Aborted)?;
            match f(tx) {
                Ok(v) => {
                    outcome = Some(Ok(v));
                    Ok(())
                }
                Err(e) => {
                    outcome = Some(Err(e));
                    Err(SQLError::Aborted)
                }
            }
        });

        match (outcome, committed) {
            (Some(Err(e)), _) => Err(e),
            (_, Err(e)) => Err(storage(e)),
            (Some(Ok(v)), Ok(())) => Ok(v),
            (None, Ok(())) => Err(ServiceError::Internal("transaction body did not run".into())),
        }
    }
}

fn storage(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::Storage(e.to_string())
}

/// Required text column.
fn text(row: &Row, col: &str) -> Result<String, ServiceError> {
    row.get_str(col)
        .map(String::from)
        .ok_or_else(|| ServiceError::Storage(format!("missing column {col}")))
}

/// Nullable text column.
fn opt_text(row: &Row, col: &str) -> Option<String> {
    row.get_str(col).map(String::from)
}

/// Required column holding one of the wire vocabularies.
fn wire<T>(row: &Row, col: &str, parse: fn(&str) -> Option<T>) -> Result<T, ServiceError> {
    let raw = text(row, col)?;
    parse(&raw).ok_or_else(|| ServiceError::Storage(format!("bad {col} value {raw:?}")))
}

/// Reject blank required input fields.
fn require(field: &str, value: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} is required")));
    }
    Ok(())
}
