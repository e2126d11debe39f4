use serde_json::{json, Value as Json};
use tracing::info;

use helpdesk_auth::Caller;
use helpdesk_core::{new_id, now_rfc3339, ServiceError};
use helpdesk_sql::{Row, SQLExecutor, Value};

use super::store::{ensure_active_caller, load_store};
use super::{require, storage, text, HelpdeskService};
use crate::model::{AuditEntry, AuditFilter, RecordAudit};

impl HelpdeskService {
    /// Record a store-side event.
    ///
    /// Stores log against themselves (`store_id` may be omitted); admins
    /// must name an existing store. `metadata` must be a JSON object and
    /// defaults to `{}`.
    pub fn record_audit(&self, caller: &Caller, input: RecordAudit) -> Result<AuditEntry, ServiceError> {
        require("action", &input.action)?;
        require("path", &input.path)?;
        let metadata = match input.metadata {
            None | Some(Json::Null) => json!({}),
            Some(m @ Json::Object(_)) => m,
            Some(_) => {
                return Err(ServiceError::Validation("metadata must be an object".into()));
            }
        };

        let store_id = match (caller.store_id(), input.store_id.filter(|s| !s.is_empty())) {
            (Some(own), None) => own.to_string(),
            (Some(own), Some(named)) if named == own => named,
            (Some(_), Some(_)) => {
                return Err(ServiceError::PermissionDenied(
                    "cannot log events for another store".into(),
                ));
            }
            (None, Some(named)) => named,
            (None, None) => return Err(ServiceError::Validation("store_id is required".into())),
        };

        let entry = self.in_tx(|tx| {
            ensure_active_caller(tx, caller)?;
            match load_store(tx, &store_id) {
                Ok(_) => {}
                Err(ServiceError::NotFound(_)) => {
                    return Err(ServiceError::Validation("invalid store".into()));
                }
                Err(e) => return Err(e),
            }
            insert_audit(tx, &store_id, &input.action, &input.path, metadata)
        })?;

        info!(store_id = %entry.store_id, action = %entry.action, "audit event recorded");
        Ok(entry)
    }

    /// Audit entries, newest first, optionally narrowed by store and action.
    pub fn list_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, ServiceError> {
        let mut clauses = Vec::new();
        let mut params = Vec::new();
        if let Some(store_id) = filter.store_id.as_deref().filter(|s| !s.is_empty()) {
            params.push(Value::Text(store_id.to_string()));
            clauses.push(format!("store_id = ?{}", params.len()));
        }
        if let Some(action) = filter.action.as_deref().filter(|s| !s.is_empty()) {
            params.push(Value::Text(action.to_string()));
            clauses.push(format!("action = ?{}", params.len()));
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };

        self.in_tx(|tx| {
            let rows = tx
                .query(
                    &format!(
                        "SELECT id, store_id, action, path, metadata, created_at FROM audit_logs \
                         {where_sql} ORDER BY created_at DESC, rowid DESC"
                    ),
                    &params,
                )
                .map_err(storage)?;
            rows.iter().map(row_to_entry).collect()
        })
    }
}

/// Append an audit row inside the caller's transaction.
pub(super) fn insert_audit(
    tx: &dyn SQLExecutor,
    store_id: &str,
    action: &str,
    path: &str,
    metadata: Json,
) -> Result<AuditEntry, ServiceError> {
    let entry = AuditEntry {
        id: new_id(),
        store_id: store_id.to_string(),
        action: action.to_string(),
        path: path.to_string(),
        metadata,
        created_at: now_rfc3339(),
    };
    tx.exec(
        "INSERT INTO audit_logs (id, store_id, action, path, metadata, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        &[
            Value::Text(entry.id.clone()),
            Value::Text(entry.store_id.clone()),
            Value::Text(entry.action.clone()),
            Value::Text(entry.path.clone()),
            Value::Text(entry.metadata.to_string()),
            Value::Text(entry.created_at.clone()),
        ],
    )
    .map_err(storage)?;
    Ok(entry)
}

fn row_to_entry(row: &Row) -> Result<AuditEntry, ServiceError> {
    let raw = text(row, "metadata")?;
    let metadata = serde_json::from_str(&raw)
        .map_err(|e| ServiceError::Storage(format!("bad audit metadata: {e}")))?;
    Ok(AuditEntry {
        id: text(row, "id")?,
        store_id: text(row, "store_id")?,
        action: text(row, "action")?,
        path: text(row, "path")?,
        metadata,
        created_at: text(row, "created_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Impact, UpdateStore, TICKET_CREATE};
    use crate::service::tests::{admin, make_store, store_caller, test_service, ticket_input};

    fn event(store_id: Option<&str>) -> RecordAudit {
        RecordAudit {
            store_id: store_id.map(String::from),
            action: "page_view".into(),
            path: "/store/tickets".into(),
            metadata: Some(json!({"tab": "open"})),
        }
    }

    #[test]
    fn ticket_creation_is_audited() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = svc
            .create_ticket(&store_caller(&store), ticket_input(&store, Impact::Info))
            .unwrap();

        let entries = svc.list_audit(&AuditFilter::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].store_id, store.id);
        assert_eq!(entries[0].action, TICKET_CREATE);
        assert_eq!(entries[0].path, "/tickets");
        assert_eq!(entries[0].metadata, json!({"ticket_id": t.id}));
    }

    #[test]
    fn rejected_ticket_leaves_no_audit_row() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let mut input = ticket_input(&store, Impact::Info);
        input.device_id = Some("nope".into());
        assert!(svc.create_ticket(&admin(), input).is_err());
        assert!(svc.list_audit(&AuditFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn store_logs_against_itself() {
        let (svc, _dir) = test_service();
        let a = make_store(&svc, "A");
        let b = make_store(&svc, "B");

        let entry = svc.record_audit(&store_caller(&a), event(None)).unwrap();
        assert_eq!(entry.store_id, a.id);
        assert_eq!(entry.metadata, json!({"tab": "open"}));
        assert!(svc.record_audit(&store_caller(&a), event(Some(&a.id))).is_ok());

        assert!(matches!(
            svc.record_audit(&store_caller(&a), event(Some(&b.id))).unwrap_err(),
            ServiceError::PermissionDenied(_)
        ));

        let only_a = svc
            .list_audit(&AuditFilter { store_id: Some(a.id.clone()), action: None })
            .unwrap();
        assert_eq!(only_a.len(), 2);
        let none_for_b = svc
            .list_audit(&AuditFilter { store_id: Some(b.id.clone()), action: None })
            .unwrap();
        assert!(none_for_b.is_empty());
    }

    #[test]
    fn admin_must_name_a_known_store() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");

        assert!(matches!(
            svc.record_audit(&admin(), event(None)).unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert!(matches!(
            svc.record_audit(&admin(), event(Some("ghost"))).unwrap_err(),
            ServiceError::Validation(_)
        ));
        assert!(svc.record_audit(&admin(), event(Some(&store.id))).is_ok());
    }

    #[test]
    fn input_is_checked() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let caller = store_caller(&store);

        let mut blank = event(None);
        blank.action = " ".into();
        assert!(matches!(
            svc.record_audit(&caller, blank).unwrap_err(),
            ServiceError::Validation(_)
        ));

        let mut scalar = event(None);
        scalar.metadata = Some(json!(42));
        assert!(matches!(
            svc.record_audit(&caller, scalar).unwrap_err(),
            ServiceError::Validation(_)
        ));

        let mut bare = event(None);
        bare.metadata = None;
        assert_eq!(svc.record_audit(&caller, bare).unwrap().metadata, json!({}));
    }

    #[test]
    fn deactivated_store_cannot_log() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        svc.update_store(&store.id, UpdateStore { name: None, is_active: Some(false) })
            .unwrap();
        assert!(matches!(
            svc.record_audit(&store_caller(&store), event(None)).unwrap_err(),
            ServiceError::PermissionDenied(_)
        ));
    }
}
