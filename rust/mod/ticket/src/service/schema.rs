use helpdesk_core::ServiceError;
use helpdesk_sql::{SQLExecutor, SQLStore};

/// DDL for every helpdesk table.
///
/// Ownership cascades: deleting a store removes its devices and tickets,
/// deleting a ticket removes its comments and attachments. Deleting a
/// device only detaches it from tickets. Audit entries go with their store.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS stores (
        id          TEXT PRIMARY KEY,
        name        TEXT NOT NULL,
        code        TEXT NOT NULL UNIQUE,
        pin_hash    TEXT NOT NULL,
        is_active   INTEGER NOT NULL DEFAULT 1,
        created_at  TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS devices (
        id          TEXT PRIMARY KEY,
        store_id    TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        label       TEXT NOT NULL,
        type        TEXT NOT NULL,
        serial      TEXT,
        created_at  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_devices_store ON devices(store_id)",
    "CREATE TABLE IF NOT EXISTS tickets (
        id              TEXT PRIMARY KEY,
        store_id        TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        device_id       TEXT REFERENCES devices(id) ON DELETE SET NULL,
        requester_name  TEXT NOT NULL,
        title           TEXT NOT NULL,
        description     TEXT NOT NULL,
        category        TEXT NOT NULL,
        impact          TEXT NOT NULL,
        priority        TEXT NOT NULL,
        status          TEXT NOT NULL,
        assigned_to     TEXT,
        created_at      TEXT NOT NULL,
        updated_at      TEXT NOT NULL,
        closed_at       TEXT,
        close_code      TEXT,
        resolution_note TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_tickets_store ON tickets(store_id)",
    "CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status)",
    "CREATE INDEX IF NOT EXISTS idx_tickets_created ON tickets(created_at)",
    "CREATE TABLE IF NOT EXISTS comments (
        id          TEXT PRIMARY KEY,
        ticket_id   TEXT NOT NULL REFERENCES tickets(id) ON DELETE CASCADE,
        author_role TEXT NOT NULL,
        author_name TEXT NOT NULL,
        body        TEXT NOT NULL,
        created_at  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_comments_ticket ON comments(ticket_id)",
    "CREATE TABLE IF NOT EXISTS attachments (
        id            TEXT PRIMARY KEY,
        ticket_id     TEXT NOT NULL REFERENCES tickets(id) ON DELETE CASCADE,
        uploader_role TEXT NOT NULL,
        file_name     TEXT NOT NULL,
        stored_name   TEXT NOT NULL,
        mime_type     TEXT NOT NULL,
        size          INTEGER NOT NULL,
        url           TEXT NOT NULL,
        created_at    TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_attachments_ticket ON attachments(ticket_id)",
    "CREATE INDEX IF NOT EXISTS idx_attachments_stored ON attachments(stored_name)",
    "CREATE TABLE IF NOT EXISTS audit_logs (
        id          TEXT PRIMARY KEY,
        store_id    TEXT NOT NULL REFERENCES stores(id) ON DELETE CASCADE,
        action      TEXT NOT NULL,
        path        TEXT NOT NULL,
        metadata    TEXT NOT NULL,
        created_at  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_audit_store ON audit_logs(store_id, created_at)",
];

/// Create all tables and indexes if they do not exist yet.
pub fn init_schema(sql: &dyn SQLStore) -> Result<(), ServiceError> {
    for ddl in SCHEMA {
        sql.exec(ddl, &[])
            .map_err(|e| ServiceError::Storage(format!("schema init: {e}")))?;
    }
    Ok(())
}
