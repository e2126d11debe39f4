use tracing::info;

use helpdesk_auth::{Caller, Credential};
use helpdesk_core::{new_id, now_rfc3339, ServiceError};
use helpdesk_sql::{Row, SQLExecutor, Value};

use super::store::ensure_active_caller;
use super::ticket::{ensure_visible, load_ticket};
use super::{require, storage, text, wire, HelpdeskService};
use crate::model::{AuthorRole, Comment, CreateComment};

/// Role recorded on a comment.
///
/// Only an admin holding a bearer token comments as `ADMIN`. An admin
/// who authenticated with the password header is recorded as `STORE`,
/// as are stores themselves.
pub fn comment_role(caller: &Caller) -> AuthorRole {
    match caller {
        Caller::Admin { via: Credential::Token } => AuthorRole::Admin,
        Caller::Admin { via: Credential::PasswordHeader } | Caller::Store { .. } => {
            AuthorRole::Store
        }
    }
}

impl HelpdeskService {
    /// Append a comment to a ticket the caller can see.
    pub fn add_comment(
        &self,
        caller: &Caller,
        ticket_id: &str,
        input: CreateComment,
    ) -> Result<Comment, ServiceError> {
        require("author_name", &input.author_name)?;
        require("body", &input.body)?;

        let comment = self.in_tx(|tx| {
            ensure_active_caller(tx, caller)?;
            let ticket = load_ticket(tx, ticket_id)?;
            ensure_visible(caller, &ticket)?;

            let comment = Comment {
                id: new_id(),
                ticket_id: ticket.id,
                author_role: comment_role(caller),
                author_name: input.author_name,
                body: input.body,
                created_at: now_rfc3339(),
            };
            tx.exec(
                "INSERT INTO comments (id, ticket_id, author_role, author_name, body, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                &[
                    Value::Text(comment.id.clone()),
                    Value::Text(comment.ticket_id.clone()),
                    Value::Text(comment.author_role.as_str().into()),
                    Value::Text(comment.author_name.clone()),
                    Value::Text(comment.body.clone()),
                    Value::Text(comment.created_at.clone()),
                ],
            )
            .map_err(storage)?;
            Ok(comment)
        })?;

        info!(ticket_id = %ticket_id, role = %comment.author_role, "comment added");
        Ok(comment)
    }
}

/// Comments of a ticket, oldest first.
pub(super) fn list_comments(tx: &dyn SQLExecutor, ticket_id: &str) -> Result<Vec<Comment>, ServiceError> {
    let rows = tx
        .query(
            "SELECT id, ticket_id, author_role, author_name, body, created_at FROM comments \
             WHERE ticket_id = ?1 ORDER BY created_at ASC, rowid ASC",
            &[Value::Text(ticket_id.to_string())],
        )
        .map_err(storage)?;
    rows.iter().map(row_to_comment).collect()
}

fn row_to_comment(row: &Row) -> Result<Comment, ServiceError> {
    Ok(Comment {
        id: text(row, "id")?,
        ticket_id: text(row, "ticket_id")?,
        author_role: wire(row, "author_role", AuthorRole::parse)?,
        author_name: text(row, "author_name")?,
        body: text(row, "body")?,
        created_at: text(row, "created_at")?,
    })
}
