use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::json;
use tracing::info;

use helpdesk_auth::Caller;
use helpdesk_core::{format_timestamp, new_id, now_rfc3339, ServiceError};
use helpdesk_sql::{Row, SQLExecutor, Value};

use super::audit::insert_audit;
use super::device::find_device;
use super::store::{ensure_active_caller, load_store};
use super::{opt_text, require, storage, text, wire, HelpdeskService};
use crate::model::{
    derive_priority, Category, CloseCode, CreateTicket, Impact, Priority, Status, Ticket,
    TicketDetail, TicketFilter, UpdateTicket, TICKET_CREATE,
};

const TICKET_COLUMNS: &str = "id, store_id, device_id, requester_name, title, description, \
     category, impact, priority, status, assigned_to, created_at, updated_at, closed_at, \
     close_code, resolution_note";

impl HelpdeskService {
    /// Open a new ticket.
    ///
    /// A store may only file for itself; admins may file for any store.
    /// The store must exist and be active, and a referenced device must
    /// belong to that store.
    pub fn create_ticket(&self, caller: &Caller, input: CreateTicket) -> Result<Ticket, ServiceError> {
        if !caller.can_access_store(&input.store_id) {
            return Err(ServiceError::PermissionDenied(
                "cannot create tickets for another store".into(),
            ));
        }
        require("requester_name", &input.requester_name)?;
        require("title", &input.title)?;

        let ticket = self.in_tx(|tx| {
            ensure_active_caller(tx, caller)?;
            match load_store(tx, &input.store_id) {
                Ok(store) if store.is_active => {}
                Ok(_) | Err(ServiceError::NotFound(_)) => {
                    return Err(ServiceError::Validation("invalid store".into()));
                }
                Err(e) => return Err(e),
            }
            if let Some(device_id) = &input.device_id {
                match find_device(tx, device_id)? {
                    Some(device) if device.store_id == input.store_id => {}
                    _ => return Err(ServiceError::Validation("invalid device".into())),
                }
            }

            let now = now_rfc3339();
            let ticket = Ticket {
                id: new_id(),
                store_id: input.store_id,
                device_id: input.device_id,
                requester_name: input.requester_name,
                title: input.title,
                description: input.description,
                category: input.category,
                impact: input.impact,
                priority: derive_priority(input.impact.as_str()),
                status: Status::Open,
                assigned_to: None,
                created_at: now.clone(),
                updated_at: now,
                closed_at: None,
                close_code: None,
                resolution_note: None,
            };
            insert_ticket(tx, &ticket)?;
            insert_audit(
                tx,
                &ticket.store_id,
                TICKET_CREATE,
                "/tickets",
                json!({ "ticket_id": ticket.id }),
            )?;
            Ok(ticket)
        })?;

        info!(
            ticket_id = %ticket.id,
            store_id = %ticket.store_id,
            priority = %ticket.priority,
            "ticket created"
        );
        Ok(ticket)
    }

    /// Store-scoped listing. `store_id` is mandatory and a store may only
    /// list its own tickets.
    pub fn list_store_tickets(
        &self,
        caller: &Caller,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, ServiceError> {
        let store_id = filter
            .store_id
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ServiceError::Validation("store_id is required".into()))?;
        if !caller.can_access_store(store_id) {
            return Err(ServiceError::PermissionDenied(
                "cannot list another store's tickets".into(),
            ));
        }
        self.in_tx(|tx| {
            ensure_active_caller(tx, caller)?;
            query_tickets(tx, filter)
        })
    }

    /// Admin listing across all stores. Every filter is optional.
    pub fn list_tickets(&self, filter: &TicketFilter) -> Result<Vec<Ticket>, ServiceError> {
        self.in_tx(|tx| query_tickets(tx, filter))
    }

    /// A ticket with its comments and attachments.
    pub fn get_ticket(&self, caller: &Caller, id: &str) -> Result<TicketDetail, ServiceError> {
        self.in_tx(|tx| {
            ensure_active_caller(tx, caller)?;
            let ticket = load_ticket(tx, id)?;
            ensure_visible(caller, &ticket)?;
            let comments = super::comment::list_comments(tx, id)?;
            let attachments = super::attachment::list_attachments(tx, id)?;
            Ok(TicketDetail {
                ticket,
                comments,
                attachments,
            })
        })
    }

    /// Admin triage: partial update of status, priority, assignee and
    /// close details.
    ///
    /// Assigning an `OPEN` ticket without naming a status moves it to
    /// `IN_PROGRESS`. Setting `CLOSED` stamps `closed_at`, again on every
    /// re-close.
    pub fn update_ticket(
        &self,
        caller: &Caller,
        id: &str,
        patch: UpdateTicket,
    ) -> Result<Ticket, ServiceError> {
        if !caller.is_admin() {
            return Err(ServiceError::PermissionDenied("admin only".into()));
        }

        let ticket = self.in_tx(|tx| {
            let mut ticket = load_ticket(tx, id)?;
            let now = now_rfc3339();

            let assigning = patch.assigned_to.as_deref().is_some_and(|a| !a.is_empty());
            if patch.status.is_none() && assigning && ticket.status == Status::Open {
                ticket.status = Status::InProgress;
            }
            if let Some(status) = patch.status {
                ticket.status = status;
                if status == Status::Closed {
                    ticket.closed_at = Some(now.clone());
                }
            }
            if let Some(priority) = patch.priority {
                ticket.priority = priority;
            }
            if let Some(assignee) = patch.assigned_to {
                ticket.assigned_to = Some(assignee);
            }
            if let Some(code) = patch.close_code {
                ticket.close_code = Some(code);
            }
            if let Some(note) = patch.resolution_note {
                ticket.resolution_note = Some(note);
            }
            ticket.updated_at = now;

            tx.exec(
                "UPDATE tickets SET priority = ?1, status = ?2, assigned_to = ?3, \
                 updated_at = ?4, closed_at = ?5, close_code = ?6, resolution_note = ?7 \
                 WHERE id = ?8",
                &[
                    Value::Text(ticket.priority.as_str().into()),
                    Value::Text(ticket.status.as_str().into()),
                    Value::opt_text(ticket.assigned_to.as_deref()),
                    Value::Text(ticket.updated_at.clone()),
                    Value::opt_text(ticket.closed_at.as_deref()),
                    Value::opt_text(ticket.close_code.map(|c| c.as_str())),
                    Value::opt_text(ticket.resolution_note.as_deref()),
                    Value::Text(ticket.id.clone()),
                ],
            )
            .map_err(storage)?;
            Ok(ticket)
        })?;

        if ticket.status == Status::Closed {
            info!(ticket_id = %ticket.id, close_code = ?ticket.close_code, "ticket closed");
        } else {
            info!(ticket_id = %ticket.id, status = %ticket.status, "ticket updated");
        }
        Ok(ticket)
    }
}

/// Tickets matching every set filter, newest first.
fn query_tickets(tx: &dyn SQLExecutor, filter: &TicketFilter) -> Result<Vec<Ticket>, ServiceError> {
    let mut where_clauses: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    let mut push = |clause: &str, value: Value| {
        params.push(value);
        where_clauses.push(format!("{clause} ?{}", params.len()));
    };

    if let Some(store_id) = filter.store_id.as_deref().filter(|s| !s.is_empty()) {
        push("store_id =", Value::Text(store_id.to_string()));
    }
    if let Some(category) = filter.category {
        push("category =", Value::Text(category.as_str().into()));
    }
    if let Some(status) = filter.status {
        push("status =", Value::Text(status.as_str().into()));
    }
    if let Some(priority) = filter.priority {
        push("priority =", Value::Text(priority.as_str().into()));
    }
    if let Some(impact) = filter.impact {
        push("impact =", Value::Text(impact.as_str().into()));
    }
    if let Some(start) = &filter.start_date {
        push("created_at >=", Value::Text(parse_bound(start, false)?));
    }
    if let Some(end) = &filter.end_date {
        push("created_at <=", Value::Text(parse_bound(end, true)?));
    }

    let where_sql = if where_clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", where_clauses.join(" AND "))
    };
    let sql = format!(
        "SELECT {TICKET_COLUMNS} FROM tickets {where_sql} ORDER BY created_at DESC, rowid DESC"
    );

    let rows = tx.query(&sql, &params).map_err(storage)?;
    rows.iter().map(row_to_ticket).collect()
}

/// Stores only see their own tickets; admins see all.
pub(super) fn ensure_visible(caller: &Caller, ticket: &Ticket) -> Result<(), ServiceError> {
    if caller.can_access_store(&ticket.store_id) {
        Ok(())
    } else {
        Err(ServiceError::PermissionDenied(
            "ticket belongs to another store".into(),
        ))
    }
}

pub(super) fn load_ticket(tx: &dyn SQLExecutor, id: &str) -> Result<Ticket, ServiceError> {
    let rows = tx
        .query(
            &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?1"),
            &[Value::Text(id.to_string())],
        )
        .map_err(storage)?;
    let row = rows
        .first()
        .ok_or_else(|| ServiceError::NotFound(format!("ticket '{id}' not found")))?;
    row_to_ticket(row)
}

fn insert_ticket(tx: &dyn SQLExecutor, t: &Ticket) -> Result<(), ServiceError> {
    tx.exec(
        &format!(
            "INSERT INTO tickets ({TICKET_COLUMNS}) VALUES \
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)"
        ),
        &[
            Value::Text(t.id.clone()),
            Value::Text(t.store_id.clone()),
            Value::opt_text(t.device_id.as_deref()),
            Value::Text(t.requester_name.clone()),
            Value::Text(t.title.clone()),
            Value::Text(t.description.clone()),
            Value::Text(t.category.as_str().into()),
            Value::Text(t.impact.as_str().into()),
            Value::Text(t.priority.as_str().into()),
            Value::Text(t.status.as_str().into()),
            Value::opt_text(t.assigned_to.as_deref()),
            Value::Text(t.created_at.clone()),
            Value::Text(t.updated_at.clone()),
            Value::opt_text(t.closed_at.as_deref()),
            Value::opt_text(t.close_code.map(|c| c.as_str())),
            Value::opt_text(t.resolution_note.as_deref()),
        ],
    )
    .map_err(storage)?;
    Ok(())
}

fn row_to_ticket(row: &Row) -> Result<Ticket, ServiceError> {
    let close_code = match row.get_str("close_code") {
        Some(raw) => Some(
            CloseCode::parse(raw)
                .ok_or_else(|| ServiceError::Storage(format!("bad close_code value {raw:?}")))?,
        ),
        None => None,
    };
    Ok(Ticket {
        id: text(row, "id")?,
        store_id: text(row, "store_id")?,
        device_id: opt_text(row, "device_id"),
        requester_name: text(row, "requester_name")?,
        title: text(row, "title")?,
        description: text(row, "description")?,
        category: wire(row, "category", Category::parse)?,
        impact: wire(row, "impact", Impact::parse)?,
        priority: wire(row, "priority", Priority::parse)?,
        status: wire(row, "status", Status::parse)?,
        assigned_to: opt_text(row, "assigned_to"),
        created_at: text(row, "created_at")?,
        updated_at: text(row, "updated_at")?,
        closed_at: opt_text(row, "closed_at"),
        close_code,
        resolution_note: opt_text(row, "resolution_note"),
    })
}

/// Normalise a date filter to the stored timestamp format.
///
/// A bare date means the start of that day for a lower bound and the end
/// of it for an upper bound. Datetimes without an offset are taken as UTC.
fn parse_bound(raw: &str, upper: bool) -> Result<String, ServiceError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(format_timestamp(ts.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(format_timestamp(Utc.from_utc_datetime(&naive)));
    }
    let day = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ServiceError::Validation(format!("invalid date '{raw}'")))?;
    let naive = if upper {
        day.and_hms_micro_opt(23, 59, 59, 999_999)
    } else {
        day.and_hms_opt(0, 0, 0)
    }
    .ok_or_else(|| ServiceError::Validation(format!("invalid date '{raw}'")))?;
    Ok(format_timestamp(Utc.from_utc_datetime(&naive)))
}

#[cfg(test)]
mod tests {
    use std::thread::sleep;
    use std::time::Duration;

    use super::*;
    use crate::model::{CreateDevice, UpdateStore};
    use crate::service::tests::{
        admin, make_store, make_ticket, password_admin, store_caller, test_service, ticket_input,
    };

    #[test]
    fn create_derives_priority_and_opens() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let caller = store_caller(&store);

        for (impact, priority) in [
            (Impact::SalesStopped, Priority::P1),
            (Impact::Partial, Priority::P2),
            (Impact::Info, Priority::P3),
        ] {
            let t = svc.create_ticket(&caller, ticket_input(&store, impact)).unwrap();
            assert_eq!(t.priority, priority);
            assert_eq!(t.status, Status::Open);
            assert_eq!(t.created_at, t.updated_at);
            assert!(t.closed_at.is_none());
        }
    }

    #[test]
    fn store_cannot_file_for_another_store() {
        let (svc, _dir) = test_service();
        let a = make_store(&svc, "A");
        let b = make_store(&svc, "B");
        let err = svc
            .create_ticket(&store_caller(&a), ticket_input(&b, Impact::Info))
            .unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));

        assert!(svc.create_ticket(&admin(), ticket_input(&b, Impact::Info)).is_ok());
    }

    #[test]
    fn inactive_or_unknown_store_is_invalid() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        svc.update_store(&store.id, UpdateStore { name: None, is_active: Some(false) })
            .unwrap();
        let err = svc
            .create_ticket(&admin(), ticket_input(&store, Impact::Info))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let mut input = ticket_input(&store, Impact::Info);
        input.store_id = "ghost".into();
        let err = svc.create_ticket(&admin(), input).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn device_must_belong_to_store() {
        let (svc, _dir) = test_service();
        let a = make_store(&svc, "A");
        let b = make_store(&svc, "B");
        let device = |store_id: &str| {
            svc.create_device(
                store_id,
                CreateDevice {
                    label: "router".into(),
                    device_type: "network".into(),
                    serial: None,
                },
            )
            .unwrap()
        };
        let own = device(&a.id);
        let foreign = device(&b.id);

        let mut input = ticket_input(&a, Impact::Partial);
        input.device_id = Some(foreign.id.clone());
        let err = svc.create_ticket(&store_caller(&a), input).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let mut input = ticket_input(&a, Impact::Partial);
        input.device_id = Some("missing".into());
        assert!(matches!(
            svc.create_ticket(&store_caller(&a), input).unwrap_err(),
            ServiceError::Validation(_)
        ));

        let mut input = ticket_input(&a, Impact::Partial);
        input.device_id = Some(own.id.clone());
        let t = svc.create_ticket(&store_caller(&a), input).unwrap();
        assert_eq!(t.device_id.as_deref(), Some(own.id.as_str()));
    }

    #[test]
    fn deleting_device_detaches_ticket() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let device = svc
            .create_device(
                &store.id,
                CreateDevice {
                    label: "printer".into(),
                    device_type: "printer".into(),
                    serial: Some("P-1".into()),
                },
            )
            .unwrap();
        let mut input = ticket_input(&store, Impact::Info);
        input.device_id = Some(device.id.clone());
        let t = svc.create_ticket(&admin(), input).unwrap();

        svc.delete_device(&device.id).unwrap();
        let detail = svc.get_ticket(&admin(), &t.id).unwrap();
        assert_eq!(detail.ticket.device_id, None);
    }

    #[test]
    fn store_list_requires_store_id() {
        let (svc, _dir) = test_service();
        let a = make_store(&svc, "A");
        let b = make_store(&svc, "B");
        make_ticket(&svc, &a);
        make_ticket(&svc, &b);

        let err = svc
            .list_store_tickets(&store_caller(&a), &TicketFilter::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let own = TicketFilter {
            store_id: Some(a.id.clone()),
            ..Default::default()
        };
        assert_eq!(svc.list_store_tickets(&store_caller(&a), &own).unwrap().len(), 1);

        let other = TicketFilter {
            store_id: Some(b.id.clone()),
            ..Default::default()
        };
        assert!(matches!(
            svc.list_store_tickets(&store_caller(&a), &other).unwrap_err(),
            ServiceError::PermissionDenied(_)
        ));

        assert_eq!(svc.list_tickets(&TicketFilter::default()).unwrap().len(), 2);
    }

    #[test]
    fn filters_narrow_and_intersect() {
        let (svc, _dir) = test_service();
        let a = make_store(&svc, "A");
        let b = make_store(&svc, "B");

        let mut wan = ticket_input(&a, Impact::SalesStopped);
        wan.category = Category::InternetWan;
        let t1 = svc.create_ticket(&admin(), wan).unwrap();
        let t2 = svc.create_ticket(&admin(), ticket_input(&a, Impact::Info)).unwrap();
        let t3 = svc.create_ticket(&admin(), ticket_input(&b, Impact::SalesStopped)).unwrap();

        let ids = |f: TicketFilter| -> Vec<String> {
            svc.list_tickets(&f).unwrap().into_iter().map(|t| t.id).collect()
        };

        assert_eq!(ids(TicketFilter::default()), [t3.id.clone(), t2.id.clone(), t1.id.clone()]);
        assert_eq!(
            ids(TicketFilter { store_id: Some(a.id.clone()), ..Default::default() }),
            [t2.id.clone(), t1.id.clone()]
        );
        assert_eq!(
            ids(TicketFilter { category: Some(Category::Pos), ..Default::default() }),
            [t3.id.clone(), t2.id.clone()]
        );
        assert_eq!(
            ids(TicketFilter { priority: Some(Priority::P1), ..Default::default() }),
            [t3.id.clone(), t1.id.clone()]
        );
        assert_eq!(
            ids(TicketFilter { impact: Some(Impact::Info), ..Default::default() }),
            [t2.id.clone()]
        );
        assert_eq!(
            ids(TicketFilter {
                store_id: Some(a.id.clone()),
                priority: Some(Priority::P1),
                ..Default::default()
            }),
            [t1.id.clone()]
        );

        svc.update_ticket(
            &admin(),
            &t2.id,
            UpdateTicket { status: Some(Status::Resolved), ..Default::default() },
        )
        .unwrap();
        assert_eq!(
            ids(TicketFilter { status: Some(Status::Resolved), ..Default::default() }),
            [t2.id.clone()]
        );
    }

    #[test]
    fn date_filters_bound_created_at() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = make_ticket(&svc, &store);
        let today = &t.created_at[..10];

        let by_day = TicketFilter {
            start_date: Some(today.to_string()),
            end_date: Some(today.to_string()),
            ..Default::default()
        };
        assert_eq!(svc.list_tickets(&by_day).unwrap().len(), 1);

        let future = TicketFilter {
            start_date: Some("2999-01-01T00:00:00Z".into()),
            ..Default::default()
        };
        assert!(svc.list_tickets(&future).unwrap().is_empty());

        let past = TicketFilter {
            end_date: Some("2000-01-01".into()),
            ..Default::default()
        };
        assert!(svc.list_tickets(&past).unwrap().is_empty());

        let bad = TicketFilter {
            start_date: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.list_tickets(&bad).unwrap_err(),
            ServiceError::Validation(_)
        ));
    }

    #[test]
    fn get_respects_store_scope() {
        let (svc, _dir) = test_service();
        let a = make_store(&svc, "A");
        let b = make_store(&svc, "B");
        let t = make_ticket(&svc, &a);

        assert_eq!(svc.get_ticket(&store_caller(&a), &t.id).unwrap().ticket.id, t.id);
        assert!(matches!(
            svc.get_ticket(&store_caller(&b), &t.id).unwrap_err(),
            ServiceError::PermissionDenied(_)
        ));
        assert!(svc.get_ticket(&admin(), &t.id).is_ok());
        assert!(svc.get_ticket(&password_admin(), &t.id).is_ok());
        assert!(matches!(
            svc.get_ticket(&admin(), "missing").unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn assigning_open_ticket_starts_progress() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = make_ticket(&svc, &store);

        let assign = || UpdateTicket {
            assigned_to: Some("bob".into()),
            ..Default::default()
        };
        let t = svc.update_ticket(&admin(), &t.id, assign()).unwrap();
        assert_eq!(t.status, Status::InProgress);
        assert_eq!(t.assigned_to.as_deref(), Some("bob"));

        let t = svc.update_ticket(&admin(), &t.id, assign()).unwrap();
        assert_eq!(t.status, Status::InProgress);

        svc.update_ticket(
            &admin(),
            &t.id,
            UpdateTicket { status: Some(Status::WaitingStore), ..Default::default() },
        )
        .unwrap();
        let t = svc.update_ticket(&admin(), &t.id, assign()).unwrap();
        assert_eq!(t.status, Status::WaitingStore);
    }

    #[test]
    fn explicit_status_wins_over_auto_advance() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = make_ticket(&svc, &store);
        let t = svc
            .update_ticket(
                &admin(),
                &t.id,
                UpdateTicket {
                    assigned_to: Some("bob".into()),
                    status: Some(Status::WaitingStore),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(t.status, Status::WaitingStore);
    }

    #[test]
    fn closing_restamps_closed_at() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = make_ticket(&svc, &store);
        let close = || UpdateTicket {
            status: Some(Status::Closed),
            ..Default::default()
        };

        let first = svc.update_ticket(&admin(), &t.id, close()).unwrap();
        let first_closed = first.closed_at.clone().unwrap();
        sleep(Duration::from_millis(5));
        let second = svc.update_ticket(&admin(), &t.id, close()).unwrap();
        assert!(second.closed_at.unwrap() > first_closed);
        assert!(second.updated_at > first.updated_at);
    }

    #[test]
    fn reopening_keeps_close_details() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = make_ticket(&svc, &store);
        svc.update_ticket(
            &admin(),
            &t.id,
            UpdateTicket {
                status: Some(Status::Closed),
                close_code: Some(CloseCode::Duplicate),
                resolution_note: Some("see other ticket".into()),
                ..Default::default()
            },
        )
        .unwrap();
        let t = svc
            .update_ticket(
                &admin(),
                &t.id,
                UpdateTicket { status: Some(Status::Open), ..Default::default() },
            )
            .unwrap();
        assert_eq!(t.status, Status::Open);
        assert!(t.closed_at.is_some());
        assert_eq!(t.close_code, Some(CloseCode::Duplicate));
        assert_eq!(t.resolution_note.as_deref(), Some("see other ticket"));
    }

    #[test]
    fn priority_override_sticks() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = make_ticket(&svc, &store);
        let t = svc
            .update_ticket(
                &password_admin(),
                &t.id,
                UpdateTicket { priority: Some(Priority::P4), ..Default::default() },
            )
            .unwrap();
        assert_eq!(t.priority, Priority::P4);
        assert_eq!(t.impact, Impact::Partial);
        let t = svc.get_ticket(&admin(), &t.id).unwrap().ticket;
        assert_eq!(t.priority, Priority::P4);
    }

    #[test]
    fn store_cannot_update() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = make_ticket(&svc, &store);
        let err = svc
            .update_ticket(&store_caller(&store), &t.id, UpdateTicket::default())
            .unwrap_err();
        assert!(matches!(err, ServiceError::PermissionDenied(_)));
        assert!(matches!(
            svc.update_ticket(&admin(), "missing", UpdateTicket::default()).unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[test]
    fn lifecycle_scenario() {
        let (svc, _dir) = test_service();
        let store = make_store(&svc, "A");
        let t = svc
            .create_ticket(&store_caller(&store), ticket_input(&store, Impact::SalesStopped))
            .unwrap();
        assert_eq!((t.priority, t.status), (Priority::P1, Status::Open));

        let t = svc
            .update_ticket(
                &admin(),
                &t.id,
                UpdateTicket { assigned_to: Some("bob".into()), ..Default::default() },
            )
            .unwrap();
        assert_eq!(t.status, Status::InProgress);

        let t = svc
            .update_ticket(
                &admin(),
                &t.id,
                UpdateTicket {
                    status: Some(Status::Closed),
                    close_code: Some(CloseCode::Fixed),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(t.status, Status::Closed);
        assert!(t.closed_at.is_some());
        assert_eq!(t.close_code, Some(CloseCode::Fixed));
        assert_eq!(t.store_id, store.id);
    }

    #[test]
    fn date_bounds() {
        assert_eq!(
            parse_bound("2024-03-01", false).unwrap(),
            "2024-03-01T00:00:00.000000Z"
        );
        assert_eq!(
            parse_bound("2024-03-01", true).unwrap(),
            "2024-03-01T23:59:59.999999Z"
        );
        assert_eq!(
            parse_bound("2024-03-01T10:00:00+02:00", false).unwrap(),
            "2024-03-01T08:00:00.000000Z"
        );
        assert_eq!(
            parse_bound("2024-03-01T10:00:00", false).unwrap(),
            "2024-03-01T10:00:00.000000Z"
        );
    }
}
