use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use helpdesk_auth::api::{AnyCaller, TicketAdmin};
use helpdesk_core::{ListResult, ServiceError};

use crate::api::AppState;
use crate::model::{
    Attachment, Comment, CreateComment, CreateTicket, Ticket, TicketDetail, TicketFilter,
    UpdateTicket, Upload,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tickets", post(create_ticket).get(list_tickets))
        .route("/tickets/{id}", get(get_ticket))
        .route("/tickets/{id}/comments", post(add_comment))
        .route("/tickets/{id}/attachments", post(add_attachment))
        .route("/admin/tickets", get(admin_list_tickets))
        .route("/admin/tickets/{id}", patch(update_ticket))
}

async fn create_ticket(
    State(state): State<AppState>,
    AnyCaller(caller): AnyCaller,
    Json(input): Json<CreateTicket>,
) -> Result<(StatusCode, Json<Ticket>), ServiceError> {
    let ticket = state.svc.create_ticket(&caller, input)?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /tickets?store_id=…: one store's tickets.
async fn list_tickets(
    State(state): State<AppState>,
    AnyCaller(caller): AnyCaller,
    Query(filter): Query<TicketFilter>,
) -> Result<Json<ListResult<Ticket>>, ServiceError> {
    let items = state.svc.list_store_tickets(&caller, &filter)?;
    Ok(Json(ListResult::from_items(items)))
}

/// GET /admin/tickets: every store, all filters optional.
async fn admin_list_tickets(
    State(state): State<AppState>,
    _: TicketAdmin,
    Query(filter): Query<TicketFilter>,
) -> Result<Json<ListResult<Ticket>>, ServiceError> {
    let items = state.svc.list_tickets(&filter)?;
    Ok(Json(ListResult::from_items(items)))
}

async fn get_ticket(
    State(state): State<AppState>,
    AnyCaller(caller): AnyCaller,
    Path(id): Path<String>,
) -> Result<Json<TicketDetail>, ServiceError> {
    Ok(Json(state.svc.get_ticket(&caller, &id)?))
}

async fn update_ticket(
    State(state): State<AppState>,
    TicketAdmin(caller): TicketAdmin,
    Path(id): Path<String>,
    Json(patch): Json<UpdateTicket>,
) -> Result<Json<Ticket>, ServiceError> {
    Ok(Json(state.svc.update_ticket(&caller, &id, patch)?))
}

async fn add_comment(
    State(state): State<AppState>,
    AnyCaller(caller): AnyCaller,
    Path(id): Path<String>,
    Json(input): Json<CreateComment>,
) -> Result<(StatusCode, Json<Comment>), ServiceError> {
    let comment = state.svc.add_comment(&caller, &id, input)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// POST /tickets/{id}/attachments: multipart form with a `file` field.
async fn add_attachment(
    State(state): State<AppState>,
    AnyCaller(caller): AnyCaller,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Attachment>), ServiceError> {
    let upload = read_file_field(&mut multipart).await?;
    let attachment = state.svc.add_attachment(&caller, &id, upload)?;
    Ok((StatusCode::CREATED, Json(attachment)))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Upload, ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::Validation(format!("bad multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| ServiceError::Validation(format!("bad multipart body: {e}")))?;
        return Ok(Upload {
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }
    Err(ServiceError::Validation("file field is required".into()))
}
