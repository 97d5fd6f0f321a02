use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::validation_commands;
use backend_application::dtos::{ValidateTicketRequest, ValidatedTicket};
use backend_application::queries::ticket_queries;
use backend_application::AppState;
use backend_domain::{Ticket, TicketId};

use crate::error::HttpError;
use crate::middleware::{authorize, caller_id};

pub async fn list_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Ticket>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let caller = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let tickets = ticket_queries::get_user_tickets(&state, &caller).await?;
    Ok(Json(tickets))
}

pub async fn get_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(ticket_id): Path<String>,
) -> Result<Json<Ticket>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let caller = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let ticket = ticket_queries::get_ticket(&state, &caller, &TicketId(ticket_id)).await?;
    Ok(Json(ticket))
}

/// Gate-scanner endpoint; consumes the presented code exactly once.
pub async fn validate_ticket(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ValidateTicketRequest>,
) -> Result<Json<ValidatedTicket>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let validated = validation_commands::validate_ticket(&state, payload).await?;
    Ok(Json(validated))
}
