use backend_domain::ports::TicketRepository;
use backend_domain::{Ticket, TicketId, UserId};

use crate::{AppError, AppState};

pub async fn get_user_tickets(state: &AppState, user_id: &UserId) -> Result<Vec<Ticket>, AppError> {
    Ok(state.tickets.list_by_owner(user_id).await?)
}

/// Ownership-checked read; foreign tickets look exactly like missing ones.
pub async fn get_ticket(
    state: &AppState,
    user_id: &UserId,
    ticket_id: &TicketId,
) -> Result<Ticket, AppError> {
    match state.tickets.get(ticket_id).await? {
        Some(ticket) if ticket.owner_id == *user_id => Ok(ticket),
        _ => Err(AppError::TicketNotFound),
    }
}
