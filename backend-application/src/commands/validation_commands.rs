// Ticket validation at venue entry
// At-most-once redemption: the VALID -> USED transition is a conditional
// update, so two gates scanning the same code race to exactly one success.

use anyhow::anyhow;
use tracing::info;

use backend_domain::ports::{CatalogRepository, Clock, TicketRepository};
use backend_domain::{Ticket, TicketStatus};

use crate::dtos::{ValidateTicketRequest, ValidatedTicket};
use crate::{AppError, AppState};

pub async fn validate_ticket(
    state: &AppState,
    payload: ValidateTicketRequest,
) -> Result<ValidatedTicket, AppError> {
    let code = payload.code.trim();
    if code.is_empty() {
        return Err(AppError::TicketNotFound);
    }

    let ticket = state
        .tickets
        .find_by_code(code)
        .await?
        .ok_or(AppError::TicketNotFound)?;
    if let Err(err) = redeemable(&ticket) {
        state.metrics.record_validation_reject();
        return Err(err);
    }

    let now = state.clock.now();
    match state.tickets.mark_used(&ticket.id, now).await? {
        Some(used) => {
            state.metrics.record_validation();
            info!("ticket {} validated at entry", used.id);
            with_context(state, used).await
        }
        None => {
            // Lost the conditional update; re-read for the precise rejection.
            state.metrics.record_validation_reject();
            let current = state
                .tickets
                .get(&ticket.id)
                .await?
                .ok_or(AppError::TicketNotFound)?;
            Err(redeemable(&current).err().unwrap_or(AppError::TicketNotRedeemable {
                status: current.status,
            }))
        }
    }
}

fn redeemable(ticket: &Ticket) -> Result<(), AppError> {
    match ticket.status {
        TicketStatus::Valid => Ok(()),
        TicketStatus::Used => Err(AppError::TicketAlreadyUsed {
            used_at: ticket.used_at,
        }),
        TicketStatus::Cancelled | TicketStatus::Expired => Err(AppError::TicketNotRedeemable {
            status: ticket.status,
        }),
    }
}

async fn with_context(state: &AppState, ticket: Ticket) -> Result<ValidatedTicket, AppError> {
    let event = state
        .catalog
        .get_event(&ticket.event_id)
        .await?
        .ok_or_else(|| anyhow!("catalog missing event '{}'", ticket.event_id))?;
    let ticket_type = state
        .catalog
        .get_ticket_type(&ticket.ticket_type_id)
        .await?
        .ok_or_else(|| anyhow!("catalog missing ticket type '{}'", ticket.ticket_type_id))?;
    Ok(ValidatedTicket {
        ticket,
        event_title: event.title,
        ticket_type_name: ticket_type.name,
    })
}
