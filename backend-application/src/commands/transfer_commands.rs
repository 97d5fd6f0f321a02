// Peer-to-peer ticket transfer
// State machine per request: PENDING -> CLAIMED | CANCELLED | EXPIRED.
// Expiry is lazy; every read past the TTL treats the request as terminal.

use anyhow::anyhow;
use chrono::Duration;
use tracing::info;
use uuid::Uuid;

use backend_domain::ports::{
    CancelOutcome, CatalogRepository, ClaimOutcome, Clock, CodeGenerator, CreateTransferOutcome,
    TicketRepository, TransferRepository,
};
use backend_domain::{
    RecipientContact, Ticket, TicketStatus, TransferRequest, TransferRequestId, TransferStatus,
    UserId,
};

use crate::dtos::{
    CancelTransferRequest, ClaimTransferRequest, InitiateTransferRequest, TransferInitiated,
};
use crate::{AppError, AppState};

const CLAIM_CODE_ATTEMPTS: usize = 8;

pub async fn initiate_transfer(
    state: &AppState,
    sender_id: UserId,
    payload: InitiateTransferRequest,
) -> Result<TransferInitiated, AppError> {
    let recipient = RecipientContact::normalized(payload.recipient_phone, payload.recipient_email)
        .ok_or(AppError::InvalidRecipient)?;

    // A missing ticket and a foreign ticket are indistinguishable to the
    // caller; ticket ids must not be probeable.
    let ticket = match state.tickets.get(&payload.ticket_id).await? {
        Some(ticket) if ticket.owner_id == sender_id => ticket,
        _ => return Err(AppError::TransferDenied),
    };
    if ticket.status != TicketStatus::Valid {
        return Err(AppError::TicketNotTransferable {
            status: ticket.status,
        });
    }

    let now = state.clock.now();
    let event = state
        .catalog
        .get_event(&ticket.event_id)
        .await?
        .ok_or_else(|| anyhow!("catalog missing event '{}'", ticket.event_id))?;
    if event.is_past(now) {
        return Err(AppError::EventAlreadyPassed);
    }

    let expires_at = now + Duration::hours(state.config.transfer_expiry_hours as i64);
    let message = normalize_message(payload.message);

    for _ in 0..CLAIM_CODE_ATTEMPTS {
        let request = TransferRequest {
            id: TransferRequestId(Uuid::new_v4().to_string()),
            ticket_id: ticket.id.clone(),
            sender_id: sender_id.clone(),
            recipient: recipient.clone(),
            message: message.clone(),
            claim_code: state.codes.claim_code(),
            status: TransferStatus::Pending,
            created_at: now,
            expires_at,
            claimed_at: None,
            recipient_user_id: None,
        };
        match state.transfers.create_if_none_pending(request, now).await? {
            CreateTransferOutcome::Created(request) => {
                state.metrics.record_transfer_initiated();
                info!(
                    "transfer {} initiated for ticket {} by {}",
                    request.id, request.ticket_id, sender_id
                );
                let claim_url = format!(
                    "{}/tickets/claim?code={}",
                    state.config.public_base_url, request.claim_code
                );
                return Ok(TransferInitiated {
                    transfer: request,
                    claim_url,
                });
            }
            CreateTransferOutcome::AlreadyPending(_) => {
                return Err(AppError::TransferAlreadyPending)
            }
            CreateTransferOutcome::ClaimCodeTaken => continue,
        }
    }
    Err(AppError::Internal(anyhow!(
        "could not mint a unique claim code after {} attempts",
        CLAIM_CODE_ATTEMPTS
    )))
}

pub async fn claim_transfer(
    state: &AppState,
    claimant_id: UserId,
    payload: ClaimTransferRequest,
) -> Result<Ticket, AppError> {
    let code = normalize_claim_code(&payload.claim_code);
    if code.is_empty() {
        return Err(AppError::TransferNotFound);
    }

    let request = state
        .transfers
        .find_by_claim_code(&code)
        .await?
        .ok_or(AppError::TransferNotFound)?;
    if request.sender_id == claimant_id {
        return Err(AppError::CannotClaimOwnTransfer);
    }

    let now = state.clock.now();
    // The claim rotates the scannable code: the sender's old QR must die the
    // moment ownership moves.
    let new_code = state.issuer.rotated_code();
    match state
        .transfers
        .complete_claim(&request.id, &claimant_id, &new_code, now)
        .await?
    {
        ClaimOutcome::Claimed { request, ticket } => {
            state.metrics.record_transfer_claimed();
            info!(
                "transfer {} claimed by {}; ticket {} reassigned",
                request.id, claimant_id, ticket.id
            );
            Ok(ticket)
        }
        ClaimOutcome::Expired(_) => Err(AppError::TransferExpired),
        ClaimOutcome::NotPending(request) => Err(AppError::TransferNotPending {
            status: request.status,
        }),
        ClaimOutcome::NotFound => Err(AppError::TransferNotFound),
    }
}

pub async fn cancel_transfer(
    state: &AppState,
    sender_id: UserId,
    payload: CancelTransferRequest,
) -> Result<TransferRequest, AppError> {
    let request = resolve_request(state, &payload).await?;
    if request.sender_id != sender_id {
        return Err(AppError::NotTransferOwner);
    }

    let now = state.clock.now();
    match state.transfers.mark_cancelled(&request.id, now).await? {
        CancelOutcome::Cancelled(request) => {
            state.metrics.record_transfer_cancelled();
            info!("transfer {} cancelled by sender", request.id);
            Ok(request)
        }
        // Cancelling an already-lapsed offer is a no-op, not an error: the
        // caller learns the request is EXPIRED either way.
        CancelOutcome::Expired(request) => Ok(request),
        CancelOutcome::NotPending(request) => Err(AppError::TransferNotPending {
            status: request.status,
        }),
        CancelOutcome::NotFound => Err(AppError::TransferNotFound),
    }
}

async fn resolve_request(
    state: &AppState,
    payload: &CancelTransferRequest,
) -> Result<TransferRequest, AppError> {
    if let Some(transfer_id) = &payload.transfer_id {
        return state
            .transfers
            .get(transfer_id)
            .await?
            .ok_or(AppError::TransferNotFound);
    }
    if let Some(ticket_id) = &payload.ticket_id {
        return state
            .transfers
            .find_pending_for_ticket(ticket_id)
            .await?
            .ok_or(AppError::TransferNotFound);
    }
    Err(AppError::BadRequest(
        "transfer_id or ticket_id required".to_string(),
    ))
}

fn normalize_claim_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

fn normalize_message(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
