use backend_domain::ports::{Clock, TransferRepository};
use backend_domain::{TransferRequest, UserId};

use crate::dtos::{TransferDirection, TransferHistoryEntry};
use crate::{AppError, AppState};

/// Outgoing transfers still open for claiming, newest first.
pub async fn get_pending_transfers(
    state: &AppState,
    user_id: &UserId,
) -> Result<Vec<TransferRequest>, AppError> {
    let now = state.clock.now();
    Ok(state.transfers.list_pending_by_sender(user_id, now).await?)
}

/// Every transfer the user sent or received, newest first, with lazy expiry
/// applied to the reported status.
pub async fn get_transfer_history(
    state: &AppState,
    user_id: &UserId,
) -> Result<Vec<TransferHistoryEntry>, AppError> {
    let now = state.clock.now();
    let transfers = state.transfers.list_involving_user(user_id).await?;
    Ok(transfers
        .into_iter()
        .map(|request| {
            let direction = if request.sender_id == *user_id {
                TransferDirection::Sent
            } else {
                TransferDirection::Received
            };
            TransferHistoryEntry {
                id: request.id.clone(),
                ticket_id: request.ticket_id.clone(),
                direction,
                status: request.effective_status(now),
                created_at: request.created_at,
                claimed_at: request.claimed_at,
            }
        })
        .collect())
}
