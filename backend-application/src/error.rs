use chrono::{DateTime, Utc};
use thiserror::Error;

use backend_domain::{InventoryError, OrderStatus, TicketStatus, TicketTypeId, TransferStatus};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("invalid line item: {0}")]
    InvalidLineItem(String),
    #[error("recipient phone or email required")]
    InvalidRecipient,
    #[error("event not found")]
    EventNotFound,
    #[error("event is not available for purchase")]
    EventNotPurchasable,
    #[error("event has already passed")]
    EventAlreadyPassed,
    #[error("insufficient inventory for ticket type '{ticket_type_id}': requested {requested}, {available} available")]
    InsufficientInventory {
        ticket_type_id: TicketTypeId,
        requested: u32,
        available: u32,
    },
    #[error("order not found")]
    OrderNotFound,
    #[error("order is not payable from status {}", .status.as_str())]
    OrderNotPayable { status: OrderStatus },
    #[error("ticket not found")]
    TicketNotFound,
    #[error("ticket already used")]
    TicketAlreadyUsed { used_at: Option<DateTime<Utc>> },
    #[error("ticket is not redeemable: {}", .status.as_str())]
    TicketNotRedeemable { status: TicketStatus },
    #[error("ticket cannot be transferred: {}", .status.as_str())]
    TicketNotTransferable { status: TicketStatus },
    #[error("transfer denied")]
    TransferDenied,
    #[error("this ticket already has a pending transfer")]
    TransferAlreadyPending,
    #[error("transfer not found")]
    TransferNotFound,
    #[error("transfer has expired")]
    TransferExpired,
    #[error("transfer is not pending: {}", .status.as_str())]
    TransferNotPending { status: TransferStatus },
    #[error("you cannot claim your own transfer")]
    CannotClaimOwnTransfer,
    #[error("you cannot cancel this transfer")]
    NotTransferOwner,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<InventoryError> for AppError {
    fn from(value: InventoryError) -> Self {
        match value {
            InventoryError::Insufficient {
                ticket_type_id,
                requested,
                available,
            } => AppError::InsufficientInventory {
                ticket_type_id,
                requested,
                available,
            },
            InventoryError::UnknownTicketType(id) => {
                AppError::InvalidLineItem(format!("unknown ticket type '{}'", id))
            }
            InventoryError::Store(err) => AppError::Internal(err),
        }
    }
}
