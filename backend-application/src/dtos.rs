// Application DTOs
// Payloads arrive already shape-validated by the boundary; the commands only
// re-check business invariants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use backend_domain::{
    EventId, Order, RuntimeConfig, Ticket, TicketId, TicketTypeId, TransferRequest,
    TransferRequestId, TransferStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseMode {
    /// No payment gateway: the order is PAID and tickets are issued in the
    /// same call.
    DirectIssue,
    /// Order stays PENDING; tickets are issued by confirm_paid_order once
    /// the payment adapter reports success.
    AwaitPayment,
}

impl PurchaseMode {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        if config.payments_enabled {
            PurchaseMode::AwaitPayment
        } else {
            PurchaseMode::DirectIssue
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseLineItem {
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRequest {
    pub event_id: EventId,
    pub items: Vec<PurchaseLineItem>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseReceipt {
    pub order: Order,
    pub tickets: Vec<Ticket>,
    /// Amount still owed, in santim; zero once the order is PAID.
    pub payment_required_cents: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderDetails {
    pub order: Order,
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateTicketRequest {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct ValidatedTicket {
    pub ticket: Ticket,
    pub event_title: String,
    pub ticket_type_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InitiateTransferRequest {
    pub ticket_id: TicketId,
    pub recipient_phone: Option<String>,
    pub recipient_email: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransferInitiated {
    pub transfer: TransferRequest,
    /// Link the sender can hand to the recipient alongside the claim code.
    pub claim_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimTransferRequest {
    pub claim_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelTransferRequest {
    pub transfer_id: Option<TransferRequestId>,
    pub ticket_id: Option<TicketId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    Sent,
    Received,
}

#[derive(Debug, Serialize)]
pub struct TransferHistoryEntry {
    pub id: TransferRequestId,
    pub ticket_id: TicketId,
    pub direction: TransferDirection,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
}
