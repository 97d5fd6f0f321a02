use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{EventRecord, Order, Ticket, TicketType, TransferRequest};
use crate::value_objects::{EventId, OrderId, TicketId, TicketTypeId, TransferRequestId, UserId};

// Every mutation below is a single atomic conditional update (or, for
// complete_claim and create_if_none_pending, one transactional group): the
// store checks and writes under the same guard, never read-then-write with a
// gap. Callers receive the losing side of a race as an outcome value, not as
// a retryable fault.

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn get_event(&self, event_id: &EventId) -> anyhow::Result<Option<EventRecord>>;
    async fn get_ticket_type(&self, id: &TicketTypeId) -> anyhow::Result<Option<TicketType>>;
    async fn ticket_types_for_event(&self, event_id: &EventId) -> anyhow::Result<Vec<TicketType>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[derive(Debug)]
pub enum ReserveOutcome {
    /// Reservation committed; carries the new sold count.
    Reserved { sold: u32 },
    Insufficient { available: u32 },
    UnknownTicketType,
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Increment `sold` by `quantity` iff `sold + quantity <= quantity_total`,
    /// in one atomic step.
    async fn try_reserve(&self, id: &TicketTypeId, quantity: u32) -> anyhow::Result<ReserveOutcome>;

    /// Decrement `sold` by `quantity` (compensating action); returns the new
    /// sold count.
    async fn release(&self, id: &TicketTypeId, quantity: u32) -> anyhow::Result<u32>;
}

#[derive(Debug)]
pub enum MarkPaidOutcome {
    /// This call won the PENDING -> PAID transition.
    Transitioned(Order),
    AlreadyPaid(Order),
    NotPayable(Order),
    NotFound,
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: Order) -> anyhow::Result<()>;
    async fn get(&self, id: &OrderId) -> anyhow::Result<Option<Order>>;
    async fn mark_paid(&self, id: &OrderId, paid_at: DateTime<Utc>) -> anyhow::Result<MarkPaidOutcome>;
}

#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Returns false (and stores nothing) when the scannable code is already
    /// taken; the issuer retries with a fresh code.
    async fn insert_if_code_free(&self, ticket: Ticket) -> anyhow::Result<bool>;
    async fn get(&self, id: &TicketId) -> anyhow::Result<Option<Ticket>>;
    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Ticket>>;
    async fn list_by_owner(&self, owner: &UserId) -> anyhow::Result<Vec<Ticket>>;
    async fn list_by_order(&self, order: &OrderId) -> anyhow::Result<Vec<Ticket>>;

    /// VALID -> USED iff still VALID; None when the conditional update loses,
    /// so the caller re-reads for the precise rejection.
    async fn mark_used(&self, id: &TicketId, used_at: DateTime<Utc>) -> anyhow::Result<Option<Ticket>>;
}

#[derive(Debug)]
pub enum CreateTransferOutcome {
    Created(TransferRequest),
    /// An active (PENDING, unexpired at `now`) request already exists.
    AlreadyPending(TransferRequest),
    /// The generated claim code is already in use; retry with a fresh one.
    ClaimCodeTaken,
}

#[derive(Debug)]
pub enum ClaimOutcome {
    Claimed {
        request: TransferRequest,
        ticket: Ticket,
    },
    Expired(TransferRequest),
    NotPending(TransferRequest),
    NotFound,
}

#[derive(Debug)]
pub enum CancelOutcome {
    Cancelled(TransferRequest),
    /// Cancel after expiry is idempotent: the request is marked EXPIRED and
    /// handed back without error.
    Expired(TransferRequest),
    NotPending(TransferRequest),
    NotFound,
}

#[async_trait]
pub trait TransferRepository: Send + Sync {
    /// Creates the request iff no active pending request exists for the
    /// ticket. A stale PENDING row (past TTL at `now`) is marked EXPIRED in
    /// the same step and does not block the new request.
    async fn create_if_none_pending(
        &self,
        request: TransferRequest,
        now: DateTime<Utc>,
    ) -> anyhow::Result<CreateTransferOutcome>;

    async fn get(&self, id: &TransferRequestId) -> anyhow::Result<Option<TransferRequest>>;
    async fn find_by_claim_code(&self, code: &str) -> anyhow::Result<Option<TransferRequest>>;

    /// The stored-PENDING request for a ticket, if any — possibly past its
    /// TTL; callers apply lazy expiry.
    async fn find_pending_for_ticket(
        &self,
        ticket_id: &TicketId,
    ) -> anyhow::Result<Option<TransferRequest>>;

    /// The dual update: reassign the ticket to `claimant` with `new_code` and
    /// mark the request CLAIMED — both or neither.
    async fn complete_claim(
        &self,
        id: &TransferRequestId,
        claimant: &UserId,
        new_code: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<ClaimOutcome>;

    async fn mark_cancelled(
        &self,
        id: &TransferRequestId,
        now: DateTime<Utc>,
    ) -> anyhow::Result<CancelOutcome>;

    /// Housekeeping: mark every stale PENDING request EXPIRED; returns how
    /// many were swept. Correctness never depends on this running.
    async fn expire_stale(&self, now: DateTime<Utc>) -> anyhow::Result<usize>;

    async fn list_pending_by_sender(
        &self,
        sender: &UserId,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<TransferRequest>>;

    /// Terminal and pending transfers the user sent or received, newest first.
    async fn list_involving_user(&self, user: &UserId) -> anyhow::Result<Vec<TransferRequest>>;
}
