// In-memory transactional store
// Implements every store port behind one RwLock. Each mutating method takes
// the write guard for its whole check-and-write, which is exactly the
// single-row conditional update (and, for complete_claim and
// create_if_none_pending, the multi-row transaction) the core requires.

use std::cmp::Reverse;
use std::collections::HashMap;

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use backend_domain::ports::{
    CancelOutcome, CatalogRepository, ClaimOutcome, CreateTransferOutcome, InventoryRepository,
    MarkPaidOutcome, OrderRepository, ReserveOutcome, TicketRepository, TransferRepository,
};
use backend_domain::{
    EventId, EventRecord, Order, OrderId, OrderStatus, Ticket, TicketId, TicketStatus, TicketType,
    TicketTypeId, TransferRequest, TransferRequestId, TransferStatus, UserId,
};

#[derive(Default)]
struct StoreInner {
    events: HashMap<EventId, EventRecord>,
    ticket_types: HashMap<TicketTypeId, TicketType>,
    orders: HashMap<OrderId, Order>,
    tickets: HashMap<TicketId, Ticket>,
    tickets_by_code: HashMap<String, TicketId>,
    transfers: HashMap<TransferRequestId, TransferRequest>,
    transfers_by_code: HashMap<String, TransferRequestId>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_catalog(&self, events: Vec<EventRecord>, ticket_types: Vec<TicketType>) {
        let mut inner = self.inner.write().await;
        for event in events {
            inner.events.insert(event.id.clone(), event);
        }
        for ticket_type in ticket_types {
            inner.ticket_types.insert(ticket_type.id.clone(), ticket_type);
        }
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn get_event(&self, event_id: &EventId) -> anyhow::Result<Option<EventRecord>> {
        Ok(self.inner.read().await.events.get(event_id).cloned())
    }

    async fn get_ticket_type(&self, id: &TicketTypeId) -> anyhow::Result<Option<TicketType>> {
        Ok(self.inner.read().await.ticket_types.get(id).cloned())
    }

    async fn ticket_types_for_event(&self, event_id: &EventId) -> anyhow::Result<Vec<TicketType>> {
        let inner = self.inner.read().await;
        let mut types: Vec<TicketType> = inner
            .ticket_types
            .values()
            .filter(|tt| tt.event_id == *event_id)
            .cloned()
            .collect();
        types.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(types)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let _ = self.inner.read().await;
        Ok(())
    }
}

#[async_trait]
impl InventoryRepository for InMemoryStore {
    async fn try_reserve(&self, id: &TicketTypeId, quantity: u32) -> anyhow::Result<ReserveOutcome> {
        let mut inner = self.inner.write().await;
        let Some(ticket_type) = inner.ticket_types.get_mut(id) else {
            return Ok(ReserveOutcome::UnknownTicketType);
        };
        let available = ticket_type.available();
        if quantity > available {
            return Ok(ReserveOutcome::Insufficient { available });
        }
        ticket_type.sold += quantity;
        Ok(ReserveOutcome::Reserved {
            sold: ticket_type.sold,
        })
    }

    async fn release(&self, id: &TicketTypeId, quantity: u32) -> anyhow::Result<u32> {
        let mut inner = self.inner.write().await;
        let Some(ticket_type) = inner.ticket_types.get_mut(id) else {
            bail!("cannot release inventory for unknown ticket type '{}'", id);
        };
        ticket_type.sold = ticket_type.sold.saturating_sub(quantity);
        Ok(ticket_type.sold)
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn insert(&self, order: Order) -> anyhow::Result<()> {
        let mut inner = self.inner.write().await;
        if inner.orders.contains_key(&order.id) {
            bail!("order '{}' already exists", order.id);
        }
        inner.orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn get(&self, id: &OrderId) -> anyhow::Result<Option<Order>> {
        Ok(self.inner.read().await.orders.get(id).cloned())
    }

    async fn mark_paid(&self, id: &OrderId, paid_at: DateTime<Utc>) -> anyhow::Result<MarkPaidOutcome> {
        let mut inner = self.inner.write().await;
        let Some(order) = inner.orders.get_mut(id) else {
            return Ok(MarkPaidOutcome::NotFound);
        };
        match order.status {
            OrderStatus::Pending => {
                order.status = OrderStatus::Paid;
                order.paid_at = Some(paid_at);
                Ok(MarkPaidOutcome::Transitioned(order.clone()))
            }
            OrderStatus::Paid => Ok(MarkPaidOutcome::AlreadyPaid(order.clone())),
            OrderStatus::Cancelled => Ok(MarkPaidOutcome::NotPayable(order.clone())),
        }
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn insert_if_code_free(&self, ticket: Ticket) -> anyhow::Result<bool> {
        let mut inner = self.inner.write().await;
        if inner.tickets_by_code.contains_key(&ticket.code) {
            return Ok(false);
        }
        inner
            .tickets_by_code
            .insert(ticket.code.clone(), ticket.id.clone());
        inner.tickets.insert(ticket.id.clone(), ticket);
        Ok(true)
    }

    async fn get(&self, id: &TicketId) -> anyhow::Result<Option<Ticket>> {
        Ok(self.inner.read().await.tickets.get(id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Ticket>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tickets_by_code
            .get(code)
            .and_then(|id| inner.tickets.get(id))
            .cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> anyhow::Result<Vec<Ticket>> {
        let inner = self.inner.read().await;
        let mut tickets: Vec<Ticket> = inner
            .tickets
            .values()
            .filter(|ticket| ticket.owner_id == *owner)
            .cloned()
            .collect();
        tickets.sort_by_key(|ticket| Reverse((ticket.created_at, ticket.id.0.clone())));
        Ok(tickets)
    }

    async fn list_by_order(&self, order: &OrderId) -> anyhow::Result<Vec<Ticket>> {
        let inner = self.inner.read().await;
        let mut tickets: Vec<Ticket> = inner
            .tickets
            .values()
            .filter(|ticket| ticket.order_id == *order)
            .cloned()
            .collect();
        tickets.sort_by(|a, b| a.id.0.cmp(&b.id.0));
        Ok(tickets)
    }

    async fn mark_used(&self, id: &TicketId, used_at: DateTime<Utc>) -> anyhow::Result<Option<Ticket>> {
        let mut inner = self.inner.write().await;
        let Some(ticket) = inner.tickets.get_mut(id) else {
            return Ok(None);
        };
        if ticket.status != TicketStatus::Valid {
            return Ok(None);
        }
        ticket.status = TicketStatus::Used;
        ticket.used_at = Some(used_at);
        Ok(Some(ticket.clone()))
    }
}

#[async_trait]
impl TransferRepository for InMemoryStore {
    async fn create_if_none_pending(
        &self,
        request: TransferRequest,
        now: DateTime<Utc>,
    ) -> anyhow::Result<CreateTransferOutcome> {
        let mut inner = self.inner.write().await;
        if inner.transfers_by_code.contains_key(&request.claim_code) {
            return Ok(CreateTransferOutcome::ClaimCodeTaken);
        }

        let mut stale: Vec<TransferRequestId> = Vec::new();
        for existing in inner.transfers.values() {
            if existing.ticket_id != request.ticket_id || existing.status != TransferStatus::Pending
            {
                continue;
            }
            if existing.is_expired(now) {
                stale.push(existing.id.clone());
            } else {
                return Ok(CreateTransferOutcome::AlreadyPending(existing.clone()));
            }
        }
        for id in stale {
            if let Some(existing) = inner.transfers.get_mut(&id) {
                existing.status = TransferStatus::Expired;
            }
        }

        inner
            .transfers_by_code
            .insert(request.claim_code.clone(), request.id.clone());
        inner.transfers.insert(request.id.clone(), request.clone());
        Ok(CreateTransferOutcome::Created(request))
    }

    async fn get(&self, id: &TransferRequestId) -> anyhow::Result<Option<TransferRequest>> {
        Ok(self.inner.read().await.transfers.get(id).cloned())
    }

    async fn find_by_claim_code(&self, code: &str) -> anyhow::Result<Option<TransferRequest>> {
        let inner = self.inner.read().await;
        Ok(inner
            .transfers_by_code
            .get(code)
            .and_then(|id| inner.transfers.get(id))
            .cloned())
    }

    async fn find_pending_for_ticket(
        &self,
        ticket_id: &TicketId,
    ) -> anyhow::Result<Option<TransferRequest>> {
        let inner = self.inner.read().await;
        Ok(inner
            .transfers
            .values()
            .find(|request| {
                request.ticket_id == *ticket_id && request.status == TransferStatus::Pending
            })
            .cloned())
    }

    async fn complete_claim(
        &self,
        id: &TransferRequestId,
        claimant: &UserId,
        new_code: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<ClaimOutcome> {
        let mut inner = self.inner.write().await;
        let Some(request) = inner.transfers.get(id) else {
            return Ok(ClaimOutcome::NotFound);
        };
        // A swept request and a lazily-discovered one must look the same.
        if request.status == TransferStatus::Expired {
            return Ok(ClaimOutcome::Expired(request.clone()));
        }
        if request.status != TransferStatus::Pending {
            return Ok(ClaimOutcome::NotPending(request.clone()));
        }
        if request.is_expired(now) {
            let request = inner
                .transfers
                .get_mut(id)
                .map(|request| {
                    request.status = TransferStatus::Expired;
                    request.clone()
                })
                .ok_or_else(|| anyhow!("transfer '{}' vanished mid-claim", id))?;
            return Ok(ClaimOutcome::Expired(request));
        }
        if inner.tickets_by_code.contains_key(new_code) {
            bail!("scannable code collision while claiming transfer '{}'", id);
        }

        // Both writes happen under the same guard: ownership reassignment and
        // the CLAIMED transition commit together or not at all.
        let ticket_id = request.ticket_id.clone();
        let old_code = match inner.tickets.get(&ticket_id) {
            Some(ticket) => ticket.code.clone(),
            None => bail!("ticket '{}' vanished under pending transfer '{}'", ticket_id, id),
        };
        inner.tickets_by_code.remove(&old_code);
        inner
            .tickets_by_code
            .insert(new_code.to_string(), ticket_id.clone());
        let ticket = inner
            .tickets
            .get_mut(&ticket_id)
            .map(|ticket| {
                ticket.owner_id = claimant.clone();
                ticket.code = new_code.to_string();
                ticket.clone()
            })
            .ok_or_else(|| anyhow!("ticket '{}' vanished mid-claim", ticket_id))?;
        let request = inner
            .transfers
            .get_mut(id)
            .map(|request| {
                request.status = TransferStatus::Claimed;
                request.claimed_at = Some(now);
                request.recipient_user_id = Some(claimant.clone());
                request.clone()
            })
            .ok_or_else(|| anyhow!("transfer '{}' vanished mid-claim", id))?;

        Ok(ClaimOutcome::Claimed { request, ticket })
    }

    async fn mark_cancelled(
        &self,
        id: &TransferRequestId,
        now: DateTime<Utc>,
    ) -> anyhow::Result<CancelOutcome> {
        let mut inner = self.inner.write().await;
        let Some(request) = inner.transfers.get_mut(id) else {
            return Ok(CancelOutcome::NotFound);
        };
        match request.status {
            TransferStatus::Pending if request.is_expired(now) => {
                request.status = TransferStatus::Expired;
                Ok(CancelOutcome::Expired(request.clone()))
            }
            // Cancel after expiry is idempotent whether or not a sweep
            // already persisted the lapse.
            TransferStatus::Expired => Ok(CancelOutcome::Expired(request.clone())),
            TransferStatus::Pending => {
                request.status = TransferStatus::Cancelled;
                Ok(CancelOutcome::Cancelled(request.clone()))
            }
            _ => Ok(CancelOutcome::NotPending(request.clone())),
        }
    }

    async fn expire_stale(&self, now: DateTime<Utc>) -> anyhow::Result<usize> {
        let mut inner = self.inner.write().await;
        let mut swept = 0;
        for request in inner.transfers.values_mut() {
            if request.is_expired(now) {
                request.status = TransferStatus::Expired;
                swept += 1;
            }
        }
        Ok(swept)
    }

    async fn list_pending_by_sender(
        &self,
        sender: &UserId,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<TransferRequest>> {
        let inner = self.inner.read().await;
        let mut requests: Vec<TransferRequest> = inner
            .transfers
            .values()
            .filter(|request| {
                request.sender_id == *sender
                    && request.status == TransferStatus::Pending
                    && !request.is_expired(now)
            })
            .cloned()
            .collect();
        requests.sort_by_key(|request| Reverse((request.created_at, request.id.0.clone())));
        Ok(requests)
    }

    async fn list_involving_user(&self, user: &UserId) -> anyhow::Result<Vec<TransferRequest>> {
        let inner = self.inner.read().await;
        let mut requests: Vec<TransferRequest> = inner
            .transfers
            .values()
            .filter(|request| {
                request.sender_id == *user || request.recipient_user_id.as_ref() == Some(user)
            })
            .cloned()
            .collect();
        requests.sort_by_key(|request| Reverse((request.created_at, request.id.0.clone())));
        Ok(requests)
    }
}
