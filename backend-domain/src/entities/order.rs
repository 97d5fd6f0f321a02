// Order entity
// One purchase transaction for a set of ticket-type line items by one buyer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EventId, OrderId, OrderStatus, TicketTypeId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub ticket_type_id: TicketTypeId,
    pub quantity: u32,
    /// Unit price at purchase time, in santim.
    pub unit_price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub buyer_id: UserId,
    pub event_id: EventId,
    pub line_items: Vec<OrderLineItem>,
    pub status: OrderStatus,
    pub subtotal_cents: i64,
    pub service_fee_cents: i64,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn ticket_count(&self) -> u32 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }
}
