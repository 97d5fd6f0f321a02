// Catalog entities
// Events and their priced ticket types; the catalog is read-only to the core
// except for the `sold` counter, which only the inventory ledger mutates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EventId, EventStatus, TicketTypeId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub status: EventStatus,
}

impl EventRecord {
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.starts_at < now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketType {
    pub id: TicketTypeId,
    pub event_id: EventId,
    pub name: String,
    /// Unit price in santim (1 birr = 100 santim).
    pub price_cents: i64,
    pub quantity: u32,
    pub sold: u32,
    pub max_per_order: u32,
}

impl TicketType {
    pub fn available(&self) -> u32 {
        self.quantity.saturating_sub(self.sold)
    }
}
