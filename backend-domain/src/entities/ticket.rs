// Ticket entity
// The scannable code is the sole credential checked at venue entry; it is
// rotated when ownership moves through a claimed transfer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{EventId, OrderId, TicketId, TicketStatus, TicketTypeId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub code: String,
    pub owner_id: UserId,
    pub order_id: OrderId,
    pub ticket_type_id: TicketTypeId,
    pub event_id: EventId,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}
