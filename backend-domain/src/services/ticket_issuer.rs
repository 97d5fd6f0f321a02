// Ticket issuer
// Mints tickets with globally unique scannable codes for a paid order.

use std::sync::Arc;

use anyhow::bail;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{Ticket, TicketType};
use crate::ports::{CodeGenerator, TicketRepository};
use crate::value_objects::{OrderId, TicketId, TicketStatus, UserId};

// A collision on a fresh 128-bit code means either a broken generator or a
// broken store index; give up loudly after a handful of attempts.
const MAX_CODE_ATTEMPTS: usize = 8;

pub struct TicketIssuer {
    tickets: Arc<dyn TicketRepository>,
    codes: Arc<dyn CodeGenerator>,
}

impl TicketIssuer {
    pub fn new(tickets: Arc<dyn TicketRepository>, codes: Arc<dyn CodeGenerator>) -> Self {
        Self { tickets, codes }
    }

    /// Creates `count` VALID tickets for one order line item, each with an
    /// independently generated code.
    pub async fn issue(
        &self,
        order_id: &OrderId,
        ticket_type: &TicketType,
        owner: &UserId,
        count: u32,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Ticket>> {
        let mut issued = Vec::with_capacity(count as usize);
        for _ in 0..count {
            issued.push(self.mint_one(order_id, ticket_type, owner, now).await?);
        }
        Ok(issued)
    }

    /// A fresh code for a transfer claim; the old credential dies with the
    /// ownership change.
    pub fn rotated_code(&self) -> String {
        self.codes.scannable_code()
    }

    async fn mint_one(
        &self,
        order_id: &OrderId,
        ticket_type: &TicketType,
        owner: &UserId,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Ticket> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let ticket = Ticket {
                id: TicketId(Uuid::new_v4().to_string()),
                code: self.codes.scannable_code(),
                owner_id: owner.clone(),
                order_id: order_id.clone(),
                ticket_type_id: ticket_type.id.clone(),
                event_id: ticket_type.event_id.clone(),
                status: TicketStatus::Valid,
                created_at: now,
                used_at: None,
            };
            if self.tickets.insert_if_code_free(ticket.clone()).await? {
                return Ok(ticket);
            }
        }
        bail!(
            "could not mint a unique scannable code after {} attempts",
            MAX_CODE_ATTEMPTS
        );
    }
}
