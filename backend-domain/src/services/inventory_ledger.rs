// Inventory ledger
// The single write path for ticket-type sold counters. Every purchase for a
// ticket type funnels through reserve(); nothing else may touch `sold`.

use std::sync::Arc;

use thiserror::Error;

use crate::ports::{InventoryRepository, ReserveOutcome};
use crate::value_objects::TicketTypeId;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("insufficient inventory for ticket type '{ticket_type_id}': requested {requested}, {available} available")]
    Insufficient {
        ticket_type_id: TicketTypeId,
        requested: u32,
        available: u32,
    },
    #[error("unknown ticket type '{0}'")]
    UnknownTicketType(TicketTypeId),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub struct InventoryLedger {
    inventory: Arc<dyn InventoryRepository>,
}

impl InventoryLedger {
    pub fn new(inventory: Arc<dyn InventoryRepository>) -> Self {
        Self { inventory }
    }

    /// Atomically reserve `quantity` units; returns the new sold count.
    /// Callers guarantee `quantity >= 1`.
    pub async fn reserve(&self, id: &TicketTypeId, quantity: u32) -> Result<u32, InventoryError> {
        debug_assert!(quantity >= 1);
        match self.inventory.try_reserve(id, quantity).await? {
            ReserveOutcome::Reserved { sold } => Ok(sold),
            ReserveOutcome::Insufficient { available } => Err(InventoryError::Insufficient {
                ticket_type_id: id.clone(),
                requested: quantity,
                available,
            }),
            ReserveOutcome::UnknownTicketType => {
                Err(InventoryError::UnknownTicketType(id.clone()))
            }
        }
    }

    /// Compensating action: unwind a reservation made earlier in the same
    /// purchase. Never exposed to external callers.
    pub async fn release(&self, id: &TicketTypeId, quantity: u32) -> Result<u32, InventoryError> {
        Ok(self.inventory.release(id, quantity).await?)
    }
}
