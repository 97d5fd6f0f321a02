// Transfer request entity
// An offer by a ticket's current owner to hand it to another person,
// completed with a single-use claim code.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{RecipientContact, TicketId, TransferRequestId, TransferStatus, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRequest {
    pub id: TransferRequestId,
    pub ticket_id: TicketId,
    pub sender_id: UserId,
    pub recipient: RecipientContact,
    pub message: Option<String>,
    pub claim_code: String,
    pub status: TransferStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
    /// Filled in once the transfer is claimed by a registered account.
    pub recipient_user_id: Option<UserId>,
}

impl TransferRequest {
    /// Expiry is evaluated lazily: a PENDING request read past its TTL must
    /// be reported EXPIRED regardless of what the stored status says.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.status == TransferStatus::Pending && now > self.expires_at
    }

    /// Status as observed at `now`, with lazy expiry applied.
    pub fn effective_status(&self, now: DateTime<Utc>) -> TransferStatus {
        if self.is_expired(now) {
            TransferStatus::Expired
        } else {
            self.status
        }
    }
}
