// Ticket status value object

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Valid,
    Used,
    Cancelled,
    Expired,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Valid => "VALID",
            TicketStatus::Used => "USED",
            TicketStatus::Cancelled => "CANCELLED",
            TicketStatus::Expired => "EXPIRED",
        }
    }
}

impl From<&str> for TicketStatus {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "USED" => TicketStatus::Used,
            "CANCELLED" => TicketStatus::Cancelled,
            "EXPIRED" => TicketStatus::Expired,
            _ => TicketStatus::Valid,
        }
    }
}
