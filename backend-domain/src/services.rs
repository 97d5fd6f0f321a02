// Domain services

pub mod inventory_ledger;
pub mod ticket_issuer;

pub use inventory_ledger::*;
pub use ticket_issuer::*;
