// Domain value objects
pub mod contact;
pub mod event_status;
pub mod identifiers;
pub mod order_status;
pub mod ticket_status;
pub mod transfer_status;

pub use contact::*;
pub use event_status::*;
pub use identifiers::*;
pub use order_status::*;
pub use ticket_status::*;
pub use transfer_status::*;
