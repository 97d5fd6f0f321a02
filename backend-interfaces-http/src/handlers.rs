pub mod ops_handlers;
pub mod purchase_handlers;
pub mod ticket_handlers;
pub mod transfer_handlers;

pub use ops_handlers::*;
pub use purchase_handlers::*;
pub use ticket_handlers::*;
pub use transfer_handlers::*;
