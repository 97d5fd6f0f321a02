// Application queries (read-only projections)

pub mod order_queries;
pub mod ticket_queries;
pub mod transfer_queries;
