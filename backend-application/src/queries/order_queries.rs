use backend_domain::ports::{OrderRepository, TicketRepository};
use backend_domain::{OrderId, UserId};

use crate::dtos::OrderDetails;
use crate::{AppError, AppState};

/// Ownership-checked order read with its issued tickets, for the
/// payment-status screen.
pub async fn get_order(
    state: &AppState,
    user_id: &UserId,
    order_id: &OrderId,
) -> Result<OrderDetails, AppError> {
    let order = match state.orders.get(order_id).await? {
        Some(order) if order.buyer_id == *user_id => order,
        _ => return Err(AppError::OrderNotFound),
    };
    let tickets = state.tickets.list_by_order(&order.id).await?;
    Ok(OrderDetails { order, tickets })
}
