// Purchase orchestration
// Turns a cart of line items into an order plus issued tickets, or fails with
// nothing reserved and nothing issued.

use std::collections::HashSet;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use tracing::{error, info};
use uuid::Uuid;

use backend_domain::ports::{
    CatalogRepository, Clock, FeePolicy, MarkPaidOutcome, OrderRepository, TicketRepository,
};
use backend_domain::{
    EventStatus, InventoryError, Order, OrderId, OrderLineItem, OrderStatus, Ticket, TicketType,
    TicketTypeId, UserId,
};

use crate::dtos::{OrderDetails, PurchaseMode, PurchaseReceipt, PurchaseRequest};
use crate::{AppError, AppState};

pub async fn purchase(
    state: &AppState,
    buyer_id: UserId,
    request: PurchaseRequest,
    mode: PurchaseMode,
) -> Result<PurchaseReceipt, AppError> {
    let now = state.clock.now();

    let event = state
        .catalog
        .get_event(&request.event_id)
        .await?
        .ok_or(AppError::EventNotFound)?;
    if event.status != EventStatus::Published {
        return Err(AppError::EventNotPurchasable);
    }
    if event.is_past(now) {
        return Err(AppError::EventAlreadyPassed);
    }

    let ticket_types = state.catalog.ticket_types_for_event(&request.event_id).await?;
    let plan = build_reservation_plan(&request, &ticket_types)?;

    // Reserve in ascending ticket-type-id order (global lock ordering); the
    // plan is already sorted. On the first failure, release everything
    // reserved so far in the same fixed order.
    let mut reserved: Vec<(TicketTypeId, u32)> = Vec::new();
    for (ticket_type, quantity) in &plan {
        match state.ledger.reserve(&ticket_type.id, *quantity).await {
            Ok(_) => reserved.push((ticket_type.id.clone(), *quantity)),
            Err(err) => {
                unwind_reservations(state, &reserved).await;
                if matches!(err, InventoryError::Insufficient { .. }) {
                    state.metrics.record_inventory_conflict();
                }
                return Err(err.into());
            }
        }
    }

    let subtotal_cents: i64 = plan
        .iter()
        .map(|(ticket_type, quantity)| ticket_type.price_cents * i64::from(*quantity))
        .sum();
    let service_fee_cents = state.fee_policy.service_fee(subtotal_cents);
    let total_cents = subtotal_cents + service_fee_cents;

    let status = match mode {
        PurchaseMode::DirectIssue => OrderStatus::Paid,
        PurchaseMode::AwaitPayment => OrderStatus::Pending,
    };
    let order = Order {
        id: OrderId(Uuid::new_v4().to_string()),
        order_number: order_number(now),
        buyer_id: buyer_id.clone(),
        event_id: request.event_id.clone(),
        line_items: plan
            .iter()
            .map(|(ticket_type, quantity)| OrderLineItem {
                ticket_type_id: ticket_type.id.clone(),
                quantity: *quantity,
                unit_price_cents: ticket_type.price_cents,
            })
            .collect(),
        status,
        subtotal_cents,
        service_fee_cents,
        total_cents,
        created_at: now,
        paid_at: (status == OrderStatus::Paid).then_some(now),
    };

    if let Err(err) = state.orders.insert(order.clone()).await {
        unwind_reservations(state, &reserved).await;
        return Err(AppError::Internal(err));
    }
    state.metrics.record_order_created();

    let tickets = match mode {
        PurchaseMode::DirectIssue => issue_for_order(state, &order, now).await?,
        PurchaseMode::AwaitPayment => Vec::new(),
    };

    info!(
        "order {} created for buyer {}: {} tickets, {} santim total",
        order.order_number,
        buyer_id,
        order.ticket_count(),
        order.total_cents
    );

    let payment_required_cents = match mode {
        PurchaseMode::DirectIssue => 0,
        PurchaseMode::AwaitPayment => order.total_cents,
    };
    Ok(PurchaseReceipt {
        order,
        tickets,
        payment_required_cents,
    })
}

/// Invoked by the payment-callback adapter once a provider confirms payment.
/// Only the PENDING -> PAID transition winner issues tickets, so repeated
/// confirmations are idempotent.
pub async fn confirm_paid_order(state: &AppState, order_id: OrderId) -> Result<OrderDetails, AppError> {
    let now = state.clock.now();
    match state.orders.mark_paid(&order_id, now).await? {
        MarkPaidOutcome::Transitioned(order) => {
            let tickets = issue_for_order(state, &order, now).await?;
            info!(
                "order {} confirmed paid, {} tickets issued",
                order.order_number,
                tickets.len()
            );
            Ok(OrderDetails { order, tickets })
        }
        MarkPaidOutcome::AlreadyPaid(order) => {
            let tickets = state.tickets.list_by_order(&order.id).await?;
            Ok(OrderDetails { order, tickets })
        }
        MarkPaidOutcome::NotPayable(order) => Err(AppError::OrderNotPayable {
            status: order.status,
        }),
        MarkPaidOutcome::NotFound => Err(AppError::OrderNotFound),
    }
}

async fn issue_for_order(
    state: &AppState,
    order: &Order,
    now: DateTime<Utc>,
) -> Result<Vec<Ticket>, AppError> {
    let mut issued = Vec::with_capacity(order.ticket_count() as usize);
    for item in &order.line_items {
        let ticket_type = state
            .catalog
            .get_ticket_type(&item.ticket_type_id)
            .await?
            .ok_or_else(|| {
                anyhow!(
                    "ticket type '{}' vanished from the catalog while issuing order {}",
                    item.ticket_type_id,
                    order.id
                )
            })?;
        let mut tickets = state
            .issuer
            .issue(&order.id, &ticket_type, &order.buyer_id, item.quantity, now)
            .await?;
        issued.append(&mut tickets);
    }
    state.metrics.record_tickets_issued(issued.len());
    Ok(issued)
}

/// Compensating rollback, executed in the same deterministic order as the
/// reservations were taken.
async fn unwind_reservations(state: &AppState, reserved: &[(TicketTypeId, u32)]) {
    for (ticket_type_id, quantity) in reserved {
        if let Err(err) = state.ledger.release(ticket_type_id, *quantity).await {
            error!(
                "failed to release {} reserved units of '{}': {}",
                quantity, ticket_type_id, err
            );
        }
    }
}

/// Validates every line item against the event's catalog and returns the
/// reservation plan sorted by ascending ticket-type id.
fn build_reservation_plan(
    request: &PurchaseRequest,
    ticket_types: &[TicketType],
) -> Result<Vec<(TicketType, u32)>, AppError> {
    if request.items.is_empty() {
        return Err(AppError::InvalidLineItem("cart is empty".to_string()));
    }

    let mut seen: HashSet<&TicketTypeId> = HashSet::new();
    let mut plan = Vec::with_capacity(request.items.len());
    for item in &request.items {
        if !seen.insert(&item.ticket_type_id) {
            return Err(AppError::InvalidLineItem(format!(
                "duplicate ticket type '{}'",
                item.ticket_type_id
            )));
        }
        let ticket_type = ticket_types
            .iter()
            .find(|tt| tt.id == item.ticket_type_id)
            .ok_or_else(|| {
                AppError::InvalidLineItem(format!(
                    "ticket type '{}' does not belong to this event",
                    item.ticket_type_id
                ))
            })?;
        if item.quantity < 1 {
            return Err(AppError::InvalidLineItem(format!(
                "quantity for '{}' must be at least 1",
                ticket_type.name
            )));
        }
        if item.quantity > ticket_type.max_per_order {
            return Err(AppError::InvalidLineItem(format!(
                "maximum {} tickets per order for '{}'",
                ticket_type.max_per_order, ticket_type.name
            )));
        }
        plan.push((ticket_type.clone(), item.quantity));
    }

    plan.sort_by(|a, b| a.0.id.cmp(&b.0.id));
    Ok(plan)
}

/// Order numbers follow the house format: "PA" + millisecond timestamp in
/// uppercase base 36.
fn order_number(now: DateTime<Utc>) -> String {
    format!("PA{}", to_base36_upper(now.timestamp_millis()))
}

fn to_base36_upper(mut value: i64) -> String {
    const DIGITS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if value <= 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
