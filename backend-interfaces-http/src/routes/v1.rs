use axum::Router;

use backend_application::AppState;

use crate::handlers::{ops_handlers, purchase_handlers, ticket_handlers, transfer_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/tickets/purchase",
            axum::routing::post(purchase_handlers::purchase_tickets),
        )
        .route(
            "/v1/orders/:order_id/confirm",
            axum::routing::post(purchase_handlers::confirm_order),
        )
        .route(
            "/v1/orders/:order_id",
            axum::routing::get(purchase_handlers::get_order),
        )
        .route(
            "/v1/tickets",
            axum::routing::get(ticket_handlers::list_tickets),
        )
        .route(
            "/v1/tickets/validate",
            axum::routing::post(ticket_handlers::validate_ticket),
        )
        .route(
            "/v1/tickets/:ticket_id",
            axum::routing::get(ticket_handlers::get_ticket),
        )
        .route(
            "/v1/transfers",
            axum::routing::post(transfer_handlers::initiate_transfer),
        )
        .route(
            "/v1/transfers/claim",
            axum::routing::post(transfer_handlers::claim_transfer),
        )
        .route(
            "/v1/transfers/cancel",
            axum::routing::post(transfer_handlers::cancel_transfer),
        )
        .route(
            "/v1/transfers/pending",
            axum::routing::get(transfer_handlers::list_pending_transfers),
        )
        .route(
            "/v1/transfers/history",
            axum::routing::get(transfer_handlers::transfer_history),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/health/ready",
            axum::routing::get(ops_handlers::health_ready),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
