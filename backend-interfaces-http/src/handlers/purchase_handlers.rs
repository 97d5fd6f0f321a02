use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::purchase_commands;
use backend_application::dtos::{OrderDetails, PurchaseMode, PurchaseReceipt, PurchaseRequest};
use backend_application::queries::order_queries;
use backend_application::AppState;
use backend_domain::OrderId;

use crate::error::HttpError;
use crate::middleware::{authorize, caller_id};

pub async fn purchase_tickets(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PurchaseRequest>,
) -> Result<Json<PurchaseReceipt>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let buyer = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let mode = PurchaseMode::from_config(&state.config);
    let receipt = purchase_commands::purchase(&state, buyer, payload, mode).await?;
    Ok(Json(receipt))
}

/// Called by the payment-callback adapter, not by end users.
pub async fn confirm_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<Json<OrderDetails>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let details = purchase_commands::confirm_paid_order(&state, OrderId(order_id)).await?;
    Ok(Json(details))
}

pub async fn get_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<Json<OrderDetails>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let caller = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let details = order_queries::get_order(&state, &caller, &OrderId(order_id)).await?;
    Ok(Json(details))
}
