use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use backend_application::commands::transfer_commands;
use backend_application::dtos::{
    CancelTransferRequest, ClaimTransferRequest, InitiateTransferRequest, TransferHistoryEntry,
    TransferInitiated,
};
use backend_application::queries::transfer_queries;
use backend_application::AppState;
use backend_domain::{Ticket, TransferRequest};

use crate::error::HttpError;
use crate::middleware::{authorize, caller_id};

pub async fn initiate_transfer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<InitiateTransferRequest>,
) -> Result<Json<TransferInitiated>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let caller = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let initiated = transfer_commands::initiate_transfer(&state, caller, payload).await?;
    Ok(Json(initiated))
}

pub async fn claim_transfer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ClaimTransferRequest>,
) -> Result<Json<Ticket>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let caller = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let ticket = transfer_commands::claim_transfer(&state, caller, payload).await?;
    Ok(Json(ticket))
}

pub async fn cancel_transfer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CancelTransferRequest>,
) -> Result<Json<TransferRequest>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let caller = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let request = transfer_commands::cancel_transfer(&state, caller, payload).await?;
    Ok(Json(request))
}

pub async fn list_pending_transfers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TransferRequest>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let caller = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let pending = transfer_queries::get_pending_transfers(&state, &caller).await?;
    Ok(Json(pending))
}

pub async fn transfer_history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TransferHistoryEntry>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let caller = caller_id(&headers).ok_or(HttpError::Unauthorized)?;
    let history = transfer_queries::get_transfer_history(&state, &caller).await?;
    Ok(Json(history))
}
