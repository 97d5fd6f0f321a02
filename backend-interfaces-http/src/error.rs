use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use backend_application::AppError;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<AppError> for HttpError {
    fn from(value: AppError) -> Self {
        let message = value.to_string();
        match value {
            AppError::BadRequest(_)
            | AppError::InvalidLineItem(_)
            | AppError::InvalidRecipient
            | AppError::EventNotPurchasable
            | AppError::EventAlreadyPassed => HttpError::BadRequest(message),
            AppError::EventNotFound
            | AppError::OrderNotFound
            | AppError::TicketNotFound
            | AppError::TransferNotFound => HttpError::NotFound(message),
            AppError::InsufficientInventory { .. }
            | AppError::OrderNotPayable { .. }
            | AppError::TicketAlreadyUsed { .. }
            | AppError::TicketNotRedeemable { .. }
            | AppError::TicketNotTransferable { .. }
            | AppError::TransferAlreadyPending
            | AppError::TransferExpired
            | AppError::TransferNotPending { .. }
            | AppError::CannotClaimOwnTransfer => HttpError::Conflict(message),
            AppError::TransferDenied | AppError::NotTransferOwner => HttpError::Forbidden(message),
            AppError::Internal(_) => HttpError::Internal(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use backend_domain::TicketTypeId;

    use super::*;

    #[test]
    fn capacity_conflicts_map_to_409() {
        let err = AppError::InsufficientInventory {
            ticket_type_id: TicketTypeId("tt-1".to_string()),
            requested: 2,
            available: 1,
        };
        assert!(matches!(HttpError::from(err), HttpError::Conflict(_)));
    }

    #[test]
    fn opaque_ownership_failures_map_to_403() {
        assert!(matches!(
            HttpError::from(AppError::TransferDenied),
            HttpError::Forbidden(_)
        ));
    }

    #[test]
    fn missing_entities_map_to_404() {
        assert!(matches!(
            HttpError::from(AppError::TicketNotFound),
            HttpError::NotFound(_)
        ));
    }
}
