// Transfer lifecycle: initiate, claim, cancel, and lazy expiry.

mod support;

use chrono::Duration;

use backend_application::commands::purchase_commands::purchase;
use backend_application::commands::transfer_commands::{
    cancel_transfer, claim_transfer, initiate_transfer,
};
use backend_application::commands::validation_commands::validate_ticket;
use backend_application::dtos::{
    CancelTransferRequest, ClaimTransferRequest, InitiateTransferRequest, PurchaseMode,
    TransferDirection, ValidateTicketRequest,
};
use backend_application::queries::{order_queries, ticket_queries, transfer_queries};
use backend_application::AppError;
use backend_domain::{Ticket, TicketId, TransferStatus};

use support::{build_app, cart, user, TestApp};

async fn buy_one_ticket(app: &TestApp, buyer: &str) -> (Ticket, backend_domain::OrderId) {
    let receipt = purchase(
        &app.state,
        user(buyer),
        cart("ev-addis", &[("tt-regular", 1)]),
        PurchaseMode::DirectIssue,
    )
    .await
    .expect("purchase");
    (receipt.tickets[0].clone(), receipt.order.id.clone())
}

fn initiate_request(ticket_id: &TicketId) -> InitiateTransferRequest {
    InitiateTransferRequest {
        ticket_id: ticket_id.clone(),
        recipient_phone: Some("+251911223344".to_string()),
        recipient_email: None,
        message: Some("see you there".to_string()),
    }
}

fn claim_request(code: &str) -> ClaimTransferRequest {
    ClaimTransferRequest {
        claim_code: code.to_string(),
    }
}

fn cancel_by_id(id: &backend_domain::TransferRequestId) -> CancelTransferRequest {
    CancelTransferRequest {
        transfer_id: Some(id.clone()),
        ticket_id: None,
    }
}

#[tokio::test]
async fn claim_reassigns_ownership_and_rotates_the_code() {
    let app = build_app(false).await;
    let (ticket, order_id) = buy_one_ticket(&app, "u-abebe").await;

    let initiated = initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("initiate");
    assert_eq!(initiated.transfer.status, TransferStatus::Pending);
    assert!(initiated.claim_url.contains(&initiated.transfer.claim_code));
    // Ownership is untouched until the claim lands.
    assert_eq!(
        ticket_queries::get_ticket(&app.state, &user("u-abebe"), &ticket.id)
            .await
            .expect("sender still owns it")
            .owner_id,
        user("u-abebe")
    );

    // Claim codes are case-insensitive at the boundary.
    let lowered = initiated.transfer.claim_code.to_lowercase();
    let claimed = claim_transfer(&app.state, user("u-bethel"), claim_request(&lowered))
        .await
        .expect("claim");
    assert_eq!(claimed.owner_id, user("u-bethel"));
    assert_ne!(claimed.code, ticket.code);

    // The sender's old QR is dead; the new one scans.
    assert!(matches!(
        validate_ticket(
            &app.state,
            ValidateTicketRequest {
                code: ticket.code.clone()
            }
        )
        .await,
        Err(AppError::TicketNotFound)
    ));
    let validated = validate_ticket(
        &app.state,
        ValidateTicketRequest {
            code: claimed.code.clone(),
        },
    )
    .await
    .expect("new code scans");
    assert_eq!(validated.ticket.owner_id, user("u-bethel"));

    // Ticket lists follow ownership; the buyer's order keeps the audit trail.
    assert!(ticket_queries::get_user_tickets(&app.state, &user("u-abebe"))
        .await
        .unwrap()
        .is_empty());
    let order = order_queries::get_order(&app.state, &user("u-abebe"), &order_id)
        .await
        .expect("buyer still sees the order");
    assert_eq!(order.tickets.len(), 1);
    assert_eq!(order.tickets[0].id, ticket.id);
}

#[tokio::test]
async fn only_one_pending_transfer_per_ticket() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;

    initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("first initiate");
    let err = initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect_err("second initiate blocked");
    assert!(matches!(err, AppError::TransferAlreadyPending));
}

#[tokio::test]
async fn sender_cannot_claim_their_own_transfer() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;
    let initiated = initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("initiate");

    let err = claim_transfer(
        &app.state,
        user("u-abebe"),
        claim_request(&initiated.transfer.claim_code),
    )
    .await
    .expect_err("self-claim rejected");
    assert!(matches!(err, AppError::CannotClaimOwnTransfer));
}

#[tokio::test]
async fn cancel_blocks_the_claim_and_frees_the_ticket() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;
    let initiated = initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("initiate");

    // Only the sender may cancel.
    let err = cancel_transfer(
        &app.state,
        user("u-bethel"),
        cancel_by_id(&initiated.transfer.id),
    )
    .await
    .expect_err("stranger cannot cancel");
    assert!(matches!(err, AppError::NotTransferOwner));

    let cancelled = cancel_transfer(
        &app.state,
        user("u-abebe"),
        cancel_by_id(&initiated.transfer.id),
    )
    .await
    .expect("sender cancels");
    assert_eq!(cancelled.status, TransferStatus::Cancelled);

    let err = claim_transfer(
        &app.state,
        user("u-bethel"),
        claim_request(&initiated.transfer.claim_code),
    )
    .await
    .expect_err("claim after cancel");
    assert!(matches!(
        err,
        AppError::TransferNotPending {
            status: TransferStatus::Cancelled
        }
    ));

    // Cancelling twice is a state conflict, not a success.
    let err = cancel_transfer(
        &app.state,
        user("u-abebe"),
        cancel_by_id(&initiated.transfer.id),
    )
    .await
    .expect_err("double cancel");
    assert!(matches!(err, AppError::TransferNotPending { .. }));

    // The ticket is free for a fresh transfer.
    initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("ticket is transferable again");
}

#[tokio::test]
async fn cancel_by_ticket_id_resolves_the_open_request() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;
    initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("initiate");

    let cancelled = cancel_transfer(
        &app.state,
        user("u-abebe"),
        CancelTransferRequest {
            transfer_id: None,
            ticket_id: Some(ticket.id.clone()),
        },
    )
    .await
    .expect("cancel by ticket id");
    assert_eq!(cancelled.status, TransferStatus::Cancelled);

    // Neither id given is a malformed request.
    let err = cancel_transfer(
        &app.state,
        user("u-abebe"),
        CancelTransferRequest {
            transfer_id: None,
            ticket_id: None,
        },
    )
    .await
    .expect_err("missing identifiers");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn expired_transfer_refuses_the_claim_and_keeps_the_owner() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;
    let initiated = initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("initiate");

    // TTL is 48 hours; jump past it.
    app.clock.advance(Duration::hours(49));

    let err = claim_transfer(
        &app.state,
        user("u-bethel"),
        claim_request(&initiated.transfer.claim_code),
    )
    .await
    .expect_err("claim after expiry");
    assert!(matches!(err, AppError::TransferExpired));

    let still_mine = ticket_queries::get_ticket(&app.state, &user("u-abebe"), &ticket.id)
        .await
        .expect("owner unchanged");
    assert_eq!(still_mine.owner_id, user("u-abebe"));

    // Cancel after expiry is idempotent and reports EXPIRED.
    let lapsed = cancel_transfer(
        &app.state,
        user("u-abebe"),
        cancel_by_id(&initiated.transfer.id),
    )
    .await
    .expect("idempotent cancel");
    assert_eq!(lapsed.status, TransferStatus::Expired);

    // And the ticket can be offered again.
    initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("fresh transfer after expiry");
}

#[tokio::test]
async fn foreign_and_missing_tickets_are_equally_denied() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;

    let err = initiate_transfer(&app.state, user("u-bethel"), initiate_request(&ticket.id))
        .await
        .expect_err("not the owner");
    assert!(matches!(err, AppError::TransferDenied));

    let err = initiate_transfer(
        &app.state,
        user("u-bethel"),
        initiate_request(&TicketId("t-missing".to_string())),
    )
    .await
    .expect_err("no such ticket");
    assert!(matches!(err, AppError::TransferDenied));
}

#[tokio::test]
async fn used_tickets_and_missing_recipients_cannot_start_transfers() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;

    let err = initiate_transfer(
        &app.state,
        user("u-abebe"),
        InitiateTransferRequest {
            ticket_id: ticket.id.clone(),
            recipient_phone: None,
            recipient_email: Some("   ".to_string()),
            message: None,
        },
    )
    .await
    .expect_err("no usable contact");
    assert!(matches!(err, AppError::InvalidRecipient));

    validate_ticket(
        &app.state,
        ValidateTicketRequest {
            code: ticket.code.clone(),
        },
    )
    .await
    .expect("use the ticket");
    let err = initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect_err("used tickets stay put");
    assert!(matches!(
        err,
        AppError::TicketNotTransferable {
            status: backend_domain::TicketStatus::Used
        }
    ));
}

#[tokio::test]
async fn projections_track_pending_and_history_from_both_sides() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;
    let initiated = initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("initiate");

    let pending = transfer_queries::get_pending_transfers(&app.state, &user("u-abebe"))
        .await
        .expect("pending list");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, initiated.transfer.id);

    claim_transfer(
        &app.state,
        user("u-bethel"),
        claim_request(&initiated.transfer.claim_code),
    )
    .await
    .expect("claim");

    assert!(transfer_queries::get_pending_transfers(&app.state, &user("u-abebe"))
        .await
        .unwrap()
        .is_empty());

    let sender_history = transfer_queries::get_transfer_history(&app.state, &user("u-abebe"))
        .await
        .expect("sender history");
    assert_eq!(sender_history.len(), 1);
    assert_eq!(sender_history[0].direction, TransferDirection::Sent);
    assert_eq!(sender_history[0].status, TransferStatus::Claimed);

    let recipient_history = transfer_queries::get_transfer_history(&app.state, &user("u-bethel"))
        .await
        .expect("recipient history");
    assert_eq!(recipient_history.len(), 1);
    assert_eq!(recipient_history[0].direction, TransferDirection::Received);
    assert!(recipient_history[0].claimed_at.is_some());
}

#[tokio::test]
async fn pending_list_hides_lapsed_offers() {
    let app = build_app(false).await;
    let (ticket, _) = buy_one_ticket(&app, "u-abebe").await;
    initiate_transfer(&app.state, user("u-abebe"), initiate_request(&ticket.id))
        .await
        .expect("initiate");

    app.clock.advance(Duration::hours(49));

    assert!(transfer_queries::get_pending_transfers(&app.state, &user("u-abebe"))
        .await
        .unwrap()
        .is_empty());
    // History reports the lapse without any sweep having run.
    let history = transfer_queries::get_transfer_history(&app.state, &user("u-abebe"))
        .await
        .expect("history");
    assert_eq!(history[0].status, TransferStatus::Expired);
}

#[tokio::test]
async fn unknown_claim_codes_are_not_found() {
    let app = build_app(false).await;
    let err = claim_transfer(&app.state, user("u-bethel"), claim_request("FFFFFFFFFFFF"))
        .await
        .expect_err("no such code");
    assert!(matches!(err, AppError::TransferNotFound));
}
