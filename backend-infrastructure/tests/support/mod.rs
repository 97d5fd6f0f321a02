// Shared fixtures for the integration tests: a fully wired AppState over the
// in-memory store, seeded with a small catalog, driven by a manual clock.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use backend_application::dtos::{PurchaseLineItem, PurchaseRequest};
use backend_application::{AppState, Metrics};
use backend_domain::ports::{CatalogRepository, Clock};
use backend_domain::services::{InventoryLedger, TicketIssuer};
use backend_domain::{
    EventId, EventRecord, EventStatus, RuntimeConfig, TicketType, TicketTypeId, UserId,
};
use backend_infrastructure::{
    DefaultHealthService, InMemoryStore, PercentFeePolicy, RandomCodeGenerator,
};

pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub clock: Arc<ManualClock>,
}

pub fn test_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

fn runtime_config(payments_enabled: bool) -> RuntimeConfig {
    RuntimeConfig {
        bind_addr: "127.0.0.1:3000".to_string(),
        api_token: None,
        public_base_url: "http://localhost:8081".to_string(),
        payments_enabled,
        transfer_expiry_hours: 48,
        service_fee_percent: 5,
        seed_path: "./seed.json".to_string(),
        sweep_interval_seconds: 600,
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 15,
    }
}

fn event(id: &str, starts_at: DateTime<Utc>, status: EventStatus) -> EventRecord {
    EventRecord {
        id: EventId(id.to_string()),
        title: format!("{} title", id),
        venue: "Millennium Hall".to_string(),
        starts_at,
        status,
    }
}

fn ticket_type(id: &str, event_id: &str, price_cents: i64, quantity: u32, sold: u32, max_per_order: u32) -> TicketType {
    TicketType {
        id: TicketTypeId(id.to_string()),
        event_id: EventId(event_id.to_string()),
        name: format!("{} seat", id),
        price_cents,
        quantity,
        sold,
        max_per_order,
    }
}

/// Catalog used by most tests:
/// - ev-addis (published, one week out): tt-regular 100@500 birr max 10,
///   tt-soldout 1 seat already gone, tt-vip 50@1500 birr max 4,
///   plus tt-last with a single seat.
/// - ev-draft (unpublished) and ev-past (already happened) for gating tests.
pub async fn build_app(payments_enabled: bool) -> TestApp {
    let start = test_start();
    let events = vec![
        event("ev-addis", start + Duration::days(7), EventStatus::Published),
        event("ev-draft", start + Duration::days(7), EventStatus::Draft),
        event("ev-past", start - Duration::days(1), EventStatus::Published),
    ];
    let ticket_types = vec![
        ticket_type("tt-regular", "ev-addis", 50_000, 100, 0, 10),
        ticket_type("tt-soldout", "ev-addis", 80_000, 1, 1, 5),
        ticket_type("tt-vip", "ev-addis", 150_000, 50, 0, 4),
        ticket_type("tt-last", "ev-addis", 80_000, 1, 0, 5),
        ticket_type("tt-draft", "ev-draft", 10_000, 10, 0, 5),
        ticket_type("tt-past", "ev-past", 10_000, 10, 0, 5),
    ];

    let store = Arc::new(InMemoryStore::new());
    store.seed_catalog(events, ticket_types).await;

    let clock = Arc::new(ManualClock::new(start));
    let codes = Arc::new(RandomCodeGenerator::new());
    let config = runtime_config(payments_enabled);

    let state = AppState {
        config,
        catalog: store.clone(),
        orders: store.clone(),
        tickets: store.clone(),
        transfers: store.clone(),
        ledger: Arc::new(InventoryLedger::new(store.clone())),
        issuer: Arc::new(TicketIssuer::new(store.clone(), codes.clone())),
        fee_policy: Arc::new(PercentFeePolicy::new(5)),
        codes,
        clock: clock.clone(),
        health: Arc::new(DefaultHealthService::new(store.clone())),
        metrics: Arc::new(Metrics::default()),
    };

    TestApp {
        state,
        store,
        clock,
    }
}

pub fn user(id: &str) -> UserId {
    UserId(id.to_string())
}

pub fn cart(event_id: &str, items: &[(&str, u32)]) -> PurchaseRequest {
    PurchaseRequest {
        event_id: EventId(event_id.to_string()),
        items: items
            .iter()
            .map(|(id, quantity)| PurchaseLineItem {
                ticket_type_id: TicketTypeId(id.to_string()),
                quantity: *quantity,
            })
            .collect(),
    }
}

/// Current sold counters, in the order the ids are given.
pub async fn sold_snapshot(app: &TestApp, ids: &[&str]) -> Vec<u32> {
    let mut snapshot = Vec::with_capacity(ids.len());
    for id in ids {
        let ticket_type = app
            .state
            .catalog
            .get_ticket_type(&TicketTypeId(id.to_string()))
            .await
            .expect("catalog read")
            .expect("seeded ticket type");
        snapshot.push(ticket_type.sold);
    }
    snapshot
}
