use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use backend_application::{AppState, Metrics};
use backend_domain::services::{InventoryLedger, TicketIssuer};
use backend_infrastructure::{
    AppConfig, DefaultHealthService, InMemoryStore, PercentFeePolicy, RandomCodeGenerator,
    SeedFileRepository, SystemClock,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();

        let store = Arc::new(InMemoryStore::new());
        let seed = SeedFileRepository::new()
            .load(&runtime_config.seed_path)
            .await?;
        info!(
            "seeding catalog: {} events, {} ticket types",
            seed.events.len(),
            seed.ticket_types.len()
        );
        store.seed_catalog(seed.events, seed.ticket_types).await;

        let codes = Arc::new(RandomCodeGenerator::new());
        let ledger = Arc::new(InventoryLedger::new(store.clone()));
        let issuer = Arc::new(TicketIssuer::new(store.clone(), codes.clone()));
        let health = Arc::new(DefaultHealthService::new(store.clone()));
        let fee_policy = Arc::new(PercentFeePolicy::new(runtime_config.service_fee_percent));

        let state = AppState {
            config: runtime_config,
            catalog: store.clone(),
            orders: store.clone(),
            tickets: store.clone(),
            transfers: store,
            ledger,
            issuer,
            fee_policy,
            codes,
            clock: Arc::new(SystemClock),
            health,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
