use std::sync::Arc;

use backend_domain::ports::{
    CatalogRepository, Clock, CodeGenerator, FeePolicy, HealthCheckService, OrderRepository,
    TicketRepository, TransferRepository,
};
use backend_domain::services::{InventoryLedger, TicketIssuer};
use backend_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub catalog: Arc<dyn CatalogRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub tickets: Arc<dyn TicketRepository>,
    pub transfers: Arc<dyn TransferRepository>,
    pub ledger: Arc<InventoryLedger>,
    pub issuer: Arc<TicketIssuer>,
    pub fee_policy: Arc<dyn FeePolicy>,
    pub codes: Arc<dyn CodeGenerator>,
    pub clock: Arc<dyn Clock>,
    pub health: Arc<dyn HealthCheckService>,
    pub metrics: Arc<Metrics>,
}
