use std::sync::Arc;

use async_trait::async_trait;

use backend_domain::ports::{CatalogRepository, HealthCheckService};

pub struct DefaultHealthService {
    catalog: Arc<dyn CatalogRepository>,
}

impl DefaultHealthService {
    pub fn new(catalog: Arc<dyn CatalogRepository>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_store(&self) -> anyhow::Result<bool> {
        self.catalog.ping().await.map(|_| true)
    }
}
