use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Wall-clock seam; tests substitute a manual clock to drive expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Service-fee computation is policy owned by the platform, injected so the
/// purchase orchestrator never hardcodes a rate.
pub trait FeePolicy: Send + Sync {
    fn service_fee(&self, subtotal_cents: i64) -> i64;
}

/// Source of unguessable credentials: scannable ticket codes and single-use
/// transfer claim codes.
pub trait CodeGenerator: Send + Sync {
    fn scannable_code(&self) -> String;
    fn claim_code(&self) -> String;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_store(&self) -> anyhow::Result<bool>;
}
