// Transfer expiry sweep
// Housekeeping only: lazy expiry at read/claim/cancel time is authoritative,
// this loop just keeps reporting tidy.

use tracing::{debug, error};

use backend_application::AppState;
use backend_domain::ports::{Clock, TransferRepository};

pub async fn run_transfer_sweep(state: AppState) {
    let interval = std::time::Duration::from_secs(state.config.sweep_interval_seconds.max(1));
    loop {
        tokio::time::sleep(interval).await;
        let now = state.clock.now();
        match state.transfers.expire_stale(now).await {
            Ok(0) => {}
            Ok(swept) => {
                state.metrics.record_transfers_expired(swept);
                debug!("expired {} stale transfer requests", swept);
            }
            Err(err) => error!("transfer sweep failed: {}", err),
        }
    }
}
