use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    orders_created: AtomicU64,
    tickets_issued: AtomicU64,
    tickets_validated: AtomicU64,
    validation_rejects: AtomicU64,
    inventory_conflicts: AtomicU64,
    transfers_initiated: AtomicU64,
    transfers_claimed: AtomicU64,
    transfers_cancelled: AtomicU64,
    transfers_expired: AtomicU64,
}

impl Metrics {
    pub fn record_order_created(&self) {
        self.orders_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tickets_issued(&self, count: usize) {
        self.tickets_issued.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_validation(&self) {
        self.tickets_validated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_reject(&self) {
        self.validation_rejects.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inventory_conflict(&self) {
        self.inventory_conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transfer_initiated(&self) {
        self.transfers_initiated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transfer_claimed(&self) {
        self.transfers_claimed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transfer_cancelled(&self) {
        self.transfers_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transfers_expired(&self, count: usize) {
        self.transfers_expired.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let orders = self.orders_created.load(Ordering::Relaxed);
        let issued = self.tickets_issued.load(Ordering::Relaxed);
        let validated = self.tickets_validated.load(Ordering::Relaxed);
        let rejects = self.validation_rejects.load(Ordering::Relaxed);
        let conflicts = self.inventory_conflicts.load(Ordering::Relaxed);
        let initiated = self.transfers_initiated.load(Ordering::Relaxed);
        let claimed = self.transfers_claimed.load(Ordering::Relaxed);
        let cancelled = self.transfers_cancelled.load(Ordering::Relaxed);
        let expired = self.transfers_expired.load(Ordering::Relaxed);

        format!(
            "# TYPE passaddis_orders_created_total counter\n\
passaddis_orders_created_total {}\n\
# TYPE passaddis_tickets_issued_total counter\n\
passaddis_tickets_issued_total {}\n\
# TYPE passaddis_tickets_validated_total counter\n\
passaddis_tickets_validated_total {}\n\
# TYPE passaddis_validation_rejects_total counter\n\
passaddis_validation_rejects_total {}\n\
# TYPE passaddis_inventory_conflicts_total counter\n\
passaddis_inventory_conflicts_total {}\n\
# TYPE passaddis_transfers_initiated_total counter\n\
passaddis_transfers_initiated_total {}\n\
# TYPE passaddis_transfers_claimed_total counter\n\
passaddis_transfers_claimed_total {}\n\
# TYPE passaddis_transfers_cancelled_total counter\n\
passaddis_transfers_cancelled_total {}\n\
# TYPE passaddis_transfers_expired_total counter\n\
passaddis_transfers_expired_total {}\n",
            orders, issued, validated, rejects, conflicts, initiated, claimed, cancelled, expired
        )
    }
}
