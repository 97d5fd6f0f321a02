// Catalog seed loader
// Events and ticket types come from a JSON file at startup; the core treats
// the catalog as read-only apart from the sold counters.

use std::path::Path;

use anyhow::bail;
use serde::Deserialize;
use tokio::fs;

use backend_domain::{EventRecord, TicketType};

#[derive(Debug, Default, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub ticket_types: Vec<TicketType>,
}

pub struct SeedFileRepository;

impl SeedFileRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn load(&self, path: &str) -> anyhow::Result<SeedCatalog> {
        if !Path::new(path).exists() {
            return Ok(SeedCatalog::default());
        }
        let content = fs::read_to_string(path).await?;
        let catalog: SeedCatalog = serde_json::from_str(&content)?;
        validate(&catalog)?;
        Ok(catalog)
    }
}

impl Default for SeedFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(catalog: &SeedCatalog) -> anyhow::Result<()> {
    for ticket_type in &catalog.ticket_types {
        if ticket_type.quantity == 0 {
            bail!("ticket type '{}' has zero capacity", ticket_type.id);
        }
        if ticket_type.sold > ticket_type.quantity {
            bail!(
                "ticket type '{}' is seeded oversold ({} of {})",
                ticket_type.id,
                ticket_type.sold,
                ticket_type.quantity
            );
        }
        if ticket_type.max_per_order == 0 {
            bail!("ticket type '{}' has zero max_per_order", ticket_type.id);
        }
        if ticket_type.price_cents < 0 {
            bail!("ticket type '{}' has a negative price", ticket_type.id);
        }
        if !catalog
            .events
            .iter()
            .any(|event| event.id == ticket_type.event_id)
        {
            bail!(
                "ticket type '{}' references unknown event '{}'",
                ticket_type.id,
                ticket_type.event_id
            );
        }
    }
    Ok(())
}
