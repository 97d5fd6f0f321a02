use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub public_base_url: String,
    pub payments_enabled: bool,
    pub transfer_expiry_hours: u64,
    pub service_fee_percent: u32,
    pub seed_path: String,
    pub sweep_interval_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            api_token: None,
            public_base_url: "http://localhost:8081".to_string(),
            payments_enabled: false,
            transfer_expiry_hours: 48,
            service_fee_percent: 5,
            seed_path: "./seed.json".to_string(),
            sweep_interval_seconds: 600,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("PASSADDIS_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!("config.toml not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.normalize();
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        if let Some(api_token) = &self.api_token {
            if api_token.trim().is_empty() {
                self.api_token = None;
            }
        }
        while self.public_base_url.ends_with('/') {
            self.public_base_url.pop();
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.seed_path = resolve_path(base, &self.seed_path);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.public_base_url.trim().is_empty() {
            return Err(anyhow!("public_base_url must not be empty"));
        }
        if self.transfer_expiry_hours == 0 {
            return Err(anyhow!("transfer_expiry_hours must be greater than 0"));
        }
        if self.service_fee_percent > 100 {
            return Err(anyhow!("service_fee_percent out of range"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            public_base_url: self.public_base_url.clone(),
            payments_enabled: self.payments_enabled,
            transfer_expiry_hours: self.transfer_expiry_hours,
            service_fee_percent: self.service_fee_percent,
            seed_path: self.seed_path.clone(),
            sweep_interval_seconds: self.sweep_interval_seconds,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("PASSADDIS_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("PASSADDIS_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("PASSADDIS_PUBLIC_BASE_URL") {
            self.public_base_url = value;
        }
        if let Ok(value) = env::var("PASSADDIS_PAYMENTS_ENABLED") {
            self.payments_enabled = value.parse().unwrap_or(self.payments_enabled);
        }
        if let Ok(value) = env::var("PASSADDIS_TRANSFER_EXPIRY_HOURS") {
            self.transfer_expiry_hours = value.parse().unwrap_or(self.transfer_expiry_hours);
        }
        if let Ok(value) = env::var("PASSADDIS_SERVICE_FEE_PERCENT") {
            self.service_fee_percent = value.parse().unwrap_or(self.service_fee_percent);
        }
        if let Ok(value) = env::var("PASSADDIS_SEED_PATH") {
            self.seed_path = value;
        }
        if let Ok(value) = env::var("PASSADDIS_SWEEP_INTERVAL_SECONDS") {
            self.sweep_interval_seconds = value.parse().unwrap_or(self.sweep_interval_seconds);
        }
        if let Ok(value) = env::var("PASSADDIS_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("PASSADDIS_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        AppConfig::default().validate().expect("defaults are valid");
    }

    #[test]
    fn normalize_drops_blank_token_and_trailing_slash() {
        let mut config = AppConfig {
            api_token: Some("   ".to_string()),
            public_base_url: "https://passaddis.et/".to_string(),
            ..AppConfig::default()
        };
        config.normalize();
        assert_eq!(config.api_token, None);
        assert_eq!(config.public_base_url, "https://passaddis.et");
    }

    #[test]
    fn zero_expiry_fails_validation() {
        let config = AppConfig {
            transfer_expiry_hours: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
