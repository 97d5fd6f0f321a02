// Runtime configuration entity
// The validated, normalized view of AppConfig handed to the application layer.

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub public_base_url: String,
    /// When false the purchase path issues tickets directly (no gateway);
    /// when true orders stay PENDING until the payment adapter confirms.
    pub payments_enabled: bool,
    pub transfer_expiry_hours: u64,
    pub service_fee_percent: u32,
    pub seed_path: String,
    pub sweep_interval_seconds: u64,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}
