//! Configuration loading from environment.

use std::env;

use academy_gateways::{Fast2SmsConfig, RazorpayConfig, fast2sms, razorpay};
use academy_types::Secret;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_ACADEMY_NAME: &str = "Shreyas Academy";
const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub razorpay: RazorpayConfig,
    pub fast2sms: Fast2SmsConfig,
    pub academy_name: String,
    /// Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit_per_minute: u32,
    /// Key the rate limit on proxy-supplied client addresses.
    pub trust_proxy_headers: bool,
    pub mentors_seed_path: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating blank values as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| anyhow::anyhow!("{} environment variable is required", key))
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number: {}", e))?,
            None => DEFAULT_PORT,
        };

        let rate_limit_per_minute = match get("RATE_LIMIT_PER_MINUTE") {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("RATE_LIMIT_PER_MINUTE must be a number: {}", e))?,
            None => DEFAULT_RATE_LIMIT_PER_MINUTE,
        };

        let trust_proxy_headers = match get("TRUST_PROXY_HEADERS") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => anyhow::bail!("TRUST_PROXY_HEADERS must be true or false, got {}", other),
            },
            None => false,
        };

        let razorpay = RazorpayConfig::new(
            required("RAZORPAY_KEY_ID")?,
            Secret::new(required("RAZORPAY_KEY_SECRET")?),
        )
        .with_api_base(get("RAZORPAY_API_BASE").unwrap_or_else(|| razorpay::DEFAULT_API_BASE.into()));

        let fast2sms = Fast2SmsConfig::new(Secret::new(required("FAST2SMS_API_KEY")?))
            .with_endpoint(get("FAST2SMS_ENDPOINT").unwrap_or_else(|| fast2sms::DEFAULT_ENDPOINT.into()));

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            port,
            database_url: required("DATABASE_URL")?,
            razorpay,
            fast2sms,
            academy_name: get("ACADEMY_NAME").unwrap_or_else(|| DEFAULT_ACADEMY_NAME.into()),
            cors_allowed_origins,
            rate_limit_per_minute,
            trust_proxy_headers,
            mentors_seed_path: get("MENTORS_SEED_PATH"),
        })
    }
}
