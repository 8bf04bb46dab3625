//! Razorpay orders API adapter.

use async_trait::async_trait;
use reqwest::Client;

use academy_types::{GatewayError, Order, OrderRequest, PaymentGateway, Secret};

use crate::provider_message;

pub const DEFAULT_API_BASE: &str = "https://api.razorpay.com";

/// Credentials and endpoint for the Razorpay API.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: Secret,
    pub api_base: String,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: Secret) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Points the adapter at a different host (sandbox proxy, test stub).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

/// Creates orders through `POST /v1/orders`.
pub struct RazorpayGateway {
    orders_url: String,
    key_id: String,
    key_secret: Secret,
    http: Client,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Uses a preconfigured HTTP client (timeouts, proxies).
    pub fn with_client(config: RazorpayConfig, http: Client) -> Self {
        Self {
            orders_url: format!("{}/v1/orders", config.api_base.trim_end_matches('/')),
            key_id: config.key_id,
            key_secret: config.key_secret,
            http,
        }
    }

    pub fn orders_url(&self) -> &str {
        &self.orders_url
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(&self, req: OrderRequest) -> Result<Order, GatewayError> {
        tracing::debug!(url = %self.orders_url, receipt = %req.receipt, "POST order");

        let resp = self
            .http
            .post(&self.orders_url)
            .basic_auth(&self.key_id, Some(self.key_secret.expose()))
            .json(&req)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message: provider_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}
