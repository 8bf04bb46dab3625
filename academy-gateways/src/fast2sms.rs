//! Fast2SMS bulk API adapter.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use academy_types::{NotifyError, PhoneNumber, Secret, SmsNotifier};

use crate::provider_message;

pub const DEFAULT_ENDPOINT: &str = "https://www.fast2sms.com/dev/bulkV2";

#[derive(Debug, Clone)]
pub struct Fast2SmsConfig {
    pub api_key: Secret,
    pub endpoint: String,
}

impl Fast2SmsConfig {
    pub fn new(api_key: Secret) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct BulkSms<'a> {
    route: &'static str,
    message: &'a str,
    language: &'static str,
    numbers: &'a str,
}

#[derive(Debug, Deserialize)]
struct BulkSmsResponse {
    #[serde(rename = "return")]
    accepted: bool,
}

/// Sends transactional texts through the Fast2SMS `v3` route.
pub struct Fast2SmsNotifier {
    endpoint: String,
    api_key: Secret,
    http: Client,
}

impl Fast2SmsNotifier {
    pub fn new(config: Fast2SmsConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: Fast2SmsConfig, http: Client) -> Self {
        Self {
            endpoint: config.endpoint,
            api_key: config.api_key,
            http,
        }
    }
}

#[async_trait]
impl SmsNotifier for Fast2SmsNotifier {
    async fn send(&self, to: &PhoneNumber, message: &str) -> Result<(), NotifyError> {
        let payload = BulkSms {
            route: "v3",
            message,
            language: "english",
            numbers: to.as_str(),
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .header("authorization", self.api_key.expose())
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let rejected = || NotifyError::Rejected {
            status: status.as_u16(),
            message: provider_message(&body),
        };

        if !status.is_success() {
            return Err(rejected());
        }

        // A 200 can still carry `"return": false`.
        match serde_json::from_str::<BulkSmsResponse>(&body) {
            Ok(BulkSmsResponse { accepted: true }) => {
                tracing::debug!(to = %to, "SMS accepted");
                Ok(())
            }
            _ => Err(rejected()),
        }
    }
}
