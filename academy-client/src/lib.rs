//! # Academy Client SDK
//!
//! A typed Rust client for the academy backend API.

use academy_types::{
    CreateOrderRequest, Mentor, Order, PaymentStatus, SignupRequest, SignupResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Academy API client.
pub struct AcademyClient {
    base_url: String,
    http: Client,
}

impl AcademyClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Creates a payment order for `amount` rupees.
    pub async fn create_order(
        &self,
        amount: f64,
        receipt: Option<String>,
    ) -> Result<Order, ClientError> {
        let req = CreateOrderRequest {
            amount: Some(amount),
            receipt,
        };
        self.post("/create-order", &req).await
    }

    /// Submits a checkout result for verification.
    ///
    /// A rejected signature comes back as `PaymentStatus::Failure`, not as an
    /// error.
    pub async fn verify_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<PaymentStatus, ClientError> {
        let req = VerifyPaymentRequest {
            razorpay_order_id: Some(order_id.to_string()),
            razorpay_payment_id: Some(payment_id.to_string()),
            razorpay_signature: Some(signature.to_string()),
        };
        let resp = self
            .http
            .post(format!("{}/verify", self.base_url))
            .json(&req)
            .send()
            .await?;

        if resp.status() == StatusCode::BAD_REQUEST {
            let body = resp.text().await?;
            return match serde_json::from_str::<VerifyPaymentResponse>(&body) {
                Ok(verdict) => Ok(verdict.status),
                Err(_) => Err(ClientError::Api {
                    status: StatusCode::BAD_REQUEST.as_u16(),
                    message: body,
                }),
            };
        }

        let verdict: VerifyPaymentResponse = self.handle_response(resp).await?;
        Ok(verdict.status)
    }

    /// Lists all mentors.
    pub async fn list_mentors(&self) -> Result<Vec<Mentor>, ClientError> {
        self.get("/api/mentors").await
    }

    /// Registers a student; returns the server's confirmation message.
    pub async fn signup(&self, req: &SignupRequest) -> Result<String, ClientError> {
        let resp: SignupResponse = self.post("/api/signup", req).await?;
        Ok(resp.message)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            })
        }
    }
}

/// The API reports errors as `{"error": ..}`, except mentor listing which
/// uses `{"message": ..}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .or_else(|| v.get("message"))
                .and_then(|e| e.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}
