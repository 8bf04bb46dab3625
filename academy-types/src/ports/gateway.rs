//! Payment provider port.
//!
//! The provider owns orders; this service only asks it to mint them.

use crate::domain::{Order, OrderRequest};

/// Error type for payment provider calls.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Provider unreachable: {0}")]
    Transport(String),

    #[error("Provider rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected provider response: {0}")]
    Decode(String),
}

/// Port trait for payment providers.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// Creates an order for the given amount and receipt.
    /// The returned order is the provider's record, untouched.
    async fn create_order(&self, req: OrderRequest) -> Result<Order, GatewayError>;
}
