//! SMS gateway port.

use crate::domain::PhoneNumber;

/// Error type for SMS delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("SMS gateway unreachable: {0}")]
    Transport(String),

    #[error("SMS gateway rejected the message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Port trait for sending text messages.
#[async_trait::async_trait]
pub trait SmsNotifier: Send + Sync + 'static {
    async fn send(&self, to: &PhoneNumber, message: &str) -> Result<(), NotifyError>;
}
