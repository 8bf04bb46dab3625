//! Payment orders as issued by the provider.

use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::{Currency, Money};
use crate::error::DomainError;

/// Maximum receipt length accepted by the payment provider.
pub const MAX_RECEIPT_LEN: usize = 40;

const RECEIPT_SUFFIX_LEN: usize = 6;

/// Merchant-side reference correlating an order to a business transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(String);

impl Receipt {
    /// Wraps a client supplied receipt.
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_RECEIPT_LEN {
            return Err(DomainError::InvalidReceipt);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Derives a receipt from the given instant.
    ///
    /// Format: `receipt_<unix millis>_<random suffix>`. The suffix keeps two
    /// orders issued in the same millisecond apart.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(RECEIPT_SUFFIX_LEN)
            .map(char::from)
            .collect();
        Self(format!("receipt_{}_{}", now.timestamp_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated order-creation input, before a receipt is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub amount: Money,
    pub receipt: Option<Receipt>,
}

/// Body of the order-creation call made to the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    /// Amount in minor units (paise)
    pub amount: i64,
    pub currency: Currency,
    pub receipt: Receipt,
}

impl OrderRequest {
    pub fn new(amount: Money, receipt: Receipt) -> Self {
        Self {
            amount: amount.amount(),
            currency: amount.currency(),
            receipt,
        }
    }
}

/// Order record owned by the payment provider.
///
/// Only the fields this service relies on are typed; everything else the
/// provider returns is kept in `extra` so the order reaches the caller
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_receipt_format() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_123).unwrap();
        let receipt = Receipt::generate(now);
        let value = receipt.as_str();

        assert!(value.starts_with("receipt_1700000000123_"));
        assert_eq!(value.len(), "receipt_1700000000123_".len() + RECEIPT_SUFFIX_LEN);
        assert!(value.len() <= MAX_RECEIPT_LEN);
    }

    #[test]
    fn test_generated_receipts_differ_within_same_millisecond() {
        let now = Utc::now();
        let a = Receipt::generate(now);
        let b = Receipt::generate(now);
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_receipt_limits() {
        assert!(Receipt::parse("enroll-42").is_ok());
        assert!(matches!(Receipt::parse("  "), Err(DomainError::InvalidReceipt)));
        assert!(matches!(
            Receipt::parse("x".repeat(MAX_RECEIPT_LEN + 1)),
            Err(DomainError::InvalidReceipt)
        ));
    }

    #[test]
    fn test_parse_receipt_counts_characters() {
        let at_limit = "₹".repeat(MAX_RECEIPT_LEN);
        assert_eq!(Receipt::parse(at_limit.clone()).unwrap().as_str(), at_limit);

        assert!(matches!(
            Receipt::parse("é".repeat(MAX_RECEIPT_LEN + 1)),
            Err(DomainError::InvalidReceipt)
        ));
    }

    #[test]
    fn test_order_request_serializes_minor_units() {
        let money = Money::from_major(500.0, Currency::INR).unwrap();
        let req = OrderRequest::new(money, Receipt::parse("r1").unwrap());
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"amount": 50000, "currency": "INR", "receipt": "r1"})
        );
    }

    #[test]
    fn test_order_keeps_provider_fields() {
        let raw = serde_json::json!({
            "id": "order_9A33XWu170gUtm",
            "entity": "order",
            "amount": 50000,
            "amount_paid": 0,
            "currency": "INR",
            "receipt": "receipt_1",
            "status": "created",
            "created_at": 1700000000
        });

        let order: Order = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(order.id, "order_9A33XWu170gUtm");
        assert_eq!(order.extra["status"], "created");
        assert_eq!(serde_json::to_value(&order).unwrap(), raw);
    }

    #[test]
    fn test_order_keeps_null_receipt() {
        let raw = serde_json::json!({
            "id": "order_9A33XWu170gUtm",
            "entity": "order",
            "amount": 50000,
            "currency": "INR",
            "receipt": null,
            "status": "created"
        });

        let order: Order = serde_json::from_value(raw.clone()).unwrap();
        assert!(order.receipt.is_none());
        assert_eq!(serde_json::to_value(&order).unwrap(), raw);
    }
}
