//! # Academy Gateways
//!
//! Outbound adapters for the third-party services the backend talks to:
//! - `razorpay` - implements `PaymentGateway` against the Razorpay orders API
//! - `fast2sms` - implements `SmsNotifier` against the Fast2SMS bulk API

pub mod fast2sms;
pub mod razorpay;

pub use fast2sms::{Fast2SmsConfig, Fast2SmsNotifier};
pub use razorpay::{RazorpayConfig, RazorpayGateway};

/// Pulls a human readable message out of a provider error body.
///
/// Falls back to the raw body when no known field is present.
pub(crate) fn provider_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    let message = value
        .pointer("/error/description")
        .or_else(|| value.get("message"))
        .or_else(|| value.get("error"));

    match message {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.to_string(),
    }
}
