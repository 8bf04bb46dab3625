//! HMAC-SHA256 signatures over checkout results.
//!
//! The provider signs `order_id|payment_id` with the merchant's key secret
//! and hands the lowercase hex digest to the browser. Anyone holding the
//! secret can recompute it; nobody else can forge it.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Signs an arbitrary payload, returning the lowercase hex digest.
pub fn sign(payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Computes the signature the provider attaches to a successful payment.
pub fn sign_payment(order_id: &str, payment_id: &str, secret: &str) -> String {
    let payload = format!("{}|{}", order_id, payment_id);
    sign(payload.as_bytes(), secret)
}

/// Verifies a payment signature using constant-time comparison.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let expected = sign_payment(order_id, payment_id, secret);
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}
