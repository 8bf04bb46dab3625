//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Request DTOs are deliberately loose (every field optional) so a malformed
//! body can be reported field by field. Each one has a `validate` method that
//! turns it into a domain value or a [`ValidationError`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Currency, Money, OrderDraft, PaymentConfirmation, PhoneNumber, Receipt, Signup,
    VerificationOutcome,
};
use crate::error::ValidationError;

// ─────────────────────────────────────────────────────────────────────────────
// Order DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a payment order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Amount in rupees; converted to paise before reaching the provider
    #[schema(example = 500)]
    pub amount: Option<f64>,
    /// Optional merchant reference; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "enroll-class12-0042")]
    pub receipt: Option<String>,
}

impl CreateOrderRequest {
    pub fn validate(self) -> Result<OrderDraft, ValidationError> {
        let major = self.amount.ok_or(ValidationError::MissingField("amount"))?;
        let amount = Money::from_major(major, Currency::INR)?;
        let receipt = self.receipt.map(Receipt::parse).transpose()?;
        Ok(OrderDraft { amount, receipt })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Verification DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Checkout result forwarded by the client after payment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentRequest {
    #[schema(example = "order_9A33XWu170gUtm")]
    pub razorpay_order_id: Option<String>,
    #[schema(example = "pay_29QQoUBi66xm2f")]
    pub razorpay_payment_id: Option<String>,
    /// Hex HMAC-SHA256 of `order_id|payment_id`
    pub razorpay_signature: Option<String>,
}

impl VerifyPaymentRequest {
    pub fn validate(self) -> Result<PaymentConfirmation, ValidationError> {
        Ok(PaymentConfirmation {
            order_id: present(self.razorpay_order_id, "razorpay_order_id")?,
            payment_id: present(self.razorpay_payment_id, "razorpay_payment_id")?,
            signature: present(self.razorpay_signature, "razorpay_signature")?,
        })
    }
}

/// Outcome of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failure,
}

/// Response of the verify endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub status: PaymentStatus,
}

impl From<VerificationOutcome> for VerifyPaymentResponse {
    fn from(outcome: VerificationOutcome) -> Self {
        let status = match outcome {
            VerificationOutcome::Verified => PaymentStatus::Success,
            VerificationOutcome::Rejected => PaymentStatus::Failure,
        };
        Self { status }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Signup DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Signup form submission.
///
/// Accepts both the backend field names (`studentPhone`, `parentPhone`) and
/// the ones the signup form posts (`contactNumber`, `guardianNumber`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[schema(example = "Riya Patil")]
    pub name: Option<String>,
    #[serde(alias = "contactNumber")]
    #[schema(example = "9876543210")]
    pub student_phone: Option<String>,
    #[serde(alias = "guardianNumber", skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, rename = "class", skip_serializing_if = "Option::is_none")]
    #[schema(example = "Class 12")]
    pub class_name: Option<String>,
}

impl SignupRequest {
    pub fn validate(self) -> Result<Signup, ValidationError> {
        let name = required(self.name, "name")?;
        let student_phone = required(self.student_phone, "studentPhone")?;
        let student_phone = PhoneNumber::parse(&student_phone)?;
        let parent_phone = self
            .parent_phone
            .filter(|p| !p.trim().is_empty())
            .map(|p| PhoneNumber::parse(&p))
            .transpose()?;

        Ok(Signup {
            name,
            student_phone,
            parent_phone,
        })
    }
}

/// Response after a successful signup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignupResponse {
    #[schema(example = "Signup successful, SMS sent")]
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error body returned by every endpoint except `/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Order creation failed")]
    pub error: String,
    #[schema(example = 500)]
    pub code: u16,
}

/// Signed values are kept byte for byte; only absence or emptiness is rejected.
fn present(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::MissingField(field)),
        Some(v) if v.is_empty() => Err(ValidationError::EmptyField(field)),
        Some(v) => Ok(v),
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField(field))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    #[test]
    fn test_create_order_validates_amount() {
        let draft = CreateOrderRequest {
            amount: Some(500.0),
            receipt: None,
        }
        .validate()
        .unwrap();

        assert_eq!(draft.amount.amount(), 50_000);
        assert!(draft.receipt.is_none());
    }

    #[test]
    fn test_create_order_missing_amount() {
        let result = CreateOrderRequest::default().validate();
        assert!(matches!(result, Err(ValidationError::MissingField("amount"))));
    }

    #[test]
    fn test_create_order_negative_amount() {
        let result = CreateOrderRequest {
            amount: Some(-1.0),
            receipt: None,
        }
        .validate();
        assert!(matches!(
            result,
            Err(ValidationError::Domain(DomainError::NonPositiveAmount))
        ));
    }

    #[test]
    fn test_verify_request_requires_all_fields() {
        let req: VerifyPaymentRequest = serde_json::from_str(
            r#"{"razorpay_order_id": "order_1", "razorpay_payment_id": "pay_1"}"#,
        )
        .unwrap();

        assert!(matches!(
            req.validate(),
            Err(ValidationError::MissingField("razorpay_signature"))
        ));
    }

    #[test]
    fn test_verify_request_rejects_empty_fields() {
        let req = VerifyPaymentRequest {
            razorpay_order_id: Some("order_1".into()),
            razorpay_payment_id: Some(String::new()),
            razorpay_signature: Some("abc".into()),
        };

        assert!(matches!(
            req.validate(),
            Err(ValidationError::EmptyField("razorpay_payment_id"))
        ));
    }

    #[test]
    fn test_verify_request_keeps_values_verbatim() {
        let req = VerifyPaymentRequest {
            razorpay_order_id: Some(" order_1".into()),
            razorpay_payment_id: Some("pay_1\n".into()),
            razorpay_signature: Some("abc ".into()),
        };

        let confirmation = req.validate().unwrap();

        assert_eq!(confirmation.order_id, " order_1");
        assert_eq!(confirmation.payment_id, "pay_1\n");
        assert_eq!(confirmation.signature, "abc ");
    }

    #[test]
    fn test_verify_response_shape() {
        let ok = VerifyPaymentResponse::from(VerificationOutcome::Verified);
        let bad = VerifyPaymentResponse::from(VerificationOutcome::Rejected);

        assert_eq!(
            serde_json::to_value(ok).unwrap(),
            serde_json::json!({"status": "success"})
        );
        assert_eq!(
            serde_json::to_value(bad).unwrap(),
            serde_json::json!({"status": "failure"})
        );
    }

    #[test]
    fn test_signup_accepts_form_field_names() {
        let req: SignupRequest = serde_json::from_str(
            r#"{
                "name": "Riya",
                "class": "Class 12",
                "email": "riya@example.com",
                "contactNumber": "+91 98765 43210",
                "guardianNumber": "9123456780"
            }"#,
        )
        .unwrap();

        let signup = req.validate().unwrap();
        assert_eq!(signup.student_phone.as_str(), "9876543210");
        assert_eq!(signup.parent_phone.unwrap().as_str(), "9123456780");
    }

    #[test]
    fn test_signup_blank_parent_phone_is_absent() {
        let req = SignupRequest {
            name: Some("Riya".into()),
            student_phone: Some("9876543210".into()),
            parent_phone: Some("".into()),
            ..Default::default()
        };

        assert!(req.validate().unwrap().parent_phone.is_none());
    }

    #[test]
    fn test_signup_invalid_phone() {
        let req = SignupRequest {
            name: Some("Riya".into()),
            student_phone: Some("12345".into()),
            ..Default::default()
        };

        assert!(matches!(
            req.validate(),
            Err(ValidationError::Domain(DomainError::InvalidPhone(_)))
        ));
    }
}
