//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use academy_types::domain::{Currency, Mentor, MentorId};
use academy_types::dto::{
    CreateOrderRequest, ErrorResponse, PaymentStatus, SignupRequest, SignupResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Create a payment order
///
/// The amount is given in rupees and forwarded to the provider in paise.
/// The provider's order object is returned as is.
#[utoipa::path(
    post,
    path = "/create-order",
    tag = "payments",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created by the provider", body = inline(serde_json::Value), example = json!({
            "id": "order_9A33XWu170gUtm",
            "entity": "order",
            "amount": 50000,
            "currency": "INR",
            "receipt": "receipt_1700000000123_Qm3xYz",
            "status": "created"
        })),
        (status = 400, description = "Invalid amount or receipt", body = ErrorResponse),
        (status = 500, description = "Order creation failed", body = ErrorResponse)
    )
)]
async fn create_order() {}

/// Verify a payment signature
#[utoipa::path(
    post,
    path = "/verify",
    tag = "payments",
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Signature matches", body = VerifyPaymentResponse, example = json!({"status": "success"})),
        (status = 400, description = "Signature mismatch or malformed payload", body = VerifyPaymentResponse, example = json!({"status": "failure"}))
    )
)]
async fn verify_payment() {}

/// List mentors
#[utoipa::path(
    get,
    path = "/api/mentors",
    tag = "mentors",
    responses(
        (status = 200, description = "All mentors", body = Vec<Mentor>),
        (status = 500, description = "Failed to fetch mentors", body = inline(serde_json::Value), example = json!({"message": "Failed to fetch mentors"}))
    )
)]
async fn list_mentors() {}

/// Sign up and notify by SMS
#[utoipa::path(
    post,
    path = "/api/signup",
    tag = "signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Signup notifications sent", body = SignupResponse),
        (status = 400, description = "Invalid name or phone number", body = ErrorResponse),
        (status = 500, description = "Signup succeeded but SMS failed", body = ErrorResponse)
    )
)]
async fn signup() {}

/// OpenAPI documentation for the academy API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Academy Enrollment API",
        version = "1.0.0",
        description = "Payment orders, payment verification, mentor listing and signup notifications for the academy website.",
        license(name = "MIT"),
    ),
    paths(health, create_order, verify_payment, list_mentors, signup),
    components(
        schemas(
            CreateOrderRequest,
            VerifyPaymentRequest,
            VerifyPaymentResponse,
            PaymentStatus,
            SignupRequest,
            SignupResponse,
            ErrorResponse,
            Mentor,
            MentorId,
            Currency,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "payments", description = "Order creation and payment verification"),
        (name = "mentors", description = "Mentor directory"),
        (name = "signup", description = "Enrollment signup"),
    )
)]
pub struct ApiDoc;
