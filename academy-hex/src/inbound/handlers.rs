//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use academy_types::{
    AppError, CreateOrderRequest, MentorRepository, PaymentGateway, SignupRequest,
    SignupResponse, SmsNotifier, VerificationOutcome, VerifyPaymentRequest,
    VerifyPaymentResponse,
};

use crate::{MentorService, PaymentService, SignupService};

/// Application state shared across handlers.
pub struct AppState<G: PaymentGateway, R: MentorRepository, N: SmsNotifier> {
    pub payments: PaymentService<G>,
    pub mentors: MentorService<R>,
    pub signups: SignupService<N>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Plain-text banner on `/`.
pub async fn index<G: PaymentGateway, R: MentorRepository, N: SmsNotifier>(
    State(state): State<Arc<AppState<G, R, N>>>,
) -> impl IntoResponse {
    format!("{} backend running", state.signups.academy_name())
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Create a payment order with the provider.
#[tracing::instrument(skip(state, payload))]
pub async fn create_order<G: PaymentGateway, R: MentorRepository, N: SmsNotifier>(
    State(state): State<Arc<AppState<G, R, N>>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    let order = state.payments.create_order(req).await?;
    Ok(Json(order))
}

/// Verify a checkout signature.
///
/// Anything short of a matching signature, including an unreadable body,
/// answers `400 {"status": "failure"}`.
#[tracing::instrument(skip(state, payload))]
pub async fn verify_payment<G: PaymentGateway, R: MentorRepository, N: SmsNotifier>(
    State(state): State<Arc<AppState<G, R, N>>>,
    payload: Result<Json<VerifyPaymentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let outcome = match payload {
        Ok(Json(req)) => state.payments.verify_payment(req),
        Err(rejection) => {
            tracing::warn!("Unreadable verification payload: {}", rejection.body_text());
            VerificationOutcome::Rejected
        }
    };

    let status = if outcome.is_verified() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };

    (status, Json(VerifyPaymentResponse::from(outcome)))
}

/// List all mentors.
#[tracing::instrument(skip(state))]
pub async fn list_mentors<G: PaymentGateway, R: MentorRepository, N: SmsNotifier>(
    State(state): State<Arc<AppState<G, R, N>>>,
) -> Response {
    match state.mentors.list_mentors().await {
        Ok(mentors) => Json(mentors).into_response(),
        Err(AppError::Internal(message)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": message })),
        )
            .into_response(),
        Err(e) => ApiError(e).into_response(),
    }
}

/// Register a student and send the welcome SMS.
#[tracing::instrument(skip(state, payload))]
pub async fn signup<G: PaymentGateway, R: MentorRepository, N: SmsNotifier>(
    State(state): State<Arc<AppState<G, R, N>>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;
    state.signups.signup(req).await?;
    Ok(Json(SignupResponse {
        message: "Signup successful, SMS sent".into(),
    }))
}
