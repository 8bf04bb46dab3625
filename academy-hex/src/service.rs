//! Application Services
//!
//! Orchestrate domain operations through the ports.
//! Contain NO infrastructure logic - pure business orchestration.

use chrono::Utc;

use academy_types::{
    AppError, CreateOrderRequest, Mentor, MentorRepository, Order, OrderRequest,
    PaymentConfirmation, PaymentGateway, Receipt, Secret, SignupRequest, SmsNotifier,
    VerificationOutcome, VerifyPaymentRequest, signature,
};

// ─────────────────────────────────────────────────────────────────────────────
// Payments
// ─────────────────────────────────────────────────────────────────────────────

/// Issues payment orders and verifies checkout signatures.
///
/// Generic over `G: PaymentGateway` - the provider adapter is injected at
/// compile time. The key secret is handed over once at construction and
/// never read from the environment afterwards.
pub struct PaymentService<G: PaymentGateway> {
    gateway: G,
    key_secret: Secret,
}

impl<G: PaymentGateway> PaymentService<G> {
    /// Creates a new payment service.
    pub fn new(gateway: G, key_secret: Secret) -> Self {
        Self {
            gateway,
            key_secret,
        }
    }

    /// Returns a reference to the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Validates the request and asks the provider to mint an order.
    ///
    /// Provider failures are logged in full and reported with a generic
    /// message only.
    #[tracing::instrument(skip(self, req))]
    pub async fn create_order(&self, req: CreateOrderRequest) -> Result<Order, AppError> {
        let draft = req.validate()?;
        let receipt = draft
            .receipt
            .unwrap_or_else(|| Receipt::generate(Utc::now()));
        let request = OrderRequest::new(draft.amount, receipt);

        tracing::info!(
            amount = request.amount,
            currency = %request.currency,
            receipt = %request.receipt,
            "Creating order"
        );

        let order = self.gateway.create_order(request).await.map_err(|e| {
            tracing::error!("Order creation failed: {}", e);
            AppError::Upstream("Order creation failed".into())
        })?;

        tracing::info!(order_id = %order.id, "Order created");
        Ok(order)
    }

    /// Checks a checkout result against the expected signature.
    ///
    /// A payload that does not validate is rejected like a bad signature.
    #[tracing::instrument(skip(self, req))]
    pub fn verify_payment(&self, req: VerifyPaymentRequest) -> VerificationOutcome {
        match req.validate() {
            Ok(confirmation) => self.verify_confirmation(&confirmation),
            Err(e) => {
                tracing::warn!("Rejecting malformed verification payload: {}", e);
                VerificationOutcome::Rejected
            }
        }
    }

    /// Verifies an already validated confirmation.
    pub fn verify_confirmation(&self, confirmation: &PaymentConfirmation) -> VerificationOutcome {
        let outcome: VerificationOutcome = signature::verify_payment_signature(
            &confirmation.order_id,
            &confirmation.payment_id,
            &confirmation.signature,
            self.key_secret.expose(),
        )
        .into();

        match outcome {
            VerificationOutcome::Verified => tracing::info!(
                order_id = %confirmation.order_id,
                payment_id = %confirmation.payment_id,
                "Payment verified"
            ),
            VerificationOutcome::Rejected => tracing::warn!(
                order_id = %confirmation.order_id,
                payment_id = %confirmation.payment_id,
                "Payment signature mismatch"
            ),
        }

        outcome
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mentors
// ─────────────────────────────────────────────────────────────────────────────

/// Read access to the mentor directory.
pub struct MentorService<R: MentorRepository> {
    repo: R,
}

impl<R: MentorRepository> MentorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Lists all mentors.
    pub async fn list_mentors(&self) -> Result<Vec<Mentor>, AppError> {
        self.repo.list_mentors().await.map_err(|e| {
            tracing::error!("Failed to fetch mentors: {}", e);
            AppError::Internal("Failed to fetch mentors".into())
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Signup
// ─────────────────────────────────────────────────────────────────────────────

/// Sends the signup notifications.
pub struct SignupService<N: SmsNotifier> {
    notifier: N,
    academy_name: String,
}

impl<N: SmsNotifier> SignupService<N> {
    pub fn new(notifier: N, academy_name: impl Into<String>) -> Self {
        Self {
            notifier,
            academy_name: academy_name.into(),
        }
    }

    /// Returns a reference to the underlying notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn academy_name(&self) -> &str {
        &self.academy_name
    }

    /// Greets the student and, when a number is given, informs the parent.
    ///
    /// Stops at the first failed message.
    #[tracing::instrument(skip(self, req))]
    pub async fn signup(&self, req: SignupRequest) -> Result<(), AppError> {
        let signup = req.validate()?;

        let sms_failed = |e: academy_types::NotifyError| {
            tracing::error!("SMS sending failed: {}", e);
            AppError::Upstream("Signup succeeded but SMS failed".into())
        };

        self.notifier
            .send(
                &signup.student_phone,
                &signup.student_message(&self.academy_name),
            )
            .await
            .map_err(sms_failed)?;

        if let Some(parent_phone) = &signup.parent_phone {
            self.notifier
                .send(parent_phone, &signup.parent_message(&self.academy_name))
                .await
                .map_err(sms_failed)?;
        }

        tracing::info!(
            parent_notified = signup.parent_phone.is_some(),
            "Signup notifications sent"
        );
        Ok(())
    }
}
