//! Payment confirmation as returned by the provider's checkout.

/// A checkout result whose fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Result of checking a confirmation's signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    Verified,
    Rejected,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl From<bool> for VerificationOutcome {
    fn from(matched: bool) -> Self {
        if matched { Self::Verified } else { Self::Rejected }
    }
}
