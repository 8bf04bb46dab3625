//! Domain models for the academy backend.

pub mod mentor;
pub mod money;
pub mod order;
pub mod payment;
pub mod phone;
pub mod secret;
pub mod signup;

pub use mentor::{Mentor, MentorId, NewMentor};
pub use money::{Currency, Money};
pub use order::{Order, OrderDraft, OrderRequest, Receipt};
pub use payment::{PaymentConfirmation, VerificationOutcome};
pub use phone::PhoneNumber;
pub use secret::Secret;
pub use signup::Signup;
