//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod gateway;
mod mentors;
mod sms;

pub use gateway::{GatewayError, PaymentGateway};
pub use mentors::MentorRepository;
pub use sms::{NotifyError, SmsNotifier};
