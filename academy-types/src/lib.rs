//! # Academy Types
//!
//! Domain types and port traits for the academy enrollment backend.
//! This crate has ZERO external IO dependencies - only data structures,
//! validation rules, signatures, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Money, Order, Mentor, PhoneNumber)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries, with validation
//! - `error/` - Domain and application error types
//! - `signature/` - HMAC-SHA256 payment signatures

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod signature;

// Re-export commonly used types
pub use domain::{
    Currency, Mentor, MentorId, Money, NewMentor, Order, OrderDraft, OrderRequest,
    PaymentConfirmation, PhoneNumber, Receipt, Secret, Signup, VerificationOutcome,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError, ValidationError};
pub use ports::{GatewayError, MentorRepository, NotifyError, PaymentGateway, SmsNotifier};
