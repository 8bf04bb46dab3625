//! # Academy Hex
//!
//! Application service layer and HTTP adapter for the academy backend.
//!
//! ## Architecture
//!
//! - `service/` - Application services (orders and verification, mentors, signup)
//! - `inbound/` - HTTP adapter (Axum server)
//! - `openapi/` - OpenAPI document served next to the API
//!
//! The services are generic over their ports (`PaymentGateway`,
//! `MentorRepository`, `SmsNotifier`), allowing different adapters to be
//! injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{MentorService, PaymentService, SignupService};
