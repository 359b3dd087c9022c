//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! stores and external capabilities.

pub mod auth;

pub use auth::AuthService;
