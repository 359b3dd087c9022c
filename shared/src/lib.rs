//! Auth API Shared Library
//!
//! Framework-free types used by the backend and its tests: the credential
//! normalizer, request/response payloads, validation rules and the error
//! taxonomy.

pub mod credentials;
pub mod errors;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use credentials::{
    normalize, resolve, selector, IdentifierKind, IdentifierTriple, NormalizedCredential,
    Selector,
};
pub use errors::*;
pub use types::*;
