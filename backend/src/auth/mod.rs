//! Authentication capabilities
//!
//! JWT issuance and argon2 password hashing.

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenIssuer};
pub use password::{PasswordHasher, PasswordService, PasswordVerifier};
