//! Request and response types for the auth API

use crate::credentials::{IdentifierTriple, NormalizedCredential};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration request
///
/// Any of email/username/mobile may be supplied; only the highest-priority
/// one is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub identifiers: IdentifierTriple,
    #[serde(default)]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(flatten)]
    pub identifiers: IdentifierTriple,
    #[serde(default)]
    pub password: String,
}

/// Successful register/login payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub name: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub mobile: Option<String>,
    pub created_at: DateTime<Utc>,
    pub id: String,
    pub token: String,
}

impl AuthResponse {
    pub fn new(
        credential: NormalizedCredential,
        name: String,
        created_at: DateTime<Utc>,
        id: Uuid,
        token: String,
    ) -> Self {
        let IdentifierTriple {
            email,
            username,
            mobile,
        } = credential.into_triple();

        Self {
            name,
            email,
            username,
            mobile,
            created_at,
            id: id.to_string(),
            token,
        }
    }
}
