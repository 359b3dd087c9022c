//! Credential normalization
//!
//! A user may identify themselves through one of three channels: email,
//! username or mobile number. Both registration and login resolve the
//! supplied triple the same way:
//!
//! - the **selector** is the first non-empty value in the fixed order
//!   `email > username > mobile`, used to look up an existing record;
//! - the **normalized credential** keeps only that winning channel and
//!   nulls the other two, so a record is addressable by exactly one of them.
//!
//! Empty strings count as absent. Field order in the request payload has no
//! influence on the outcome.

use crate::errors::AuthError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three alternative login handles as they arrive in a request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierTriple {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
}

impl IdentifierTriple {
    /// Candidate values in precedence order
    fn candidates(&self) -> [(IdentifierKind, Option<&str>); 3] {
        [
            (IdentifierKind::Email, self.email.as_deref()),
            (IdentifierKind::Username, self.username.as_deref()),
            (IdentifierKind::Mobile, self.mobile.as_deref()),
        ]
    }

    /// Highest-priority channel carrying a non-empty value
    fn strongest(&self) -> Option<(IdentifierKind, &str)> {
        self.candidates()
            .into_iter()
            .find_map(|(kind, value)| value.filter(|v| !v.is_empty()).map(|v| (kind, v)))
    }
}

/// Identifier channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierKind {
    Email,
    Username,
    Mobile,
}

impl IdentifierKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierKind::Email => "email",
            IdentifierKind::Username => "username",
            IdentifierKind::Mobile => "mobile",
        }
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value used to query the store for an existing user.
///
/// The store matches `value` against all three identifier columns; `kind`
/// only records which request field it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    kind: IdentifierKind,
    value: String,
}

impl Selector {
    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Identifier set with at most one populated field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedCredential {
    email: Option<String>,
    username: Option<String>,
    mobile: Option<String>,
}

impl NormalizedCredential {
    fn only(kind: IdentifierKind, value: &str) -> Self {
        let value = Some(value.to_string());
        match kind {
            IdentifierKind::Email => Self {
                email: value,
                ..Self::default()
            },
            IdentifierKind::Username => Self {
                username: value,
                ..Self::default()
            },
            IdentifierKind::Mobile => Self {
                mobile: value,
                ..Self::default()
            },
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref()
    }

    /// The populated channel, if any
    pub fn populated(&self) -> Option<(IdentifierKind, &str)> {
        [
            (IdentifierKind::Email, self.email()),
            (IdentifierKind::Username, self.username()),
            (IdentifierKind::Mobile, self.mobile()),
        ]
        .into_iter()
        .find_map(|(kind, value)| value.map(|v| (kind, v)))
    }

    pub fn into_triple(self) -> IdentifierTriple {
        IdentifierTriple {
            email: self.email,
            username: self.username,
            mobile: self.mobile,
        }
    }
}

/// Pick the selector for a store lookup.
///
/// Fails with [`AuthError::MissingCredential`] when all three fields are
/// absent or empty; no lookup should be attempted in that case.
pub fn selector(triple: &IdentifierTriple) -> Result<Selector, AuthError> {
    triple
        .strongest()
        .map(|(kind, value)| Selector {
            kind,
            value: value.to_string(),
        })
        .ok_or(AuthError::MissingCredential)
}

/// Keep only the highest-priority non-empty identifier.
///
/// Returns an all-null credential when nothing was supplied.
pub fn normalize(triple: &IdentifierTriple) -> NormalizedCredential {
    triple
        .strongest()
        .map(|(kind, value)| NormalizedCredential::only(kind, value))
        .unwrap_or_default()
}

/// Selector and normalized credential together.
///
/// This is the single entry point for both registration and login so the
/// two flows cannot drift apart.
pub fn resolve(triple: &IdentifierTriple) -> Result<(Selector, NormalizedCredential), AuthError> {
    let selector = selector(triple)?;
    let normalized = NormalizedCredential::only(selector.kind, &selector.value);
    Ok((selector, normalized))
}
