//! Input validation functions
//!
//! Format rules that run before credential normalization. An identifier that
//! is absent or empty is skipped here and left for the normalizer to treat as
//! missing.

use crate::errors::FieldError;
use crate::types::{LoginRequest, RegisterRequest};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use validator::ValidateEmail;

static MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").unwrap());

/// Minimum username length at registration
pub const USERNAME_MIN_LEN: usize = 6;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate a mobile number: digits only with an optional leading `+`
pub fn validate_mobile(mobile: &str) -> Result<(), String> {
    if !MOBILE_REGEX.is_match(mobile) {
        return Err("Invalid mobile number".to_string());
    }
    Ok(())
}

/// Validate username characters and an optional minimum length
pub fn validate_username(username: &str, min_len: Option<usize>) -> Result<(), String> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Username must be alphanumeric".to_string());
    }
    if let Some(min) = min_len {
        if username.chars().count() < min {
            return Err(format!("Username must be at least {} characters", min));
        }
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if len > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate password length and character classes.
///
/// Requires at least one lowercase letter, one uppercase letter, one digit
/// and one symbol.
pub fn validate_strong_password(password: &str) -> Result<(), String> {
    validate_password(password)?;

    let has_lower = password.chars().any(|c| c.is_lowercase());
    let has_upper = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if !(has_lower && has_upper && has_digit && has_symbol) {
        return Err(
            "Password must contain upper and lower case letters, a number and a symbol"
                .to_string(),
        );
    }
    Ok(())
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name is required".to_string());
    }
    if name.chars().count() > 100 {
        return Err("Name too long".to_string());
    }
    Ok(())
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn check(field: &'static str, result: Result<(), String>) -> Result<(), FieldError> {
    result.map_err(|message| FieldError::new(field, message))
}

/// Validate a registration request
pub fn validate_register(req: &RegisterRequest) -> Result<(), FieldError> {
    check("name", validate_name(&req.name))?;
    if let Some(mobile) = present(&req.identifiers.mobile) {
        check("mobile", validate_mobile(mobile))?;
    }
    if let Some(username) = present(&req.identifiers.username) {
        check("username", validate_username(username, Some(USERNAME_MIN_LEN)))?;
    }
    if let Some(email) = present(&req.identifiers.email) {
        check("email", validate_email(email))?;
    }
    check("password", validate_strong_password(&req.password))
}

/// Validate a login request
pub fn validate_login(req: &LoginRequest) -> Result<(), FieldError> {
    if let Some(mobile) = present(&req.identifiers.mobile) {
        check("mobile", validate_mobile(mobile))?;
    }
    if let Some(username) = present(&req.identifiers.username) {
        check("username", validate_username(username, None))?;
    }
    if let Some(email) = present(&req.identifiers.email) {
        check("email", validate_email(email))?;
    }
    check("password", validate_password(&req.password))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::IdentifierTriple;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use proptest::prelude::*;
    use rstest::rstest;

    fn register(identifiers: IdentifierTriple, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: Name().fake(),
            identifiers,
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.co.uk").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("spaces in@email.com").is_err());
    }

    #[test]
    fn test_fake_emails_are_valid() {
        for _ in 0..20 {
            let email: String = SafeEmail().fake();
            assert!(validate_email(&email).is_ok(), "{email}");
        }
    }

    #[rstest]
    #[case("5551234", true)]
    #[case("+14155552671", true)]
    #[case("555-1234", false)]
    #[case("12345", false)]
    #[case("phone123", false)]
    fn test_validate_mobile(#[case] mobile: &str, #[case] ok: bool) {
        assert_eq!(validate_mobile(mobile).is_ok(), ok);
    }

    #[rstest]
    #[case("alice99", None, true)]
    #[case("bob", None, true)]
    #[case("bob", Some(USERNAME_MIN_LEN), false)]
    #[case("alice_99", None, false)]
    #[case("alice99", Some(USERNAME_MIN_LEN), true)]
    fn test_validate_username(#[case] username: &str, #[case] min: Option<usize>, #[case] ok: bool) {
        assert_eq!(validate_username(username, min).is_ok(), ok);
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_strong_password() {
        assert!(validate_strong_password("Str0ng!pass").is_ok());
        assert!(validate_strong_password("password123").is_err());
        assert!(validate_strong_password("PASSWORD1!").is_err());
        assert!(validate_strong_password("Password!").is_err());
        assert!(validate_strong_password("Sh0rt!").is_err());
    }

    #[rstest]
    #[case("Aéé1!é", false)]
    #[case("ÄÖÜß", false)]
    #[case("Pässwörd", true)]
    #[case(&"é".repeat(128), true)]
    #[case(&"é".repeat(129), false)]
    fn test_password_length_counts_characters(#[case] password: &str, #[case] ok: bool) {
        assert_eq!(validate_password(password).is_ok(), ok);
    }

    #[test]
    fn test_multibyte_short_password_rejected() {
        let err = validate_strong_password("Aéé1!é").unwrap_err();
        assert_eq!(err, "Password must be at least 8 characters");
    }

    #[test]
    fn test_register_requires_name() {
        let mut req = register(
            IdentifierTriple {
                username: Some("alice99".to_string()),
                ..Default::default()
            },
            "Str0ng!pass",
        );
        req.name = "   ".to_string();

        assert_eq!(validate_register(&req).unwrap_err().field, "name");
    }

    #[test]
    fn test_register_rejects_short_username() {
        let req = register(
            IdentifierTriple {
                username: Some("bob".to_string()),
                ..Default::default()
            },
            "Str0ng!pass",
        );

        assert_eq!(validate_register(&req).unwrap_err().field, "username");
    }

    #[test]
    fn test_login_allows_short_username() {
        let req = LoginRequest {
            identifiers: IdentifierTriple {
                username: Some("bob".to_string()),
                ..Default::default()
            },
            password: "password".to_string(),
        };

        assert!(validate_login(&req).is_ok());
    }

    #[test]
    fn test_empty_identifiers_are_skipped() {
        let req = register(
            IdentifierTriple {
                email: Some(String::new()),
                username: Some(String::new()),
                mobile: Some(String::new()),
            },
            "Str0ng!pass",
        );

        // Format checks pass; the normalizer reports the missing credential
        assert!(validate_register(&req).is_ok());
    }

    #[test]
    fn test_weak_password_rejected_on_register_only() {
        let identifiers = IdentifierTriple {
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };
        let req = register(identifiers.clone(), "password123");
        assert_eq!(validate_register(&req).unwrap_err().field, "password");

        let login = LoginRequest {
            identifiers,
            password: "password123".to_string(),
        };
        assert!(validate_login(&login).is_ok());
    }

    #[test]
    fn test_login_rejects_multibyte_short_password() {
        let login = LoginRequest {
            identifiers: IdentifierTriple {
                email: Some("a@b.com".to_string()),
                ..Default::default()
            },
            password: "ÄÖÜß".to_string(),
        };
        assert_eq!(validate_login(&login).unwrap_err().field, "password");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_alphanumeric_usernames_accepted(username in "[a-zA-Z0-9]{6,30}") {
            prop_assert!(validate_username(&username, Some(USERNAME_MIN_LEN)).is_ok());
        }

        #[test]
        fn prop_digit_strings_are_mobiles(mobile in "\\+?[0-9]{7,15}") {
            prop_assert!(validate_mobile(&mobile).is_ok());
        }

        #[test]
        fn prop_short_passwords_rejected(password in "[a-zA-Z0-9]{0,7}") {
            prop_assert!(validate_password(&password).is_err());
        }
    }
}
