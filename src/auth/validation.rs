//! Email, username, and password-strength policy.

use lazy_static::lazy_static;
use regex::Regex;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Password-strength checks, short-circuiting at the first failure so the
/// user sees one actionable reason. Check order is part of the contract.
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one number");
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err("Username must be at least 3 characters long");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@example.org"));
        assert!(is_valid_email("user_name%x@sub.domain.com"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@.c"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn password_failures_surface_in_check_order() {
        // Too short wins even though other rules also fail.
        let err = validate_password("Short1").unwrap_err();
        assert!(err.contains("8 characters"));

        let err = validate_password("alllowercase1").unwrap_err();
        assert!(err.contains("uppercase"));

        let err = validate_password("ALLUPPERCASE1").unwrap_err();
        assert!(err.contains("lowercase"));

        let err = validate_password("NoDigitsHere").unwrap_err();
        assert!(err.contains("number"));
    }

    #[test]
    fn strong_password_passes() {
        assert!(validate_password("ValidPass1").is_ok());
        assert!(validate_password("Passw0rd!").is_ok());
    }

    #[test]
    fn username_minimum_length() {
        assert!(validate_username("al").is_err());
        assert!(validate_username("ali").is_ok());
    }
}
