//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate password
///
/// Only presence and length are checked; accounts created by the existing
/// frontend use short passwords.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

/// Validate an optional display name
pub fn validate_name(name: Option<&str>) -> Result<(), String> {
    match name {
        Some(name) if name.trim().is_empty() => Err("Name must not be blank".to_string()),
        Some(name) if name.chars().count() > 100 => {
            Err("Name must be at most 100 characters long".to_string())
        }
        _ => Ok(()),
    }
}

/// Validate an optional phone number
pub fn validate_phone(phone: Option<&str>) -> Result<(), String> {
    let Some(phone) = phone else {
        return Ok(());
    };

    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^\+?[0-9][0-9 ()-]{5,19}$").expect("Failed to compile phone regex")
    });

    if !regex.is_match(phone) {
        return Err("Invalid phone number format".to_string());
    }

    Ok(())
}

/// Validate a candidate name, which is the interview result key
pub fn validate_candidate_name(candidate_name: &str) -> Result<(), String> {
    if candidate_name.trim().is_empty() {
        return Err("Candidate name is required".to_string());
    }

    if candidate_name.trim() != candidate_name {
        return Err("Candidate name must not start or end with whitespace".to_string());
    }

    if candidate_name.chars().count() > 255 {
        return Err("Candidate name must be at most 255 characters long".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last+tag@farm.example.et").is_ok());
        assert_eq!(validate_email(""), Err("Email is required".to_string()));
        assert_eq!(
            validate_email("not-an-email"),
            Err("Invalid email format".to_string())
        );
        assert!(validate_email(&format!("{}@x.com", "a".repeat(250))).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("p1").is_ok());
        assert!(validate_password("").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name(None).is_ok());
        assert!(validate_name(Some("Almaz Tesfaye")).is_ok());
        assert!(validate_name(Some("   ")).is_err());
        assert!(validate_name(Some("n".repeat(101).as_str())).is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone(None).is_ok());
        assert!(validate_phone(Some("+251912345678")).is_ok());
        assert!(validate_phone(Some("0912 345 678")).is_ok());
        assert!(validate_phone(Some("call me")).is_err());
        assert!(validate_phone(Some("12")).is_err());
    }

    #[test]
    fn test_validate_candidate_name() {
        assert!(validate_candidate_name("Bob").is_ok());
        assert!(validate_candidate_name("").is_err());
        assert!(validate_candidate_name(" \t").is_err());
        assert!(validate_candidate_name(" Bob").is_err());
        assert!(validate_candidate_name("Bob\n").is_err());
        assert!(validate_candidate_name("Bob Smith").is_ok());
        assert!(validate_candidate_name(&"b".repeat(256)).is_err());
    }
}
