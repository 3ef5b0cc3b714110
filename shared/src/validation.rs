//! Input validation functions
//!
//! Validation utilities for user-supplied input, shared between the
//! backend and its clients. These helpers cover the checks that need
//! custom messages.

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password policy
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a ticket quantity for an order
pub fn validate_quantity(quantity: i32) -> Result<(), String> {
    if quantity < 1 {
        return Err("Quantity must be at least 1".to_string());
    }
    if quantity > 50 {
        return Err("Quantity exceeds the per-order limit of 50".to_string());
    }
    Ok(())
}

/// Validate an event title
pub fn validate_event_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.len() > 255 {
        return Err("Title too long".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@x.com", true)]
    #[case("first.last@sub.domain.org", true)]
    #[case("", false)]
    #[case("not-an-email", false)]
    #[case("missing@tld", false)]
    #[case("spaces in@mail.com", false)]
    fn test_validate_email(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(validate_email(email).is_ok(), ok);
    }

    #[rstest]
    #[case("pw123456", true)]
    #[case("", false)]
    #[case("short", false)]
    fn test_validate_password(#[case] password: &str, #[case] ok: bool) {
        assert_eq!(validate_password(password).is_ok(), ok);
    }

    #[test]
    fn test_validate_password_rejects_oversized() {
        let long = "x".repeat(129);
        assert!(validate_password(&long).is_err());
    }

    #[rstest]
    #[case(1, true)]
    #[case(50, true)]
    #[case(0, false)]
    #[case(-3, false)]
    #[case(51, false)]
    fn test_validate_quantity(#[case] quantity: i32, #[case] ok: bool) {
        assert_eq!(validate_quantity(quantity).is_ok(), ok);
    }

    #[test]
    fn test_validate_event_title() {
        assert!(validate_event_title("Rust Meetup").is_ok());
        assert!(validate_event_title("   ").is_err());
        assert!(validate_event_title(&"t".repeat(256)).is_err());
    }

    proptest! {
        #[test]
        fn prop_validators_never_panic(input in "\\PC*") {
            let _ = validate_email(&input);
            let _ = validate_password(&input);
            let _ = validate_event_title(&input);
        }

        #[test]
        fn prop_short_passwords_rejected(password in "[a-zA-Z0-9]{0,7}") {
            prop_assert!(validate_password(&password).is_err());
        }

        #[test]
        fn prop_simple_emails_accepted(
            local in "[a-z][a-z0-9]{0,15}",
            domain in "[a-z][a-z0-9]{0,10}",
            tld in "[a-z]{2,6}",
        ) {
            let email = format!("{}@{}.{}", local, domain, tld);
            prop_assert!(validate_email(&email).is_ok());
        }
    }
}
