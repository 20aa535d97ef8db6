//! Form Validation
//!
//! Client-side checks run before any request. First failure wins.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 8;

fn email_shape() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_shape().is_match(email)
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if blank(email) {
        return Err(ValidationError::EmailRequired);
    }
    if blank(password) {
        return Err(ValidationError::PasswordRequired);
    }
    Ok(())
}

/// Sign-up form, checked top to bottom
pub fn validate_signup(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), ValidationError> {
    if blank(first_name) {
        return Err(ValidationError::FirstNameRequired);
    }
    if blank(last_name) {
        return Err(ValidationError::LastNameRequired);
    }
    if blank(email) {
        return Err(ValidationError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_reset_request(email: &str) -> Result<(), ValidationError> {
    if blank(email) {
        return Err(ValidationError::ResetEmailRequired);
    }
    Ok(())
}

pub fn validate_reset_confirm(otp: &str, password: &str, confirm: &str) -> Result<(), ValidationError> {
    if blank(otp) || password.is_empty() || confirm.is_empty() {
        return Err(ValidationError::ResetFieldsRequired);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::ResetPasswordTooShort);
    }
    Ok(())
}

pub fn validate_task_title(title: &str) -> Result<(), ValidationError> {
    if blank(title) {
        return Err(ValidationError::TaskTitleRequired);
    }
    Ok(())
}

pub fn validate_note(title: &str, content: &str) -> Result<(), ValidationError> {
    if blank(title) && blank(content) {
        return Err(ValidationError::NoteEmpty);
    }
    Ok(())
}

pub fn validate_upload<F>(file: Option<&F>) -> Result<&F, ValidationError> {
    file.ok_or(ValidationError::NoFileSelected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada.example.com"));
        assert!(!is_valid_email("@."));
    }

    #[test]
    fn test_login_trims() {
        assert_eq!(validate_login("  ", "x"), Err(ValidationError::EmailRequired));
        assert_eq!(validate_login("a@b.c", " "), Err(ValidationError::PasswordRequired));
        assert_eq!(validate_login("a@b.c", "pw"), Ok(()));
    }

    #[test]
    fn test_signup_order() {
        assert_eq!(
            validate_signup("", "", "", "").unwrap_err().to_string(),
            "First name is required"
        );
        assert_eq!(
            validate_signup("Ada", "", "", "").unwrap_err().to_string(),
            "Last name is required"
        );
        assert_eq!(
            validate_signup("Ada", "L", "", "").unwrap_err().to_string(),
            "Email is required"
        );
        assert_eq!(
            validate_signup("Ada", "L", "nope", "").unwrap_err().to_string(),
            "Please enter a valid email address"
        );
        assert_eq!(
            validate_signup("Ada", "L", "a@b.co", "").unwrap_err().to_string(),
            "Password is required"
        );
    }

    #[test]
    fn test_signup_password_length_untrimmed() {
        assert_eq!(
            validate_signup("Ada", "L", "a@b.co", "1234567").unwrap_err().to_string(),
            "Password must be at least 8 characters long"
        );
        assert_eq!(validate_signup("Ada", "L", "a@b.co", "1234567 "), Ok(()));
    }

    #[test]
    fn test_reset_confirm() {
        assert_eq!(
            validate_reset_confirm("", "a", "a").unwrap_err().to_string(),
            "All fields are required."
        );
        assert_eq!(
            validate_reset_confirm("123456", "abcdefgh", "abcdefgx").unwrap_err().to_string(),
            "Passwords do not match."
        );
        assert_eq!(
            validate_reset_confirm("123456", "short", "short").unwrap_err().to_string(),
            "Password must be at least 8 characters."
        );
        assert_eq!(validate_reset_confirm("123456", "longenough", "longenough"), Ok(()));
    }

    #[test]
    fn test_note_needs_title_or_content() {
        assert_eq!(validate_note(" ", "\n"), Err(ValidationError::NoteEmpty));
        assert_eq!(validate_note("", "body"), Ok(()));
    }

    #[test]
    fn test_upload_requires_file() {
        assert_eq!(validate_upload::<u8>(None), Err(ValidationError::NoFileSelected));
        assert_eq!(validate_upload(Some(&1u8)), Ok(&1u8));
    }
}
