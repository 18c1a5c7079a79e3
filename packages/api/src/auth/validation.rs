//! Sign-in form validation.
//!
//! Runs in the browser before any request is made, and again on the server before the
//! credentials check.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Form field a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// First problem found in the sign-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFormError {
    EmptyEmail,
    InvalidEmail,
    EmptyPassword,
}

impl LoginFormError {
    pub fn field(self) -> LoginField {
        match self {
            LoginFormError::EmptyEmail | LoginFormError::InvalidEmail => LoginField::Email,
            LoginFormError::EmptyPassword => LoginField::Password,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            LoginFormError::EmptyEmail => "Please enter your email.",
            LoginFormError::InvalidEmail => "Please enter a valid email address.",
            LoginFormError::EmptyPassword => "Please enter your password.",
        }
    }
}

impl fmt::Display for LoginFormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for LoginFormError {}

/// Loose shape check: something@something.tld with no whitespace.
pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Validate the sign-in form, stopping at the first failing field.
///
/// The email is checked for blankness after trimming but matched against the pattern
/// as typed, so surrounding spaces are reported as an invalid address. The password is
/// never trimmed.
pub fn validate_login_form(email: &str, password: &str) -> Result<(), LoginFormError> {
    if email.trim().is_empty() {
        return Err(LoginFormError::EmptyEmail);
    }
    if !validate_email(email) {
        return Err(LoginFormError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(LoginFormError::EmptyPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_input() {
        assert_eq!(validate_login_form("test@gmail.com", "password"), Ok(()));
        assert_eq!(validate_login_form("a.b+c@sub.example.org", " "), Ok(()));
    }

    #[test]
    fn empty_or_blank_email_is_reported_first() {
        assert_eq!(
            validate_login_form("", ""),
            Err(LoginFormError::EmptyEmail)
        );
        assert_eq!(
            validate_login_form("   ", "password"),
            Err(LoginFormError::EmptyEmail)
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in [
            "plainaddress",
            "missing-at.example.com",
            "user@nodot",
            "user@@example.com",
            "user name@example.com",
            " test@gmail.com",
        ] {
            assert_eq!(
                validate_login_form(email, "password"),
                Err(LoginFormError::InvalidEmail),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_password_is_rejected_after_email_checks() {
        assert_eq!(
            validate_login_form("test@gmail.com", ""),
            Err(LoginFormError::EmptyPassword)
        );
        assert_eq!(
            validate_login_form("nope", ""),
            Err(LoginFormError::InvalidEmail)
        );
    }

    #[test]
    fn errors_point_at_their_field() {
        assert_eq!(LoginFormError::EmptyEmail.field(), LoginField::Email);
        assert_eq!(LoginFormError::InvalidEmail.field(), LoginField::Email);
        assert_eq!(LoginFormError::EmptyPassword.field(), LoginField::Password);
        assert_eq!(
            LoginFormError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
    }
}
