use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Message shown when the email field holds an invalid address.
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Whether the trimmed value looks like an email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(value.trim()))
}

/// Sign-in form state. Credentials are not verified, only their shape.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    /// Email as typed.
    pub email: String,
    /// Password as typed.
    pub password: String,
}

impl SignInForm {
    /// Form holding the given credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Validation message for the email field. Empty input is not an error yet.
    #[must_use]
    pub fn email_error(&self) -> Option<&'static str> {
        let email = self.email.trim();
        (!email.is_empty() && !is_valid_email(email)).then_some(INVALID_EMAIL_MESSAGE)
    }

    /// Whether the form may be submitted.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        let email = self.email.trim();
        !email.is_empty() && !self.password.is_empty() && is_valid_email(email)
    }
}
