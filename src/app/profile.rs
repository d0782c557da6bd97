// SPDX-License-Identifier: GPL-3.0-only

//! User profile entered on the home screen

use crate::errors::ProfileError;
use regex::Regex;
use std::sync::LazyLock;
use tracing::info;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Check that `email` looks like `local@domain.tld`
///
/// Format only; no DNS or deliverability checks.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Email of the current user, set once per session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserProfile {
    email: Option<String>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store the email
    pub fn set_email(&mut self, email: &str) -> Result<(), ProfileError> {
        if self.email.is_some() {
            return Err(ProfileError::AlreadySet);
        }
        if !is_valid_email(email) {
            return Err(ProfileError::InvalidEmail(email.to_string()));
        }

        info!("User email set");
        self.email = Some(email.to_string());
        Ok(())
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
