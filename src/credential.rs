//! Credential data model for rows exported from a password manager.
//!
//! A [`Login`] is one raw row as loaded from the export. The engine derives a
//! [`CredentialRecord`] from each login, attaching the normalized grouping
//! domain and the password check outcome. Records are immutable once derived.
use std::fmt;

use crate::domain::normalize;
use crate::password::validate;

/// One raw row of the export after the sentinel row has been dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Login {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl Login {
    pub fn new(url: &str, username: &str, password: &str) -> Self {
        Self {
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Why a password failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidReason {
    Blank,
    TooShort,
    SameCharacter,
}

impl InvalidReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::Blank => "Password is blank",
            InvalidReason::TooShort => "Password is too short",
            InvalidReason::SameCharacter => "Password is all the same character",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`crate::password::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Valid,
    Invalid(InvalidReason),
}

impl PasswordCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, PasswordCheck::Valid)
    }

    /// Reason text; empty for a valid password.
    pub fn reason(&self) -> &'static str {
        match self {
            PasswordCheck::Valid => "",
            PasswordCheck::Invalid(r) => r.as_str(),
        }
    }
}

/// A login together with the values derived from it for auditing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub login: Login,
    pub normalized_domain: String,
    pub password_check: PasswordCheck,
}

impl CredentialRecord {
    /// Derive the grouping domain and password check for `login`.
    pub fn from_login(login: Login) -> Self {
        let normalized_domain = normalize(&login.url);
        let password_check = validate(Some(&login.password));
        Self {
            login,
            normalized_domain,
            password_check,
        }
    }

    pub fn url(&self) -> &str {
        &self.login.url
    }

    pub fn username(&self) -> &str {
        &self.login.username
    }

    pub fn password(&self) -> &str {
        &self.login.password
    }

    /// True when the username is empty after trimming whitespace.
    pub fn has_blank_username(&self) -> bool {
        self.login.username.trim().is_empty()
    }
}
