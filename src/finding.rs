//! Audit results handed from the engine to the renderer.
use crate::credential::{CredentialRecord, InvalidReason};

/// A record whose password failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPassword {
    pub record: CredentialRecord,
    pub reason: InvalidReason,
}

/// Records sharing one normalized domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub domain: String,
    pub records: Vec<CredentialRecord>,
}

impl DuplicateGroup {
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Every record with an empty username, in input order.
    BlankUsernames(Vec<CredentialRecord>),
    /// Every record with an invalid password, sorted by reason, domain, username.
    InvalidPasswords(Vec<InvalidPassword>),
    /// One domain shared by two or more records.
    DuplicateDomain(DuplicateGroup),
}

impl Finding {
    /// Number of rows this finding contributes.
    pub fn len(&self) -> usize {
        match self {
            Finding::BlankUsernames(v) => v.len(),
            Finding::InvalidPasswords(v) => v.len(),
            Finding::DuplicateDomain(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short machine-readable label, used by the CSV export.
    pub fn kind(&self) -> &'static str {
        match self {
            Finding::BlankUsernames(_) => "blank_username",
            Finding::InvalidPasswords(_) => "invalid_password",
            Finding::DuplicateDomain(_) => "duplicate_domain",
        }
    }
}
