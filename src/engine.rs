//! Engine: loads an export, derives per-record values, and runs the three
//! hygiene checks (blank usernames, invalid passwords, duplicate domains).
//!
//! Typical usage:
//!
//! ```no_run
//! use lockwise::engine::Engine;
//! # fn main() -> anyhow::Result<()> {
//! let mut engine = Engine::new();
//! engine.load_from_file_path("/path/to/logins.csv")?;
//! if let Some(report) = lockwise::report::render_report(&engine.audit()) {
//!     println!("{}", report);
//! }
//! # Ok(())
//! # }
//! ```
use std::collections::BTreeMap;
use std::path::Path;

use crate::credential::{CredentialRecord, Login, PasswordCheck};
use crate::finding::{DuplicateGroup, Finding, InvalidPassword};
use crate::io::{LoadError, LoadStats, load_logins, parse_logins};

/// Knobs for [`audit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditOptions {
    /// Group records whose URL could not be normalized under the empty key.
    pub group_unparsed_domains: bool,
}

impl Default for AuditOptions {
    fn default() -> Self {
        Self {
            group_unparsed_domains: true,
        }
    }
}

/// Holds the loaded logins and the options used to audit them.
#[derive(Debug, Default)]
pub struct Engine {
    pub logins: Vec<Login>,
    pub options: AuditOptions,
    pub load_stats: Option<LoadStats>,
}

impl Engine {
    /// Create an empty engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AuditOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Load export contents already in memory. Intended for tests.
    pub fn load_from_str(&mut self, contents: &str) -> Result<(), LoadError> {
        let (logins, stats) = parse_logins(contents.as_bytes())?;
        self.logins = logins;
        self.load_stats = Some(stats);
        Ok(())
    }

    pub fn load_from_file_path<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let (logins, stats) = load_logins(path)?;
        self.logins = logins;
        self.load_stats = Some(stats);
        Ok(())
    }

    pub fn audit(&self) -> Vec<Finding> {
        audit(&self.logins, &self.options)
    }
}

fn blank_usernames(records: &[CredentialRecord]) -> Option<Finding> {
    let blank: Vec<CredentialRecord> = records
        .iter()
        .filter(|r| r.has_blank_username())
        .cloned()
        .collect();
    (!blank.is_empty()).then_some(Finding::BlankUsernames(blank))
}

fn invalid_passwords(records: &[CredentialRecord]) -> Option<Finding> {
    let mut invalid: Vec<InvalidPassword> = records
        .iter()
        .filter_map(|r| match r.password_check {
            PasswordCheck::Valid => None,
            PasswordCheck::Invalid(reason) => Some(InvalidPassword {
                record: r.clone(),
                reason,
            }),
        })
        .collect();
    if invalid.is_empty() {
        return None;
    }
    invalid.sort_by(|a, b| {
        (a.reason.as_str(), &a.record.normalized_domain, a.record.username()).cmp(&(
            b.reason.as_str(),
            &b.record.normalized_domain,
            b.record.username(),
        ))
    });
    Some(Finding::InvalidPasswords(invalid))
}

fn duplicate_domains(records: &[CredentialRecord], options: &AuditOptions) -> Vec<Finding> {
    let mut groups: BTreeMap<&str, Vec<CredentialRecord>> = BTreeMap::new();
    for r in records {
        if r.normalized_domain.is_empty() && !options.group_unparsed_domains {
            continue;
        }
        groups
            .entry(r.normalized_domain.as_str())
            .or_default()
            .push(r.clone());
    }
    groups
        .into_iter()
        .filter(|(_, recs)| recs.len() > 1)
        .map(|(domain, records)| {
            Finding::DuplicateDomain(DuplicateGroup {
                domain: domain.to_string(),
                records,
            })
        })
        .collect()
}

/// Run every check over `logins`.
///
/// Findings come out as blank usernames, then invalid passwords, then one
/// duplicate group per shared domain in ascending domain order. Empty input
/// yields no findings.
pub fn audit(logins: &[Login], options: &AuditOptions) -> Vec<Finding> {
    let records: Vec<CredentialRecord> = logins
        .iter()
        .cloned()
        .map(CredentialRecord::from_login)
        .collect();

    let mut findings = Vec::new();
    findings.extend(blank_usernames(&records));
    findings.extend(invalid_passwords(&records));
    findings.extend(duplicate_domains(&records, options));
    log::debug!(
        "audited {} records, {} findings",
        records.len(),
        findings.len()
    );
    findings
}
