//! Export helpers for writing results to disk.
//!
//! - `persist_report` writes the rendered report, replacing any existing file.
//! - `save_findings_csv` writes one row per reported record for spreadsheets.
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::finding::Finding;

pub fn persist_report<P: AsRef<Path>>(text: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    f.write_all(text.as_bytes())
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn save_findings_csv<P: AsRef<Path>>(findings: &[Finding], path: P) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(["Check", "Domain", "Url", "Username", "Reason", "Count"])?;
    for f in findings {
        match f {
            Finding::BlankUsernames(records) => {
                for r in records {
                    wtr.write_record([
                        f.kind(),
                        r.normalized_domain.as_str(),
                        r.url(),
                        r.username(),
                        "",
                        "",
                    ])?;
                }
            }
            Finding::InvalidPasswords(items) => {
                for i in items {
                    wtr.write_record([
                        f.kind(),
                        i.record.normalized_domain.as_str(),
                        i.record.url(),
                        i.record.username(),
                        i.reason.as_str(),
                        "",
                    ])?;
                }
            }
            Finding::DuplicateDomain(group) => {
                let count = group.count().to_string();
                for r in &group.records {
                    wtr.write_record([
                        f.kind(),
                        group.domain.as_str(),
                        r.url(),
                        r.username(),
                        "",
                        count.as_str(),
                    ])?;
                }
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Login;
    use crate::engine::{AuditOptions, audit};
    use tempfile::tempdir;

    #[test]
    fn persist_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("report.txt");
        std::fs::write(&p, "old contents that are longer").unwrap();
        persist_report("new", &p).unwrap();
        assert_eq!(std::fs::read_to_string(&p).unwrap(), "new");
    }

    #[test]
    fn writes_findings_csv() {
        let logins = vec![
            Login::new("https://a.example.com", "", "hunter2222"),
            Login::new("https://b.example.com", "bob", ""),
        ];
        let findings = audit(&logins, &AuditOptions::default());
        let dir = tempdir().unwrap();
        let p = dir.path().join("findings.csv");
        save_findings_csv(&findings, &p).unwrap();
        let content = std::fs::read_to_string(p).unwrap();
        assert!(content.starts_with("Check,Domain,Url,Username,Reason,Count\n"));
        assert!(content.contains("blank_username,example.com,https://a.example.com,,,"));
        assert!(content.contains("invalid_password,example.com,https://b.example.com,bob,Password is blank,"));
        assert!(content.contains("duplicate_domain,example.com,https://b.example.com,bob,,2"));
        assert!(!content.contains("hunter2222"));
    }
}
