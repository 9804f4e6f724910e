//! Locating and reading the password export.
//!
//! [`find_latest`] picks the newest matching CSV across a set of directories
//! and [`load_logins`] parses it into [`Login`] rows, dropping the sync-service
//! bookkeeping row.
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{debug, info};
use serde::Deserialize;

use crate::credential::Login;

/// File-name fragment searched for when none is given.
pub const DEFAULT_FRAGMENT: &str = "logins";

/// Extension of the export file.
pub const EXPORT_EXTENSION: &str = "csv";

/// Pseudo-URL Firefox writes for its account-sync entry. Not a site.
pub const SENTINEL_URL: &str = "chrome://FirefoxAccounts";

const REQUIRED_COLUMNS: [&str; 3] = ["url", "username", "password"];

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no '*{fragment}*.csv' export found in: {searched}")]
    NoCandidate { fragment: String, searched: String },
    #[error("open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed export: {0}")]
    Csv(#[from] csv::Error),
    #[error("export is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("malformed export: line {line} has {found} fields, header has {expected}")]
    ExtraFields {
        line: u64,
        found: usize,
        expected: usize,
    },
}

/// Counts gathered while loading an export.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub sentinel_skipped: usize,
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Default search directories: the working directory, then the user's
/// download and desktop directories when they can be resolved.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs_out = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs_out.push(cwd);
    }
    dirs_out.extend(dirs::download_dir());
    dirs_out.extend(dirs::desktop_dir());
    dirs_out
}

fn is_candidate(path: &Path, fragment: &str) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e == EXPORT_EXTENSION);
    ext_ok && name.contains(fragment) && path.is_file()
}

/// Return the most recently modified `*{fragment}*.csv` across `search_dirs`.
///
/// Every directory is scanned; missing or unreadable ones are skipped. Files
/// reachable through more than one directory count once. Equal modification
/// times resolve to the greatest path.
pub fn find_latest<P: AsRef<Path>>(fragment: &str, search_dirs: &[P]) -> Option<PathBuf> {
    let mut candidates: BTreeSet<PathBuf> = BTreeSet::new();
    for dir in search_dirs {
        let dir = dir.as_ref();
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                debug!("skipping search dir {}: {}", dir.display(), e);
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if is_candidate(&path, fragment) {
                let path = path.canonicalize().unwrap_or(path);
                candidates.insert(path);
            }
        }
    }
    candidates
        .into_iter()
        .map(|p| {
            let mtime = std::fs::metadata(&p)
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (mtime, p)
        })
        .max()
        .map(|(_, p)| p)
}

/// Like [`find_latest`] but reports the directories searched on failure.
pub fn locate_export<P: AsRef<Path>>(
    fragment: &str,
    search_dirs: &[P],
) -> Result<PathBuf, LoadError> {
    find_latest(fragment, search_dirs).ok_or_else(|| LoadError::NoCandidate {
        fragment: fragment.to_string(),
        searched: search_dirs
            .iter()
            .map(|d| d.as_ref().display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Parse export contents from any reader.
///
/// Short rows are accepted and their absent cells read as empty. Rows with
/// more fields than the header are rejected.
pub fn parse_logins<R: Read>(reader: R) -> Result<(Vec<Login>, LoadStats), LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(LoadError::MissingColumn(col));
        }
    }

    let mut stats = LoadStats::default();
    let mut logins = Vec::new();
    for record in rdr.records() {
        let mut record = record?;
        if record.len() > headers.len() {
            return Err(LoadError::ExtraFields {
                line: record.position().map_or(0, |p| p.line()),
                found: record.len(),
                expected: headers.len(),
            });
        }
        while record.len() < headers.len() {
            record.push_field("");
        }
        let row: Row = record.deserialize(Some(&headers))?;
        stats.rows += 1;
        let url = row.url.unwrap_or_default();
        if url == SENTINEL_URL {
            stats.sentinel_skipped += 1;
            continue;
        }
        logins.push(Login {
            url,
            username: row.username.unwrap_or_default(),
            password: row.password.unwrap_or_default(),
        });
    }
    Ok((logins, stats))
}

/// Open and parse the export at `path`.
pub fn load_logins<P: AsRef<Path>>(path: P) -> Result<(Vec<Login>, LoadStats), LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let (logins, stats) = parse_logins(file)?;
    info!(
        "loaded {} rows from {} ({} sync rows skipped)",
        stats.rows,
        path.display(),
        stats.sentinel_skipped
    );
    Ok((logins, stats))
}
