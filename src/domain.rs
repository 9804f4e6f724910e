//! Reduce a stored site URL to the key used for duplicate grouping.
use std::sync::LazyLock;

use log::warn;
use regex::Regex;

// Trailing `word.tld` token, e.g. `example.com` out of `https://mail.example.com`.
static HOST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*?(\w+\.\w{2,})$").expect("valid host regex"));

static IPV4_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3})")
        .expect("valid ipv4 regex")
});

/// Normalize `url` into a grouping key.
///
/// The trailing hostname token is tried first and lowercased; a leading
/// dotted-quad address is tried second and returned as written. When neither
/// matches a warning is logged and the empty string is returned.
pub fn normalize(url: &str) -> String {
    if let Some(host) = HOST_RE.captures(url).and_then(|c| c.get(1)) {
        return host.as_str().to_lowercase();
    }
    if let Some(ip) = IPV4_RE.captures(url).and_then(|c| c.get(1)) {
        return ip.as_str().to_string();
    }
    warn!("unable to parse domain for url {:?}", url);
    String::new()
}
