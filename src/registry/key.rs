//! Target key derivation.

use thiserror::Error;
use url::{Host, Url};

/// Errors raised while deriving a key from a target URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The URL could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The URL has no host component.
    #[error("URL '{0}' has no host")]
    MissingHost(String),
}

/// Derive the stable key of a URL target: the leftmost DNS label of its host.
///
/// `https://api.example.com/health` → `api`. IP hosts are returned whole,
/// in the same form as [`target_domain`] (IPv6 in brackets).
pub fn target_key(url: &str) -> Result<String, KeyError> {
    let parsed = parse(url)?;
    match parsed.host() {
        Some(Host::Domain(domain)) => {
            let label = domain.split('.').next().unwrap_or(domain);
            if label.is_empty() {
                return Err(KeyError::MissingHost(url.to_string()));
            }
            Ok(label.to_string())
        }
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => host(&parsed, url),
        None => Err(KeyError::MissingHost(url.to_string())),
    }
}

/// The full host of a URL target, used as the `domain` of ingestion records.
pub fn target_domain(url: &str) -> Result<String, KeyError> {
    host(&parse(url)?, url)
}

fn host(parsed: &Url, url: &str) -> Result<String, KeyError> {
    parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .ok_or_else(|| KeyError::MissingHost(url.to_string()))
}

fn parse(url: &str) -> Result<Url, KeyError> {
    Url::parse(url).map_err(|e| KeyError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
