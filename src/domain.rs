//! Breaking a domain name into sub-domains, domain, and top-level domain.
//!
//! The top-level domain is located with the Public Suffix List. When that
//! fails, the text may still be accepted as an IPv4 or IPv6 literal.

use std::net::{IpAddr, Ipv6Addr};

use psl::{List, Psl};

use crate::encoding::urldecode;
use crate::error::DomainError;

/// The three parts of a full domain name, all percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DomainParts {
    /// Outermost first
    pub sub_domains: Vec<String>,
    pub domain: String,
    /// Includes the leading `.`, empty for IP literals
    pub top_level_domain: String,
}

/// Splits a raw (still percent-encoded) domain name.
///
/// With `accept_ip`, text without a known top-level domain may instead be a
/// single IP address, which is returned in canonical form as the domain with
/// no sub-domains and no top-level domain.
pub(crate) fn split_domain(raw: &str, accept_ip: bool) -> Result<DomainParts, DomainError> {
    if let Some(dot) = find_top_level_domain(raw) {
        return split_at_top_level_domain(raw, dot);
    }

    if let Some(literal) = accept_ip.then(|| parse_ip_literal(raw)).flatten() {
        log::trace!("accepted {raw:?} as IP literal {literal}");
        return Ok(DomainParts {
            sub_domains: Vec::new(),
            domain: literal,
            top_level_domain: String::new(),
        });
    }

    Err(DomainError::Unverified {
        domain: raw.to_string(),
    })
}

/// Returns the position of the `.` that starts the top-level domain.
///
/// Only suffixes listed in the Public Suffix List count, and at least one
/// character must precede that `.`.
fn find_top_level_domain(raw: &str) -> Option<usize> {
    if raw.is_empty() || raw.ends_with('.') {
        return None;
    }

    // the list only holds lowercase names; lowering ASCII keeps offsets
    let lowered = raw.to_ascii_lowercase();
    let suffix = List.suffix(lowered.as_bytes()).filter(|s| s.is_known())?;
    let dot = raw.len().checked_sub(suffix.as_bytes().len() + 1)?;

    (dot > 0 && raw.as_bytes()[dot] == b'.').then_some(dot)
}

fn split_at_top_level_domain(raw: &str, dot: usize) -> Result<DomainParts, DomainError> {
    let start = raw[..dot].rfind('.').map_or(0, |i| i + 1);
    let domain_raw = &raw[start..dot];
    if domain_raw.is_empty() {
        return Err(DomainError::Unverified {
            domain: raw.to_string(),
        });
    }

    let mut sub_domains = Vec::new();
    if start > 0 {
        for label in raw[..start - 1].split('.') {
            let decoded = urldecode(label, false).map_err(DomainError::InvalidEncoding)?;
            if decoded.is_empty() {
                return Err(DomainError::EmptySubDomain {
                    domain: raw.to_string(),
                });
            }
            sub_domains.push(decoded);
        }
    }

    Ok(DomainParts {
        sub_domains,
        domain: urldecode(domain_raw, false).map_err(DomainError::InvalidEncoding)?,
        top_level_domain: urldecode(&raw[dot..], false).map_err(DomainError::InvalidEncoding)?,
    })
}

/// Parses exactly one address, no port and no range, into its canonical
/// text. IPv6 addresses are bracketed.
fn parse_ip_literal(raw: &str) -> Option<String> {
    if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return inner.parse::<Ipv6Addr>().ok().map(|ip| format!("[{ip}]"));
    }

    match raw.parse::<IpAddr>().ok()? {
        IpAddr::V4(ip) => Some(ip.to_string()),
        IpAddr::V6(ip) => Some(format!("[{ip}]")),
    }
}
