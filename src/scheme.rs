//! Scheme to default port mapping.

use std::fs;

use crate::constants::{SERVICES_DB_PATH, WELL_KNOWN_PORTS};

/// Returns the default port of `scheme`.
///
/// Common schemes are answered from a built-in table. Others are looked up
/// by name or alias in the system services database, TCP entries first and
/// UDP entries second. `None` means the scheme has no implied port, so a
/// serialized URI always shows its port.
///
/// # Examples
///
/// ```
/// use edhttp_uri::scheme_to_port;
///
/// assert_eq!(scheme_to_port("https"), Some(443));
/// assert_eq!(scheme_to_port("gopher"), Some(70));
/// assert_eq!(scheme_to_port("no-such-scheme-here"), None);
/// ```
#[must_use]
pub fn scheme_to_port(scheme: &str) -> Option<u16> {
    if let Some(&(_, port)) = WELL_KNOWN_PORTS.iter().find(|(name, _)| *name == scheme) {
        return Some(port);
    }

    let services = fs::read_to_string(SERVICES_DB_PATH)
        .inspect_err(|e| log::trace!("cannot read {SERVICES_DB_PATH}: {e}"))
        .ok()?;
    let port = find_service_port(&services, scheme, "tcp")
        .or_else(|| find_service_port(&services, scheme, "udp"));
    log::trace!("services lookup for {scheme:?} gave {port:?}");
    port
}

/// Searches a services database (`name port/protocol [aliases...]` lines)
/// for `name` under `protocol`.
pub(crate) fn find_service_port(services: &str, name: &str, protocol: &str) -> Option<u16> {
    if name.is_empty() {
        return None;
    }

    services.lines().find_map(|line| {
        let line = line.split('#').next().unwrap_or_default();
        let mut fields = line.split_whitespace();
        let service = fields.next()?;
        let (port, proto) = fields.next()?.split_once('/')?;
        if proto != protocol {
            return None;
        }
        if service == name || fields.any(|alias| alias == name) {
            port.parse().ok()
        } else {
            None
        }
    })
}
