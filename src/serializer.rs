//! Canonical string form of a [`Uri`].

use std::fmt::Write;

use crate::constants::{ANCHOR_ALLOWED, PATH_SEGMENT_ALLOWED};
use crate::encoding::urlencode;
use crate::error::UriError;
use crate::uri::Uri;

/// Builds the canonical string of `uri`.
///
/// In hash-bang mode the hash-bang path is written after the query string
/// as `#!/path`, which cannot be combined with an anchor. A URI without a
/// hash-bang path moves its main path there instead.
///
/// # Errors
///
/// Returns `UriError::ExclusiveParameters` when `use_hash_bang` is set and
/// the anchor is not empty.
pub(crate) fn to_uri_string(
    uri: &Uri,
    use_hash_bang: bool,
    redact_password: Option<&str>,
) -> Result<String, UriError> {
    if use_hash_bang && !uri.anchor().is_empty() {
        return Err(UriError::ExclusiveParameters);
    }
    Ok(build(uri, use_hash_bang, redact_password))
}

/// Builds the canonical string of `uri` without hash-bang, which never
/// fails.
pub(crate) fn canonical(uri: &Uri) -> String {
    build(uri, false, None)
}

/// Builds `scheme://full-domain[:port]/`.
pub(crate) fn website_uri(uri: &Uri, include_port: bool) -> String {
    let mut out = format!("{}://{}", uri.scheme(), uri.full_domain());
    if include_port {
        write_port(&mut out, uri);
    }
    out.push('/');
    out
}

fn build(uri: &Uri, use_hash_bang: bool, redact_password: Option<&str>) -> String {
    let mut out = String::with_capacity(64);
    out.push_str(uri.scheme());
    out.push_str("://");

    if !uri.username().is_empty() {
        out.push_str(&urlencode(uri.username(), ""));
        if !uri.password().is_empty() {
            out.push(':');
            out.push_str(&urlencode(redact_password.unwrap_or(uri.password()), ""));
        }
        out.push('@');
    }

    if uri.is_ip_literal() {
        out.push_str(uri.domain());
    } else {
        out.push_str(&urlencode(uri.full_domain(), ""));
    }
    if !uri.domain().is_empty() {
        write_port(&mut out, uri);
    }
    out.push('/');

    let moves_path = use_hash_bang && uri.hash_bang_path().is_empty();
    let path = uri.path(true);
    if !moves_path {
        out.push_str(&path);
    }

    if !uri.query_strings().is_empty() {
        out.push('?');
        // writing into a String cannot fail
        let _ = write!(out, "{}", uri.query_strings());
    }

    if use_hash_bang {
        let hash_bang = if moves_path {
            path
        } else {
            encode_segments(uri.hash_bang_path())
        };
        if !hash_bang.is_empty() {
            out.push_str("#!/");
            out.push_str(&hash_bang);
        }
    } else if !uri.anchor().is_empty() {
        out.push('#');
        out.push_str(&urlencode(uri.anchor(), ANCHOR_ALLOWED));
    }

    out
}

/// Encodes each segment and joins them with `/`.
pub(crate) fn encode_segments(segments: &[String]) -> String {
    segments
        .iter()
        .map(|segment| urlencode(segment, PATH_SEGMENT_ALLOWED))
        .collect::<Vec<_>>()
        .join("/")
}

/// Appends `:port` unless the scheme implies that port.
fn write_port(out: &mut String, uri: &Uri) {
    if uri.scheme_port() != Some(uri.port()) {
        let _ = write!(out, ":{}", uri.port());
    }
}
