//! Path splitting and canonicalization.
//!
//! Paths are kept as lists of decoded, non-empty segments. `.` segments are
//! dropped and each `..` removes itself along with the segment before it.
//! Unlike Unix, a `..` with nothing before it is an error rather than a
//! reference to the root.

use crate::encoding::urldecode;
use crate::error::{DecodeError, PathError};

/// Splits an encoded path on `/`, decoding each segment.
///
/// Empty segments (leading, trailing, or repeated slashes) and segments that
/// decode to `.` are dropped. `..` is kept for [`canonicalize`].
pub(crate) fn split_encoded(path: &str) -> Result<Vec<String>, DecodeError> {
    let mut segments = Vec::new();
    for raw in path.split('/').filter(|s| !s.is_empty()) {
        let segment = urldecode(raw, false)?;
        if segment != "." {
            segments.push(segment);
        }
    }
    Ok(segments)
}

/// Splits an already decoded path on `/`, dropping empty and `.` segments.
pub(crate) fn split_decoded(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

/// Removes `.` segments and resolves `..` against the preceding segment.
///
/// # Errors
///
/// Returns `PathError::LeadingParent` when a `..` has no segment to its
/// left.
pub(crate) fn canonicalize(mut segments: Vec<String>) -> Result<Vec<String>, PathError> {
    segments.retain(|s| s != ".");

    let mut i = 0;
    while i < segments.len() {
        if segments[i] == ".." {
            if i == 0 || segments.len() < 2 {
                return Err(PathError::LeadingParent);
            }
            segments.drain(i - 1..=i);
            i -= 1;
        } else {
            i += 1;
        }
    }

    Ok(segments)
}
