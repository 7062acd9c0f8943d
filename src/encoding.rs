//! Percent-encoding and decoding of URI components.
//!
//! Encoding works on raw bytes: a multi-byte UTF-8 character becomes one
//! `%XX` triplet per byte. Decoding reverses that and, in strict mode,
//! refuses characters that should have been escaped.

use crate::constants::LEGACY_DECODE_CHARS;
use crate::error::DecodeError;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encodes `input`.
///
/// ASCII letters, digits, `.`, `-`, `_`, and any character found in
/// `extra_allowed` are copied as is. Every other byte is written as `%`
/// followed by two uppercase hexadecimal digits. Spaces become `%20`,
/// never `+`. Bytes that are not valid UTF-8 are always escaped.
///
/// # Examples
///
/// ```
/// use edhttp_uri::urlencode;
///
/// assert_eq!(urlencode("a b/c", ""), "a%20b%2Fc");
/// assert_eq!(urlencode("~user/page", "~/"), "~user/page");
/// assert_eq!(urlencode("é", ""), "%C3%A9");
/// assert_eq!(urlencode("café", "é"), "café");
/// ```
#[must_use]
pub fn urlencode(input: impl AsRef<[u8]>, extra_allowed: &str) -> String {
    let input = input.as_ref();
    let mut encoded = String::with_capacity(input.len());

    for chunk in input.utf8_chunks() {
        for c in chunk.valid().chars() {
            if c.is_ascii_alphanumeric()
                || matches!(c, '.' | '-' | '_')
                || extra_allowed.contains(c)
            {
                encoded.push(c);
            } else {
                let mut buf = [0; 4];
                push_escaped(&mut encoded, c.encode_utf8(&mut buf).as_bytes());
            }
        }
        push_escaped(&mut encoded, chunk.invalid());
    }

    encoded
}

fn push_escaped(encoded: &mut String, bytes: &[u8]) {
    for &byte in bytes {
        encoded.push('%');
        encoded.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
        encoded.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
    }
}

/// Percent-decodes `input` into a string.
///
/// `+` becomes a space. In relaxed mode, a `%` that does not introduce two
/// hexadecimal digits is kept literally, any other byte is accepted, and
/// invalid UTF-8 is replaced with U+FFFD.
///
/// # Errors
///
/// In strict mode (`relaxed == false`), returns `DecodeError` if:
/// - A `%` is not followed by two hexadecimal digits
/// - A byte other than `A-Za-z0-9.-/_~!@,;:()` appears unescaped
/// - The decoded bytes are not valid UTF-8
///
/// # Examples
///
/// ```
/// use edhttp_uri::urldecode;
///
/// assert_eq!(urldecode("more%20data+here", false).unwrap(), "more data here");
/// assert!(urldecode("100%", false).is_err());
/// assert_eq!(urldecode("100%", true).unwrap(), "100%");
/// ```
pub fn urldecode(input: &str, relaxed: bool) -> Result<String, DecodeError> {
    if relaxed {
        return Ok(urldecode_relaxed(input));
    }
    String::from_utf8(urldecode_bytes(input, false)?).map_err(|_| DecodeError::InvalidUtf8 {
        input: input.to_string(),
    })
}

/// Percent-decodes `input` in relaxed mode, which cannot fail.
pub(crate) fn urldecode_relaxed(input: &str) -> String {
    String::from_utf8_lossy(&decode_relaxed(input.as_bytes())).into_owned()
}

/// Percent-decodes `input` into raw bytes.
///
/// Same rules as [`urldecode`] without the final UTF-8 conversion.
///
/// # Errors
///
/// In strict mode, returns `DecodeError` on a malformed `%` escape or an
/// unescaped byte outside the accepted set.
pub fn urldecode_bytes(input: &str, relaxed: bool) -> Result<Vec<u8>, DecodeError> {
    let bytes = input.as_bytes();
    if relaxed {
        return Ok(decode_relaxed(bytes));
    }

    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => {
                let Some(byte) = escape_at(bytes, i) else {
                    return Err(DecodeError::InvalidEscape {
                        input: input.to_string(),
                        first: bytes.get(i + 1).copied().unwrap_or(0),
                        second: bytes.get(i + 2).copied().unwrap_or(0),
                    });
                };
                decoded.push(byte);
                i += 2;
            }
            byte if is_strict_char(byte) => decoded.push(byte),
            byte => {
                return Err(DecodeError::InvalidChar {
                    input: input.to_string(),
                    byte,
                });
            }
        }
        i += 1;
    }

    Ok(decoded)
}

/// A `%` without two hexadecimal digits is kept, any other byte is accepted.
fn decode_relaxed(bytes: &[u8]) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => decoded.push(b' '),
            b'%' => match escape_at(bytes, i) {
                Some(byte) => {
                    decoded.push(byte);
                    i += 2;
                }
                None => decoded.push(b'%'),
            },
            byte => decoded.push(byte),
        }
        i += 1;
    }
    decoded
}

/// Value of the `%XX` escape starting at `i`, if well formed.
fn escape_at(bytes: &[u8], i: usize) -> Option<u8> {
    let high = hex_value(*bytes.get(i + 1)?)?;
    let low = hex_value(*bytes.get(i + 2)?)?;
    Some((high << 4) | low)
}

fn is_strict_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(byte, b'.' | b'-' | b'/' | b'_')
        || LEGACY_DECODE_CHARS.contains(&byte)
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}
