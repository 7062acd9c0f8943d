//! Error types for URI parsing, decoding, and editing.

use std::error::Error;
use std::fmt;

/// Errors raised by strict percent-decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` was not followed by two hexadecimal digits.
    InvalidEscape {
        /// The text being decoded
        input: String,
        /// First byte after the `%` (0 when the input ended)
        first: u8,
        /// Second byte after the `%` (0 when the input ended)
        second: u8,
    },
    /// A byte outside the accepted set appeared unescaped.
    InvalidChar {
        /// The text being decoded
        input: String,
        /// The offending byte
        byte: u8,
    },
    /// The decoded bytes are not valid UTF-8.
    InvalidUtf8 {
        /// The text being decoded
        input: String,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEscape {
                input,
                first,
                second,
            } => write!(
                f,
                "urldecode(\"{input}\", false) failed because of an invalid %xx character (digits are {first} / {second})"
            ),
            Self::InvalidChar { input, byte } => write!(
                f,
                "urldecode(\"{input}\", false) failed because of an invalid character ({byte})"
            ),
            Self::InvalidUtf8 { input } => {
                write!(f, "urldecode(\"{input}\", false) did not decode to valid UTF-8")
            }
        }
    }
}

impl Error for DecodeError {}

/// Errors raised while breaking an authority into sub-domains, domain, and
/// top-level domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No known top-level domain was found and the text is not an accepted
    /// IP literal.
    Unverified {
        /// The raw domain text
        domain: String,
    },
    /// Two consecutive dots (or a leading dot) left an empty sub-domain.
    EmptySubDomain {
        /// The raw domain text
        domain: String,
    },
    /// A label could not be percent-decoded.
    InvalidEncoding(DecodeError),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unverified { domain } => {
                write!(f, "could not verify domain name \"{domain}\".")
            }
            Self::EmptySubDomain { domain } => {
                write!(f, "found an empty sub-domain name in \"{domain}\".")
            }
            Self::InvalidEncoding(e) => write!(f, "invalid domain name encoding: {e}"),
        }
    }
}

impl Error for DomainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors raised by path canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// A `..` segment had no segment before it to remove.
    LeadingParent,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeadingParent => write!(f, "found '..' at the beginning of your path."),
        }
    }
}

impl Error for PathError {}

/// The specific reason a URI string was rejected.
///
/// The `Display` output of this type is what
/// [`Uri::last_error_message`](crate::Uri::last_error_message) reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input is empty.
    Empty,
    /// Nothing precedes the first `:`.
    EmptyScheme,
    /// The scheme is not followed by `://`.
    MissingSchemeSeparator,
    /// The authority includes more than one `@`.
    MultipleAtSigns,
    /// The credentials include more than one `:`.
    MultipleColonsInCredentials,
    /// The domain and port include more than one `:`.
    MultipleColonsInDomain,
    /// Only one of user name and password is defined.
    UnpairedCredentials,
    /// The `:` port separator is not followed by anything.
    EmptyPort,
    /// The port includes something other than decimal digits.
    InvalidPort {
        /// The port text
        value: String,
    },
    /// The port is larger than 65535.
    PortOutOfRange {
        /// The port text
        value: String,
    },
    /// The authority has no domain name.
    MissingDomain,
    /// The domain could not be classified.
    InvalidDomain(DomainError),
    /// A component could not be percent-decoded.
    InvalidEncoding {
        /// Which component failed
        part: &'static str,
        /// The decoding failure
        error: DecodeError,
    },
    /// The same query string parameter appears more than once.
    DuplicateQueryName {
        /// The decoded parameter name
        name: String,
    },
    /// The path could not be canonicalized.
    InvalidPath(PathError),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "the URI cannot be an empty string."),
            Self::EmptyScheme => write!(f, "the scheme cannot be an empty string."),
            Self::MissingSchemeSeparator => {
                write!(f, "the scheme must be followed by \"://\".")
            }
            Self::MultipleAtSigns => write!(
                f,
                "more than one '@' character found in the authority of the URI."
            ),
            Self::MultipleColonsInCredentials => write!(
                f,
                "more than one ':' character found in the user name and password."
            ),
            Self::MultipleColonsInDomain => write!(
                f,
                "more than one ':' character found in the domain name and port."
            ),
            Self::UnpairedCredentials => write!(
                f,
                "user name and password must both be defined (or both be empty)."
            ),
            Self::EmptyPort => write!(f, "port cannot be an empty string."),
            Self::InvalidPort { value } => {
                write!(f, "port \"{value}\" must only include decimal digits.")
            }
            Self::PortOutOfRange { value } => {
                write!(f, "port \"{value}\" is out of range (0 to 65535).")
            }
            Self::MissingDomain => write!(f, "a domain name is required."),
            Self::InvalidDomain(e) => write!(f, "{e}"),
            Self::InvalidEncoding { part, error } => write!(f, "invalid {part}: {error}"),
            Self::DuplicateQueryName { name } => {
                write!(f, "query string \"{name}\" found more than once.")
            }
            Self::InvalidPath(e) => write!(f, "{e}"),
        }
    }
}

impl Error for ParseErrorKind {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDomain(e) => Some(e),
            Self::InvalidEncoding { error, .. } => Some(error),
            Self::InvalidPath(e) => Some(e),
            _ => None,
        }
    }
}

/// Error returned when a [`Uri`](crate::Uri) cannot be built from a string.
///
/// The message only says the URI is invalid; the precise reason is kept in
/// [`kind`](Self::kind) and reported as the error's source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "URI \"{}\" is considered invalid.", self.input)
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}

/// Errors raised by [`Uri`](crate::Uri) setters and indexed accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// A setter received a value it cannot accept.
    InvalidParameter {
        /// Name of the parameter
        parameter: &'static str,
        /// The rejected value
        value: String,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// A path could not be canonicalized.
    InvalidPath {
        /// The path as given
        path: String,
        /// The canonicalization failure
        error: PathError,
    },
    /// A domain could not be broken up.
    InvalidDomain(DomainError),
    /// A value could not be percent-decoded.
    InvalidEncoding(DecodeError),
    /// A hash-bang URI was requested while an anchor is defined.
    ExclusiveParameters,
    /// An index is outside the available range.
    OutOfBounds {
        /// Which list was indexed
        part: &'static str,
        /// The requested index
        index: usize,
        /// Number of available entries
        len: usize,
    },
    /// The domain could not be resolved to any address.
    AddressResolution {
        /// The host that was looked up
        host: String,
        /// Reason for the failure
        reason: String,
    },
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "invalid {parameter} \"{value}\": {reason}"),
            Self::InvalidPath { path, error } => {
                write!(f, "path \"{path}\" is not valid: {error}")
            }
            Self::InvalidDomain(e) => write!(f, "{e}"),
            Self::InvalidEncoding(e) => write!(f, "{e}"),
            Self::ExclusiveParameters => write!(
                f,
                "you cannot use the hash bang (#!) and an anchor (#) in the same URI."
            ),
            Self::OutOfBounds { part, index, len } => {
                write!(f, "{part} {index} does not exist (range 0 to {len})")
            }
            Self::AddressResolution { host, reason } => {
                write!(f, "could not resolve \"{host}\": {reason}")
            }
        }
    }
}

impl Error for UriError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPath { error, .. } => Some(error),
            Self::InvalidDomain(e) => Some(e),
            Self::InvalidEncoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DecodeError> for UriError {
    fn from(e: DecodeError) -> Self {
        Self::InvalidEncoding(e)
    }
}

impl From<DomainError> for UriError {
    fn from(e: DomainError) -> Self {
        Self::InvalidDomain(e)
    }
}
