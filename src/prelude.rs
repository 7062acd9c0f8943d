//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use edhttp_uri::prelude::*;
//!
//! let uri = Uri::parse("https://www.example.com/a/b").unwrap();
//! assert_eq!(urlencode(uri.path(false), ""), "a%2Fb");
//! ```

pub use crate::{
    // Core types
    ParseOptions, QueryStrings, Uri, UriOptions, UriValidator,
    // Errors
    DecodeError, DomainError, ParseError, ParseErrorKind, PathError, UriError,
    // Functions
    scheme_to_port, urldecode, urlencode,
};
