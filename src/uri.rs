//! Main URI type.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use crate::constants::{DEFAULT_PORT, DEFAULT_SCHEME};
use crate::domain::{DomainParts, split_domain};
use crate::error::{ParseError, UriError};
use crate::options::UriOptions;
use crate::parser::{self, ParseOptions, ParsedUri};
use crate::path;
use crate::query::QueryStrings;
use crate::scheme::scheme_to_port;
use crate::serializer;

/// A parsed and validated URI.
///
/// A `Uri` is built by parsing a string ([`Uri::parse`], [`Uri::set_uri`])
/// or field by field through its setters. Each setter only validates its own
/// field, so a `Uri` never needs a string form to exist.
///
/// # Structure
///
/// ```text
/// scheme://[user:password@][sub-domains.]domain.tld[:port]/path[?query][#anchor]
/// ```
///
/// Comparison, ordering, and hashing use the canonical string returned by
/// [`Display`](fmt::Display), then the hash-bang path, so two URIs that only
/// differ in slashes, query parameter order, or escaping are equal.
///
/// # Examples
///
/// ```
/// use edhttp_uri::Uri;
///
/// let uri = Uri::parse(
///     "https://me:p1@test.this.domain.net///with///a///path?var=value&other_var=more%20data#hello",
/// )
/// .unwrap();
/// assert_eq!(uri.sub_domains(), "test.this");
/// assert_eq!(uri.domain(), "domain");
/// assert_eq!(uri.top_level_domain(), ".net");
/// assert_eq!(uri.path(false), "with/a/path");
/// assert_eq!(
///     uri.to_string(),
///     "https://me:p1@test.this.domain.net/with/a/path?other_var=more%20data&var=value#hello"
/// );
/// ```
#[derive(Clone)]
pub struct Uri {
    original: String,
    scheme: String,
    username: String,
    password: String,
    port: u16,
    /// Looked up once per scheme change
    scheme_port: Option<u16>,
    domain: DomainParts,
    path: Vec<String>,
    hash_bang_path: Vec<String>,
    query_strings: QueryStrings,
    anchor: String,
    options: UriOptions,
    last_error_message: String,
    /// Resolved on demand, dropped when the domain or port changes
    address_ranges: Option<Vec<SocketAddr>>,
}

impl Default for Uri {
    fn default() -> Self {
        Self {
            original: String::new(),
            scheme: DEFAULT_SCHEME.to_string(),
            username: String::new(),
            password: String::new(),
            port: DEFAULT_PORT,
            scheme_port: Some(DEFAULT_PORT),
            domain: DomainParts::default(),
            path: Vec::new(),
            hash_bang_path: Vec::new(),
            query_strings: QueryStrings::new(),
            anchor: String::new(),
            options: UriOptions::new(),
            last_error_message: String::new(),
            address_ranges: None,
        }
    }
}

impl Uri {
    /// Creates a URI with the default scheme and port and nothing else.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URI from a string.
    ///
    /// Path-style URIs and IP addresses are refused; use
    /// [`parse_with`](Self::parse_with) to accept them.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the string is not a valid URI. Its message
    /// only says so; the reason is in [`ParseError::kind`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, ParseOptions::default())
    }

    /// Parses a URI from a string with explicit scanner options.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the string is not a valid URI.
    pub fn parse_with(input: &str, options: ParseOptions) -> Result<Self, ParseError> {
        let mut uri = Self::new();
        match parser::parse(input, options) {
            Ok(parsed) => {
                uri.apply(input, parsed);
                Ok(uri)
            }
            Err(kind) => {
                log::error!("URI \"{input}\" is considered invalid.");
                Err(ParseError {
                    input: input.to_string(),
                    kind,
                })
            }
        }
    }

    /// Replaces this URI with the one in `input`.
    ///
    /// On success every field is replaced, options included, and `input`
    /// becomes the [original URI](Self::original_uri). On failure nothing
    /// changes except [`last_error_message`](Self::last_error_message).
    ///
    /// A successful call does not clear a message left by an earlier
    /// failure.
    pub fn set_uri(&mut self, input: &str, accept_path: bool, accept_ip: bool) -> bool {
        self.set_uri_with(
            input,
            ParseOptions {
                accept_path,
                accept_ip,
            },
        )
    }

    /// Same as [`set_uri`](Self::set_uri) with the options in a struct.
    pub fn set_uri_with(&mut self, input: &str, options: ParseOptions) -> bool {
        match parser::parse(input, options) {
            Ok(parsed) => {
                self.apply(input, parsed);
                true
            }
            Err(kind) => {
                log::debug!("rejected URI {input:?}: {kind}");
                self.last_error_message = kind.to_string();
                false
            }
        }
    }

    fn apply(&mut self, input: &str, parsed: ParsedUri) {
        self.original = input.to_string();
        self.scheme = parsed.scheme;
        self.scheme_port = parsed.scheme_port;
        self.username = parsed.username;
        scrub(&mut self.password);
        self.password = parsed.password;
        if let Some(port) = parsed.port {
            self.port = port;
        }
        self.domain = parsed.domain;
        self.path = parsed.path;
        self.hash_bang_path = parsed.hash_bang_path;
        self.query_strings = parsed.query_strings;
        self.anchor = parsed.anchor;
        self.options.clear();
        self.address_ranges = None;
    }

    /// Returns the string given to the last successful parse, or `""`.
    #[must_use]
    pub fn original_uri(&self) -> &str {
        &self.original
    }

    /// Returns the reason of the last failed [`set_uri`](Self::set_uri).
    #[must_use]
    pub fn last_error_message(&self) -> &str {
        &self.last_error_message
    }

    /// Forgets the last error message.
    pub fn clear_last_error_message(&mut self) {
        self.last_error_message.clear();
    }

    /// Returns the canonical string of this URI.
    ///
    /// With `use_hash_bang`, the [hash-bang path](Self::hash_bang_path) is
    /// written after the query string as `#!/path`. When there is none, the
    /// main path moves there instead of following the domain. With
    /// `redact_password`, that text replaces the password.
    ///
    /// # Errors
    ///
    /// Returns `UriError::ExclusiveParameters` if `use_hash_bang` is set
    /// while an anchor is defined.
    pub fn get_uri(
        &self,
        use_hash_bang: bool,
        redact_password: Option<&str>,
    ) -> Result<String, UriError> {
        serializer::to_uri_string(self, use_hash_bang, redact_password)
    }

    /// Returns `scheme://full-domain/`, with the port when `include_port`
    /// is set and the scheme does not imply it.
    #[must_use]
    pub fn get_website_uri(&self, include_port: bool) -> String {
        serializer::website_uri(self, include_port)
    }

    /// Returns a part of the URI by name.
    ///
    /// `index` is only used by `option`, `path`, `hash-bang-path`,
    /// `query-string`, and `sub-domain`. Unknown names return an empty
    /// string.
    ///
    /// # Errors
    ///
    /// Returns `UriError::OutOfBounds` if `index` is out of range for an
    /// indexed part.
    pub fn get_part(&self, name: &str, index: usize) -> Result<String, UriError> {
        let part = match name {
            "anchor" => self.anchor.clone(),
            "domain" => self.domain.domain.clone(),
            "full-domain" => self.full_domain(),
            "hash-bang-path" => {
                checked_index("hash-bang-path", &self.hash_bang_path, index)?.clone()
            }
            "hash-bang-path-count" => self.hash_bang_path.len().to_string(),
            "option" => self.option_at(index)?.1.to_string(),
            "option-count" => self.option_count().to_string(),
            "original" => self.original.clone(),
            "password" => self.password.clone(),
            "path" => self.path_folder_name(index)?.to_string(),
            "path-count" => self.path_count().to_string(),
            "port" => self.port.to_string(),
            "scheme" | "protocol" => self.scheme.clone(),
            "query-string" => self.query_option_at(index)?.1.to_string(),
            "query-string-count" => self.query_option_count().to_string(),
            "sub-domain" => self.sub_domain(index)?.to_string(),
            "sub-domain-count" => self.sub_domain_count().to_string(),
            "tld" | "top-level-domain" => self.domain.top_level_domain.clone(),
            "uri" => serializer::canonical(self),
            "username" => self.username.clone(),
            _ => String::new(),
        };
        Ok(part)
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Changes the scheme. The port is left alone.
    ///
    /// The port the new scheme implies is looked up here, which may read
    /// the system services database.
    ///
    /// # Errors
    ///
    /// Returns `UriError::InvalidParameter` if `scheme` is empty.
    pub fn set_scheme(&mut self, scheme: &str) -> Result<&mut Self, UriError> {
        if scheme.is_empty() {
            return Err(UriError::InvalidParameter {
                parameter: "scheme",
                value: String::new(),
                reason: "cannot be an empty string",
            });
        }
        self.scheme = scheme.to_string();
        self.scheme_port = scheme_to_port(scheme);
        Ok(self)
    }

    /// Returns the port implied by the scheme, which the canonical string
    /// leaves out.
    #[must_use]
    pub fn scheme_port(&self) -> Option<u16> {
        self.scheme_port
    }

    /// Returns the decoded user name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Changes the user name.
    pub fn set_username(&mut self, username: &str) -> &mut Self {
        self.username = username.to_string();
        self
    }

    /// Returns the decoded password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Changes the password. The bytes of the previous one are zeroed.
    pub fn set_password(&mut self, password: &str) -> &mut Self {
        scrub(&mut self.password);
        self.password.push_str(password);
        self
    }

    /// Replaces the sub-domains, domain, and top-level domain.
    ///
    /// `full_domain` may be percent-encoded. IP addresses are refused.
    ///
    /// # Errors
    ///
    /// Returns `UriError::InvalidDomain` if no known top-level domain is
    /// found or a label is empty or badly encoded.
    pub fn set_domain(&mut self, full_domain: &str) -> Result<&mut Self, UriError> {
        self.domain = split_domain(full_domain, false)?;
        self.address_ranges = None;
        Ok(self)
    }

    /// Returns `sub-domains.domain.tld`, decoded.
    #[must_use]
    pub fn full_domain(&self) -> String {
        let mut full = self.sub_domains();
        if !full.is_empty() {
            full.push('.');
        }
        full.push_str(&self.domain.domain);
        full.push_str(&self.domain.top_level_domain);
        full
    }

    /// Returns the top-level domain with its leading `.`.
    #[must_use]
    pub fn top_level_domain(&self) -> &str {
        &self.domain.top_level_domain
    }

    /// Returns the domain name without sub-domains and top-level domain, or
    /// the IP address.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain.domain
    }

    /// Returns the sub-domains joined with `.`.
    #[must_use]
    pub fn sub_domains(&self) -> String {
        self.domain.sub_domains.join(".")
    }

    /// Returns the number of sub-domains.
    #[must_use]
    pub fn sub_domain_count(&self) -> usize {
        self.domain.sub_domains.len()
    }

    /// Returns one sub-domain, outermost first.
    ///
    /// # Errors
    ///
    /// Returns `UriError::OutOfBounds` if `index` is out of range.
    pub fn sub_domain(&self, index: usize) -> Result<&str, UriError> {
        checked_index("sub-domain", &self.domain.sub_domains, index).map(String::as_str)
    }

    /// Returns the sub-domains, outermost first.
    #[must_use]
    pub fn sub_domains_list(&self) -> &[String] {
        &self.domain.sub_domains
    }

    /// Returns true if the authority is an IP address.
    #[must_use]
    pub fn is_ip_literal(&self) -> bool {
        self.domain.top_level_domain.is_empty() && !self.domain.domain.is_empty()
    }

    /// Returns true if this URI has no authority (`scheme:///path`).
    #[must_use]
    pub fn is_unix(&self) -> bool {
        self.domain.domain.is_empty()
    }

    /// Returns the addresses of the domain at the current port.
    ///
    /// IPv6 addresses come first. The lookup may use DNS and block; its
    /// result is kept until the domain or port changes.
    ///
    /// # Errors
    ///
    /// Returns `UriError::AddressResolution` if this URI has no domain or
    /// the domain resolves to nothing.
    pub fn address_ranges(&mut self) -> Result<&[SocketAddr], UriError> {
        let addresses = match self.address_ranges.take() {
            Some(addresses) => addresses,
            None => self.resolve_addresses()?,
        };
        Ok(self.address_ranges.insert(addresses).as_slice())
    }

    fn resolve_addresses(&self) -> Result<Vec<SocketAddr>, UriError> {
        let host = self.full_domain();
        let failed = |reason: String| UriError::AddressResolution {
            host: host.clone(),
            reason,
        };

        if self.is_unix() {
            return Err(failed("no domain name".to_string()));
        }

        let mut addresses: Vec<SocketAddr> = if self.is_ip_literal() {
            let ip = host
                .trim_start_matches('[')
                .trim_end_matches(']')
                .parse::<IpAddr>()
                .map_err(|e| failed(e.to_string()))?;
            vec![SocketAddr::new(ip, self.port)]
        } else {
            (host.as_str(), self.port)
                .to_socket_addrs()
                .map_err(|e| failed(e.to_string()))?
                .collect()
        };

        addresses.sort_unstable_by_key(|a| (a.is_ipv4(), *a));
        addresses.dedup();
        if addresses.is_empty() {
            return Err(failed("no address found".to_string()));
        }
        log::trace!("{host} resolved to {addresses:?}");
        Ok(addresses)
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Changes the port.
    pub fn set_port(&mut self, port: u16) -> &mut Self {
        self.port = port;
        self.address_ranges = None;
        self
    }

    /// Changes the port from its decimal text.
    ///
    /// # Errors
    ///
    /// Returns `UriError::InvalidParameter` unless `port` is a decimal
    /// number from 0 to 65535.
    pub fn set_port_str(&mut self, port: &str) -> Result<&mut Self, UriError> {
        let value = port
            .bytes()
            .all(|b| b.is_ascii_digit())
            .then(|| port.parse::<u16>().ok())
            .flatten()
            .ok_or_else(|| UriError::InvalidParameter {
                parameter: "port",
                value: port.to_string(),
                reason: "must be a decimal number from 0 to 65535",
            })?;
        Ok(self.set_port(value))
    }

    /// Changes the path.
    ///
    /// `path` is decoded text. A path starting with `/` replaces the current
    /// one; any other path is appended to it. `.` and `..` segments are
    /// resolved.
    ///
    /// # Errors
    ///
    /// Returns `UriError::InvalidPath` if a `..` would go above the root, in
    /// which case the path is unchanged.
    pub fn set_path(&mut self, path: &str) -> Result<&mut Self, UriError> {
        let full = if path.starts_with('/') || self.path.is_empty() {
            path.to_string()
        } else {
            format!("{}/{path}", self.path.join("/"))
        };
        self.path = path::canonicalize(path::split_decoded(&full))
            .map_err(|error| UriError::InvalidPath { path: full, error })?;
        Ok(self)
    }

    /// Returns the path without leading or trailing `/`, each segment
    /// percent-encoded when `encoded` is set.
    #[must_use]
    pub fn path(&self, encoded: bool) -> String {
        if encoded {
            serializer::encode_segments(&self.path)
        } else {
            self.path.join("/")
        }
    }

    /// Returns the number of path segments.
    #[must_use]
    pub fn path_count(&self) -> usize {
        self.path.len()
    }

    /// Returns one path segment.
    ///
    /// # Errors
    ///
    /// Returns `UriError::OutOfBounds` if `index` is out of range.
    pub fn path_folder_name(&self, index: usize) -> Result<&str, UriError> {
        checked_index("path", &self.path, index).map(String::as_str)
    }

    /// Returns the path segments.
    #[must_use]
    pub fn path_list(&self) -> &[String] {
        &self.path
    }

    /// Returns the segments found after `#!` in the parsed string.
    ///
    /// They are written back by [`get_uri`](Self::get_uri) in hash-bang
    /// mode.
    #[must_use]
    pub fn hash_bang_path(&self) -> &[String] {
        &self.hash_bang_path
    }

    /// Sets an application option. An empty value removes it.
    pub fn set_option(&mut self, name: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.options.remove(name);
        } else {
            self.options.insert(name, value);
        }
        self
    }

    /// Removes an application option.
    pub fn unset_option(&mut self, name: &str) -> &mut Self {
        self.options.remove(name);
        self
    }

    /// Returns an application option, or `""`.
    #[must_use]
    pub fn option(&self, name: &str) -> &str {
        self.options.get(name).unwrap_or_default()
    }

    /// Returns the number of application options.
    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Returns the name and value of an application option by position.
    ///
    /// # Errors
    ///
    /// Returns `UriError::OutOfBounds` if `index` is out of range.
    pub fn option_at(&self, index: usize) -> Result<(&str, &str), UriError> {
        self.options
            .get_index(index)
            .ok_or(UriError::OutOfBounds {
                part: "option",
                index,
                len: self.options.len(),
            })
    }

    /// Returns the application options.
    #[must_use]
    pub fn options(&self) -> &UriOptions {
        &self.options
    }

    /// Sets a query string parameter.
    ///
    /// An empty `name` is ignored and an empty `value` removes the
    /// parameter; use [`query_strings_mut`](Self::query_strings_mut) to keep
    /// a parameter without a value.
    pub fn set_query_option(&mut self, name: &str, value: &str) -> &mut Self {
        if name.is_empty() {
            return self;
        }
        if value.is_empty() {
            self.query_strings.remove(name);
        } else {
            self.query_strings.insert(name, value);
        }
        self
    }

    /// Removes a query string parameter.
    pub fn unset_query_option(&mut self, name: &str) -> &mut Self {
        self.query_strings.remove(name);
        self
    }

    /// Merges an encoded query string (`a=1&b&=c`) into the parameters.
    ///
    /// # Errors
    ///
    /// Returns `UriError::InvalidEncoding` if a name or value is badly
    /// encoded, in which case nothing changes.
    pub fn set_query_string(&mut self, query: &str) -> Result<&mut Self, UriError> {
        self.query_strings.merge_encoded(query)?;
        Ok(self)
    }

    /// Removes all query string parameters.
    pub fn clear_query_options(&mut self) -> &mut Self {
        self.query_strings.clear();
        self
    }

    /// Returns true if the query string parameter is defined.
    #[must_use]
    pub fn has_query_option(&self, name: &str) -> bool {
        self.query_strings.contains(name)
    }

    /// Returns a query string parameter, or `""`.
    #[must_use]
    pub fn query_option(&self, name: &str) -> &str {
        self.query_strings.get(name).unwrap_or_default()
    }

    /// Returns the number of query string parameters.
    #[must_use]
    pub fn query_option_count(&self) -> usize {
        self.query_strings.len()
    }

    /// Returns the name and value of a query string parameter by position.
    ///
    /// # Errors
    ///
    /// Returns `UriError::OutOfBounds` if `index` is out of range.
    pub fn query_option_at(&self, index: usize) -> Result<(&str, &str), UriError> {
        self.query_strings
            .get_index(index)
            .ok_or(UriError::OutOfBounds {
                part: "query-string",
                index,
                len: self.query_strings.len(),
            })
    }

    /// Returns the encoded query string without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query_strings.to_string()
    }

    /// Returns the query string parameters.
    #[must_use]
    pub fn query_strings(&self) -> &QueryStrings {
        &self.query_strings
    }

    /// Returns the query string parameters for editing.
    pub fn query_strings_mut(&mut self) -> &mut QueryStrings {
        &mut self.query_strings
    }

    /// Returns the decoded anchor.
    #[must_use]
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Changes the anchor. An empty anchor removes it.
    ///
    /// # Errors
    ///
    /// Returns `UriError::InvalidParameter` if `anchor` includes a `#`.
    pub fn set_anchor(&mut self, anchor: &str) -> Result<&mut Self, UriError> {
        if anchor.contains('#') {
            return Err(UriError::InvalidParameter {
                parameter: "anchor",
                value: anchor.to_string(),
                reason: "cannot include a '#' character",
            });
        }
        self.anchor = anchor.to_string();
        Ok(self)
    }

    /// What equality, ordering, and hashing look at.
    fn comparison_key(&self) -> (String, &[String]) {
        (serializer::canonical(self), &self.hash_bang_path)
    }
}

fn checked_index<'a>(
    part: &'static str,
    list: &'a [String],
    index: usize,
) -> Result<&'a String, UriError> {
    list.get(index).ok_or(UriError::OutOfBounds {
        part,
        index,
        len: list.len(),
    })
}

/// Zeroes the bytes of `secret` and empties it, keeping its allocation.
fn scrub(secret: &mut String) {
    let mut bytes = std::mem::take(secret).into_bytes();
    bytes.fill(0);
    std::hint::black_box(&mut bytes);
    bytes.clear();
    *secret = String::from_utf8(bytes).unwrap_or_default();
}

impl Drop for Uri {
    fn drop(&mut self) {
        scrub(&mut self.password);
    }
}

impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Uri")
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .field("port", &self.port)
            .field("sub_domains", &self.domain.sub_domains)
            .field("domain", &self.domain.domain)
            .field("top_level_domain", &self.domain.top_level_domain)
            .field("path", &self.path)
            .field("hash_bang_path", &self.hash_bang_path)
            .field("query_strings", &self.query_strings)
            .field("anchor", &self.anchor)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serializer::canonical(self))
    }
}

impl FromStr for Uri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for Uri {}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Self) -> Ordering {
        self.comparison_key().cmp(&other.comparison_key())
    }
}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::parse(&s).map_err(|e| serde::de::Error::custom(e.kind))
    }
}
