//! Constants for URI parsing and serialization.

/// Scheme assigned to a default-constructed [`Uri`](crate::Uri).
pub const DEFAULT_SCHEME: &str = "http";

/// Port assigned to a default-constructed [`Uri`](crate::Uri).
pub const DEFAULT_PORT: u16 = 80;

/// Well-known schemes and their ports, most frequent first.
pub const WELL_KNOWN_PORTS: &[(&str, u16)] = &[
    ("http", 80),
    ("https", 443),
    ("ftp", 21),
    ("ssh", 22),
    ("telnet", 23),
    ("smtp", 25),
    ("gopher", 70),
];

/// Key used for a query string parameter that has a value but no name
/// (`...&=value&...`).
pub const NAMELESS_QUERY_KEY: &str = "*";

/// Characters strict decoding accepts as-is on top of `A-Za-z0-9.-/_`.
///
/// None of these are legal unescaped everywhere in RFC 3986, but most
/// clients send them anyway.
pub const LEGACY_DECODE_CHARS: &[u8] = b"~!@,;:()";

/// Characters left unescaped when encoding a path segment.
pub const PATH_SEGMENT_ALLOWED: &str = "~";

/// Characters left unescaped when encoding a query string value.
pub const QUERY_VALUE_ALLOWED: &str = ",";

/// Characters left unescaped when encoding an anchor.
pub const ANCHOR_ALLOWED: &str = "!/~";

/// System services database consulted for schemes missing from
/// [`WELL_KNOWN_PORTS`].
pub const SERVICES_DB_PATH: &str = "/etc/services";
