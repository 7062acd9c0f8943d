//! Validation of configuration values that must be URIs.

use crate::parser::ParseOptions;
use crate::uri::Uri;

/// Checks whether strings are valid URIs.
///
/// Built from a list of textual parameters, as found in configuration
/// option definitions:
///
/// | Parameter                     | Effect                          |
/// |-------------------------------|---------------------------------|
/// | `accept_ip`, `accept-ip`      | IP addresses are valid domains  |
/// | `refuse_ip`, `refuse-ip`      | IP addresses are refused        |
/// | `accept_path`, `accept-path`  | `scheme:///path` URIs are valid |
/// | `refuse_path`, `refuse-path`  | `scheme:///path` URIs refused   |
///
/// Later parameters override earlier ones.
///
/// # Examples
///
/// ```
/// use edhttp_uri::UriValidator;
///
/// let validator = UriValidator::new(["accept-ip"]);
/// assert_eq!(validator.name(), "uri");
/// assert!(validator.validate("http://10.0.0.1/"));
/// assert!(!validator.validate("file:///etc/hosts"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UriValidator {
    options: ParseOptions,
}

impl UriValidator {
    /// Creates a validator from its parameters.
    ///
    /// Unknown parameters are logged and ignored.
    #[must_use]
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = ParseOptions::default();
        for param in params {
            match param.as_ref() {
                "accept_ip" | "accept-ip" => options.accept_ip = true,
                "accept_path" | "accept-path" => options.accept_path = true,
                "refuse_ip" | "refuse-ip" => options.accept_ip = false,
                "refuse_path" | "refuse-path" => options.accept_path = false,
                unknown => log::error!("UriValidator: unknown parameter \"{unknown}\"."),
            }
        }
        Self { options }
    }

    /// Returns the name this validator is registered under.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn name(&self) -> &'static str {
        "uri"
    }

    /// Returns the scanner options this validator applies.
    #[must_use]
    pub const fn options(&self) -> ParseOptions {
        self.options
    }

    /// Returns true if `value` parses as a URI.
    #[must_use]
    pub fn validate(&self, value: &str) -> bool {
        Uri::new().set_uri_with(value, self.options)
    }
}

impl From<ParseOptions> for UriValidator {
    fn from(options: ParseOptions) -> Self {
        Self { options }
    }
}
