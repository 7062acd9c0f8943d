//! Query string parameters of a URI.

use std::collections::BTreeMap;
use std::fmt;

use crate::constants::{NAMELESS_QUERY_KEY, QUERY_VALUE_ALLOWED};
use crate::encoding::{urldecode, urlencode};
use crate::error::DecodeError;

/// Decoded query string parameters.
///
/// Keys are unique and kept sorted lexicographically, so the serialized
/// form of a URI does not depend on the order its parameters were given in.
/// A parameter with a value but no name is stored under `"*"`.
///
/// # Examples
///
/// ```
/// use edhttp_uri::QueryStrings;
///
/// let mut query = QueryStrings::new();
/// query.insert("var", "value");
/// query.insert("other_var", "more data");
/// assert_eq!(query.to_string(), "other_var=more%20data&var=value");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryStrings {
    params: BTreeMap<String, String>,
}

impl QueryStrings {
    /// Creates an empty set of parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a parameter, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns true if the parameter is present, even with an empty value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Sets a parameter, returning its previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.params.insert(name.into(), value.into())
    }

    /// Removes a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.remove(name)
    }

    /// Removes all parameters.
    pub fn clear(&mut self) {
        self.params.clear();
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns the parameter at `index` in key order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.iter().nth(index)
    }

    /// Returns an iterator over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merges an encoded query string (without the leading `?`).
    ///
    /// Existing parameters are kept unless the input redefines them, and
    /// when the input repeats a name the last value wins. `name` alone sets
    /// an empty value and `=value` is stored under `"*"`.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if a name or value is not properly encoded, in
    /// which case nothing is changed.
    pub fn merge_encoded(&mut self, input: &str) -> Result<(), DecodeError> {
        let mut decoded = Vec::new();
        for pair in input.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            let name = if name.is_empty() {
                NAMELESS_QUERY_KEY.to_string()
            } else {
                urldecode(name, false)?
            };
            decoded.push((name, urldecode(value, false)?));
        }
        self.params.extend(decoded);
        Ok(())
    }
}

impl fmt::Display for QueryStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            f.write_str(&urlencode(name, ""))?;
            if !value.is_empty() {
                write!(f, "={}", urlencode(value, QUERY_VALUE_ALLOWED))?;
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a QueryStrings {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
