//! Application options attached to a URI.

use std::collections::BTreeMap;

/// Name/value metadata carried alongside a [`Uri`](crate::Uri).
///
/// Options never appear in the serialized URI and are not filled by
/// parsing; applications use them to remember what they derived from the
/// URI (a language picked from the path, a branch number, ...). A
/// successful [`set_uri`](crate::Uri::set_uri) clears them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UriOptions {
    entries: BTreeMap<String, String>,
}

impl UriOptions {
    /// Creates an empty set of options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of an option, if defined.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Defines an option, returning its previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    /// Removes an option, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Removes all options.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns true if no option is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the option at `index` in name order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.iter().nth(index)
    }

    /// Returns an iterator over the options in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut options = UriOptions::new();
        assert_eq!(options.insert("lang", "en"), None);
        assert_eq!(options.insert("lang", "fr"), Some("en".to_string()));
        assert_eq!(options.get("lang"), Some("fr"));
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn remove_and_clear() {
        let mut options = UriOptions::new();
        options.insert("a", "1");
        options.insert("b", "2");
        assert_eq!(options.remove("a"), Some("1".to_string()));
        assert_eq!(options.remove("a"), None);
        options.clear();
        assert!(options.is_empty());
    }

    #[test]
    fn index_follows_name_order() {
        let mut options = UriOptions::new();
        options.insert("branch", "3");
        options.insert("action", "view");
        assert_eq!(options.get_index(0), Some(("action", "view")));
        assert_eq!(options.get_index(1), Some(("branch", "3")));
        assert_eq!(options.get_index(2), None);
    }
}
