// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use hashbrown::HashMap;

/// The attributes written on a tag.
///
/// Keys are unique and compared case-insensitively; values are kept verbatim (minus surrounding
/// quotes). The implicit form `<tag="value">` is stored as the tag's positional value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing any earlier value for the same name.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_lowercase(), value.into());
    }

    /// Set the positional value, as in `<tag=value>`.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.values.insert(String::new(), value.into());
    }

    /// Look up an attribute by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(value) => Some(value),
            None => self.values.get(&name.to_lowercase()).map(String::as_str),
        }
    }

    /// The positional value, as in `<tag=value>`.
    pub fn value(&self) -> Option<&str> {
        self.values.get("").map(String::as_str)
    }

    /// Look up an attribute and parse it as a number.
    ///
    /// Returns `None` when the attribute is missing or isn't a finite number.
    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.get(name)
            .and_then(|value| value.trim().parse::<f32>().ok())
            .filter(|value| value.is_finite())
    }

    /// Returns `true` if `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of attributes, the positional value included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over `(name, value)` pairs in no particular order.
    ///
    /// The positional value has an empty name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::Attributes;

    #[test]
    fn lookup_ignores_case() {
        let mut attrs = Attributes::new();
        attrs.insert("Speed", "2");
        assert_eq!(attrs.get("speed"), Some("2"));
        assert_eq!(attrs.get("SPEED"), Some("2"));
        assert_eq!(attrs.get_f32("speed"), Some(2.0));
    }

    #[test]
    fn later_insert_overwrites() {
        let mut attrs = Attributes::new();
        attrs.insert("a", "1");
        attrs.insert("A", "2");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("a"), Some("2"));
    }

    #[test]
    fn positional_value() {
        let mut attrs = Attributes::new();
        attrs.set_value("red");
        assert_eq!(attrs.value(), Some("red"));
        assert!(!attrs.contains("red"));
        assert_eq!(attrs.get_f32(""), None);
    }
}
