//! The resolved translation mapping for one locale and text domain.

use indexmap::IndexMap;

/// Marker value stored for a deliberately blank translation (a quoted empty
/// value in an ini file). Using U+200C ZERO WIDTH NON-JOINER instead of ""
/// keeps intentionally blank strings distinguishable from missing keys in
/// comparison and reporting tools.
pub const NON_JOINING_BLANK: &str = "\u{200C}";

/// An ordered key -> value mapping for one (locale, text domain) pair.
///
/// Entries keep insertion order, which is the order sources were consulted
/// during resolution. Once a key is set, lower-priority sources must not
/// replace it; all resolution code paths go through [`TextDomain::insert_missing`]
/// or [`TextDomain::fill_missing_from`] to uphold that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDomain {
    entries: IndexMap<String, String>,
}

impl TextDomain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert unconditionally. Used while parsing a single file, where a
    /// duplicate key later in the same file overrides the earlier one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Insert only if `key` is not already present. Returns true when the
    /// value was stored.
    pub fn insert_missing(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.entries.entry(key.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            }
        }
    }

    /// Fill every key absent from `self` with the value from `other`.
    ///
    /// This is the single merge primitive of the resolver: merging a parent
    /// file underneath a child, and layering a fallback locale underneath a
    /// more specific one, are both "other fills my gaps".
    pub fn fill_missing_from(&mut self, other: &TextDomain) {
        for (key, value) in other.iter() {
            self.insert_missing(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TextDomain {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut domain = TextDomain::new();
        for (k, v) in iter {
            domain.insert(k, v);
        }
        domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_missing_never_overrides() {
        let mut domain = TextDomain::new();
        assert!(domain.insert_missing("k", "first"));
        assert!(!domain.insert_missing("k", "second"));
        assert_eq!(domain.get("k"), Some("first"));
    }

    #[test]
    fn test_fill_missing_from_keeps_existing() {
        let mut child: TextDomain = [("title", "Child"), ("only_child", "c")]
            .into_iter()
            .collect();
        let parent: TextDomain = [("title", "Parent"), ("only_parent", "p")]
            .into_iter()
            .collect();

        child.fill_missing_from(&parent);

        assert_eq!(child.get("title"), Some("Child"));
        assert_eq!(child.get("only_child"), Some("c"));
        assert_eq!(child.get("only_parent"), Some("p"));
    }

    #[test]
    fn test_iteration_preserves_insertion_order() {
        let domain: TextDomain = [("b", "1"), ("a", "2"), ("c", "3")].into_iter().collect();
        let keys: Vec<&str> = domain.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_blank_marker_is_not_empty() {
        assert!(!NON_JOINING_BLANK.is_empty());
        assert_ne!(NON_JOINING_BLANK, "");
    }
}
