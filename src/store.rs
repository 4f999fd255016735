//! Variable store with upsert semantics
//!
//! Variables keep the order in which their keys were first inserted. A key
//! appears at most once; inserting it again overwrites the value in place.

use std::collections::HashMap;

/// A single `key=value` binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

/// Insertion-ordered collection of unique-keyed variables
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    variables: Vec<Variable>,
    /// key -> position in `variables`
    index: HashMap<String, usize>,
}

impl VariableStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable, or overwrite the value of an existing key
    ///
    /// Returns the previous value when the key was already present.
    pub fn upsert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        match self.index.get(&key) {
            Some(&idx) => Some(std::mem::replace(&mut self.variables[idx].value, value)),
            None => {
                self.index.insert(key.clone(), self.variables.len());
                self.variables.push(Variable { key, value });
                None
            }
        }
    }

    /// Look up a value, returning the empty string for unknown keys
    pub fn lookup(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Look up a value, distinguishing unknown keys from empty values
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&idx| self.variables[idx].value.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate over variables in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }
}

impl<K, V> Extend<(K, V)> for VariableStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.upsert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for VariableStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_upsert_and_lookup() {
        let mut store = VariableStore::new();
        assert_eq!(store.upsert("name", "World"), None);
        assert_eq!(store.lookup("name"), "World");
        assert!(store.contains("name"));
    }

    #[test]
    fn test_lookup_unknown_is_empty() {
        let store = VariableStore::new();
        assert_eq!(store.lookup("missing"), "");
        assert_eq!(store.get("missing"), None);
        assert!(!store.contains("missing"));
    }

    #[test]
    fn test_upsert_overwrites_in_place() {
        let mut store = VariableStore::new();
        store.upsert("a", "1");
        store.upsert("b", "2");
        assert_eq!(store.upsert("a", "3"), Some("1".to_string()));

        assert_eq!(store.len(), 2);
        assert_eq!(store.lookup("a"), "3");
        let keys: Vec<_> = store.iter().map(|v| v.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_repeated_upsert_is_idempotent() {
        let mut store = VariableStore::new();
        store.upsert("x", "1");
        store.upsert("x", "1");
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("x"), "1");
    }

    #[test]
    fn test_keys_are_exact() {
        let store: VariableStore = [("Name", "upper"), ("name ", "padded")].into_iter().collect();
        assert_eq!(store.lookup("name"), "");
        assert_eq!(store.lookup("Name"), "upper");
        assert_eq!(store.lookup("name "), "padded");
    }

    #[test]
    fn test_empty_value_is_present() {
        let store: VariableStore = [("empty", "")].into_iter().collect();
        assert!(store.contains("empty"));
        assert_eq!(store.get("empty"), Some(""));
        assert!(!store.is_empty());
    }
}
