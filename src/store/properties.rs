//! Namespaced property store
//!
//! An in-memory, section-scoped key-value store populated by parsing a
//! simple INI-like properties format. Keys and namespaces keep their
//! insertion order.

use std::fs;
use std::path::Path;

use linked_hash_map::LinkedHashMap;

use crate::parser;
use crate::store::error::PropertyError;

/// Name of the namespace that receives key-value pairs appearing before any
/// `[section]` header.
pub const DEFAULT_NAMESPACE: &str = "_default_";

/// An insertion-ordered key-value mapping holding one namespace's properties.
pub type Namespace = LinkedHashMap<String, String>;

/// Section-scoped property store with a "current namespace" cursor.
///
/// Every operation comes in two forms: one taking an explicit namespace
/// name, which fails with [`PropertyError::NamespaceNotFound`] when that
/// namespace is absent, and a `*_current` form operating on the namespace
/// the cursor rests on. The cursor always names a live namespace: it starts
/// on [`DEFAULT_NAMESPACE`], only [`set_namespace`](Self::set_namespace)
/// (which rejects unknown names) and parsed `[section]` headers move it, and
/// namespaces are never deleted.
///
/// Namespace creation is a parsing concern only; there is no public way to
/// add one.
#[derive(Debug, Clone)]
pub struct PropertyStore {
    /// Namespaces in declaration order, each holding its keys in insertion
    /// order
    namespaces: LinkedHashMap<String, Namespace>,
    /// The namespace that unqualified operations act on
    current: String,
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore {
    /// Create an empty store holding only the default namespace.
    pub fn new() -> Self {
        let mut namespaces = LinkedHashMap::new();
        namespaces.insert(DEFAULT_NAMESPACE.to_string(), Namespace::new());

        PropertyStore {
            namespaces,
            current: DEFAULT_NAMESPACE.to_string(),
        }
    }

    /// Parse properties source text into a new store.
    ///
    /// Parsing never fails: malformed lines are dropped without an error.
    /// After parsing, the cursor rests on the last `[section]` header seen,
    /// or on the default namespace if the source had none.
    pub fn parse(source: &str) -> Self {
        let mut store = PropertyStore::new();
        parser::parse_into(&mut store, source);
        store
    }

    /// Read and parse a properties file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PropertyError> {
        let content = fs::read_to_string(path)?;
        Ok(PropertyStore::parse(&content))
    }

    /// Move the cursor to an existing namespace.
    pub fn set_namespace(&mut self, name: &str) -> Result<(), PropertyError> {
        if !self.namespaces.contains_key(name) {
            return Err(PropertyError::NamespaceNotFound(name.to_string()));
        }

        self.current = name.to_string();
        Ok(())
    }

    /// Name of the namespace the cursor rests on.
    pub fn current_namespace(&self) -> &str {
        &self.current
    }

    /// Check if a namespace exists.
    pub fn namespace_exists(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    /// Get the count of namespaces.
    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Namespace names in declaration order.
    pub fn namespace_names(&self) -> Vec<&str> {
        self.namespaces.keys().map(String::as_str).collect()
    }

    /// Replace any namespace of this name with a fresh empty one and move
    /// the cursor there. `[section]` headers resolve here during parsing.
    pub(crate) fn open_namespace(&mut self, name: &str) {
        self.namespaces.insert(name.to_string(), Namespace::new());
        self.current = name.to_string();
    }

    fn namespace(&self, name: &str) -> Result<&Namespace, PropertyError> {
        self.namespaces
            .get(name)
            .ok_or_else(|| PropertyError::NamespaceNotFound(name.to_string()))
    }

    fn namespace_mut(&mut self, name: &str) -> Result<&mut Namespace, PropertyError> {
        self.namespaces
            .get_mut(name)
            .ok_or_else(|| PropertyError::NamespaceNotFound(name.to_string()))
    }

    /// Look up a key in the given namespace.
    pub fn get(&self, namespace: &str, key: &str) -> Result<&str, PropertyError> {
        self.namespace(namespace)?
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| PropertyError::KeyNotFound {
                namespace: namespace.to_string(),
                key: key.to_string(),
            })
    }

    /// Look up a key in the current namespace.
    pub fn get_current(&self, key: &str) -> Result<&str, PropertyError> {
        self.get(&self.current, key)
    }

    /// Set a key in the given namespace, overwriting any existing value.
    ///
    /// Unlike parsing, this never creates a namespace.
    pub fn set(&mut self, namespace: &str, key: &str, value: &str) -> Result<(), PropertyError> {
        self.namespace_mut(namespace)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// Set a key in the current namespace, overwriting any existing value.
    pub fn set_current(&mut self, key: &str, value: &str) {
        self.namespaces
            .entry(self.current.clone())
            .or_insert_with(Namespace::new)
            .insert(key.to_string(), value.to_string());
    }

    /// Remove a key from the given namespace, returning its value. Removing
    /// an absent key is a no-op.
    pub fn remove(&mut self, namespace: &str, key: &str) -> Result<Option<String>, PropertyError> {
        Ok(self.namespace_mut(namespace)?.remove(key))
    }

    /// Remove a key from the current namespace, returning its value.
    pub fn remove_current(&mut self, key: &str) -> Option<String> {
        self.namespaces.get_mut(&self.current)?.remove(key)
    }

    /// Check if a key exists in the given namespace.
    pub fn contains(&self, namespace: &str, key: &str) -> Result<bool, PropertyError> {
        Ok(self.namespace(namespace)?.contains_key(key))
    }

    /// Check if a key exists in the current namespace.
    pub fn contains_current(&self, key: &str) -> bool {
        self.namespaces
            .get(&self.current)
            .map(|ns| ns.contains_key(key))
            .unwrap_or(false)
    }

    /// Remove every key in the given namespace. The namespace itself stays
    /// and remains selectable.
    pub fn clear(&mut self, namespace: &str) -> Result<(), PropertyError> {
        self.namespace_mut(namespace)?.clear();
        Ok(())
    }

    /// Remove every key in the current namespace.
    pub fn clear_current(&mut self) {
        if let Some(ns) = self.namespaces.get_mut(&self.current) {
            ns.clear();
        }
    }

    /// Number of keys in the given namespace.
    pub fn count(&self, namespace: &str) -> Result<usize, PropertyError> {
        Ok(self.namespace(namespace)?.len())
    }

    /// Number of keys in the current namespace.
    pub fn count_current(&self) -> usize {
        self.namespaces
            .get(&self.current)
            .map(|ns| ns.len())
            .unwrap_or(0)
    }

    /// Keys of the given namespace in insertion order.
    pub fn keys(&self, namespace: &str) -> Result<Vec<&str>, PropertyError> {
        Ok(self
            .namespace(namespace)?
            .keys()
            .map(String::as_str)
            .collect())
    }

    /// Keys of the current namespace in insertion order.
    pub fn keys_current(&self) -> Vec<&str> {
        self.keys(&self.current).unwrap_or_default()
    }

    /// Values of the given namespace in insertion order.
    pub fn values(&self, namespace: &str) -> Result<Vec<&str>, PropertyError> {
        Ok(self
            .namespace(namespace)?
            .values()
            .map(String::as_str)
            .collect())
    }

    /// Values of the current namespace in insertion order.
    pub fn values_current(&self) -> Vec<&str> {
        self.values(&self.current).unwrap_or_default()
    }

    /// Key-value pairs of the given namespace in insertion order.
    pub fn iter<'a>(
        &'a self,
        namespace: &str,
    ) -> Result<impl Iterator<Item = (&'a str, &'a str)> + 'a, PropertyError> {
        Ok(self
            .namespace(namespace)?
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Key-value pairs of the current namespace in insertion order.
    pub fn iter_current(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.namespaces
            .get(&self.current)
            .into_iter()
            .flat_map(|ns| ns.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Read a key as a boolean. True exactly when the stored value is the
    /// literal `true`.
    pub fn get_bool(&self, namespace: &str, key: &str) -> Result<bool, PropertyError> {
        Ok(self.get(namespace, key)? == "true")
    }

    /// Read a key from the current namespace as a boolean.
    pub fn get_bool_current(&self, key: &str) -> Result<bool, PropertyError> {
        self.get_bool(&self.current, key)
    }

    /// Read a key as an integer. Values that fail to parse yield 0.
    pub fn get_int(&self, namespace: &str, key: &str) -> Result<i64, PropertyError> {
        Ok(self.get(namespace, key)?.parse::<i64>().unwrap_or(0))
    }

    /// Read a key from the current namespace as an integer.
    pub fn get_int_current(&self, key: &str) -> Result<i64, PropertyError> {
        self.get_int(&self.current, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_has_default_namespace() {
        let store = PropertyStore::new();
        assert_eq!(store.current_namespace(), DEFAULT_NAMESPACE);
        assert_eq!(store.namespace_count(), 1);
        assert!(store.namespace_exists(DEFAULT_NAMESPACE));
        assert_eq!(store.count_current(), 0);
    }

    #[test]
    fn test_set_and_get_current() {
        let mut store = PropertyStore::new();
        store.set_current("key", "value");
        assert_eq!(store.get_current("key").unwrap(), "value");

        store.set_current("key", "other");
        assert_eq!(store.get_current("key").unwrap(), "other");
        assert_eq!(store.count_current(), 1);
    }

    #[test]
    fn test_get_missing_key_fails() {
        let store = PropertyStore::new();
        let err = store.get_current("absent").unwrap_err();
        assert!(matches!(err, PropertyError::KeyNotFound { .. }));
    }

    #[test]
    fn test_explicit_ops_reject_unknown_namespace() {
        let mut store = PropertyStore::new();

        assert!(matches!(
            store.set("nope", "k", "v"),
            Err(PropertyError::NamespaceNotFound(_))
        ));
        assert!(matches!(
            store.get("nope", "k"),
            Err(PropertyError::NamespaceNotFound(_))
        ));
        assert!(matches!(
            store.set_namespace("nope"),
            Err(PropertyError::NamespaceNotFound(_))
        ));

        // the failed set must not have created the namespace
        assert!(!store.namespace_exists("nope"));
    }

    #[test]
    fn test_remove_and_contains() {
        let mut store = PropertyStore::new();
        store.set_current("key", "value");
        assert!(store.contains_current("key"));

        assert_eq!(store.remove_current("key"), Some("value".to_string()));
        assert!(!store.contains_current("key"));
        assert_eq!(store.remove_current("key"), None);
    }

    #[test]
    fn test_clear_keeps_namespace_selectable() {
        let mut store = PropertyStore::parse("[app]\na = 1\nb = 2\n");
        store.clear("app").unwrap();
        assert_eq!(store.count("app").unwrap(), 0);
        assert!(store.set_namespace("app").is_ok());
    }

    #[test]
    fn test_keys_and_values_keep_insertion_order() {
        let mut store = PropertyStore::new();
        store.set_current("one", "1");
        store.set_current("two", "2");
        store.set_current("three", "3");

        assert_eq!(store.keys_current(), vec!["one", "two", "three"]);
        assert_eq!(store.values_current(), vec!["1", "2", "3"]);

        let pairs: Vec<(&str, &str)> = store.iter_current().collect();
        assert_eq!(pairs, vec![("one", "1"), ("two", "2"), ("three", "3")]);
    }

    #[test]
    fn test_typed_getters() {
        let mut store = PropertyStore::new();
        store.set_current("on", "true");
        store.set_current("off", "yes");
        store.set_current("port", "5432");
        store.set_current("junk", "not a number");

        assert!(store.get_bool_current("on").unwrap());
        assert!(!store.get_bool_current("off").unwrap());
        assert_eq!(store.get_int_current("port").unwrap(), 5432);
        assert_eq!(store.get_int_current("junk").unwrap(), 0);
        assert!(store.get_int_current("absent").is_err());
    }
}
