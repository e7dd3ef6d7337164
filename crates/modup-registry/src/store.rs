//! The in-memory registry store.
//!
//! A [`NameRegistry`] holds two insertion-ordered indexes over the same
//! logical set of entries: `hashes` (name → hash) and `names`
//! (hash → name). The two maps are written independently by [`add`] and
//! are **not** a strict bijection. The registry file format relies on the
//! asymmetry:
//!
//! - a bare-name line records its derived hash in `names` only;
//! - overwriting `names[hash]` with a new name leaves the old name's
//!   `hashes` key in place as a stale entry.
//!
//! Both behaviours are load-bearing for the merge engine, which targets
//! stale entries by either key. Do not collapse the two maps into one
//! table of pairs.
//!
//! [`add`]: NameRegistry::add

use indexmap::IndexMap;

/// Bidirectional name/hash index for one registry file.
///
/// Serialization iterates `names` in encounter order, so entries come back
/// out in the order their hashes were first recorded in the input text.
#[derive(Debug, Default, Clone)]
pub struct NameRegistry {
    /// name → hash. Tilde-suffixed names are keyed in lower case as well.
    hashes: IndexMap<String, i32>,
    /// hash → name, in encounter order.
    names: IndexMap<i32, String>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The name assigned to `hash`, if any.
    pub fn get_name(&self, hash: i32) -> Option<&str> {
        self.names.get(&hash).map(String::as_str)
    }

    /// The hash assigned to `name`, if any.
    ///
    /// This is a registry lookup only; it never derives a hash. Names that
    /// entered the registry as bare lines are not found here.
    pub fn get_hash(&self, name: &str) -> Option<i32> {
        self.hashes.get(name).copied()
    }

    /// Add a name/hash pair, writing both indexes.
    ///
    /// If `hash` was already assigned a different name, the `names` entry
    /// is overwritten in place (keeping its encounter-order position) and
    /// the old name's `hashes` entry is left behind.
    pub fn add(&mut self, name: impl Into<String>, hash: i32) {
        let name = name.into();
        self.hashes.insert(name.clone(), hash);
        self.names.insert(hash, name);
    }

    /// Record `hash → name` in the `names` index only.
    ///
    /// Used by the codec for bare-name lines, whose hash is derived and
    /// therefore not registered for name lookup.
    pub(crate) fn insert_name(&mut self, hash: i32, name: impl Into<String>) {
        self.names.insert(hash, name.into());
    }

    /// Record `name → hash` in the `hashes` index only.
    pub(crate) fn insert_hash(&mut self, name: impl Into<String>, hash: i32) {
        self.hashes.insert(name.into(), hash);
    }

    /// Remove the `names` entry for `hash`, returning the name it held.
    ///
    /// Encounter order of the remaining entries is preserved.
    pub fn remove_by_hash(&mut self, hash: i32) -> Option<String> {
        self.names.shift_remove(&hash)
    }

    /// Remove the `hashes` entry keyed by `name`, returning its hash.
    pub fn remove_by_name(&mut self, name: &str) -> Option<i32> {
        self.hashes.shift_remove(name)
    }

    /// Iterate `(hash, name)` pairs in encounter order.
    pub fn entries(&self) -> impl Iterator<Item = (i32, &str)> {
        self.names.iter().map(|(hash, name)| (*hash, name.as_str()))
    }

    /// Iterate the registered names in encounter order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    /// Number of entries in the `names` index.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when both indexes are empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.hashes.is_empty()
    }

    /// Drop all entries from both indexes.
    pub fn clear(&mut self) {
        self.hashes.clear();
        self.names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_populates_both_indexes() {
        let mut reg = NameRegistry::new();
        reg.add("creature", 0x10);

        assert_eq!(reg.get_name(0x10), Some("creature"));
        assert_eq!(reg.get_hash("creature"), Some(0x10));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn overwriting_a_hash_leaves_stale_name_key() {
        let mut reg = NameRegistry::new();
        reg.add("old", 0x999);
        reg.add("new", 0x999);

        // names is overwritten, hashes keeps the stale key.
        assert_eq!(reg.get_name(0x999), Some("new"));
        assert_eq!(reg.get_hash("old"), Some(0x999));
        assert_eq!(reg.get_hash("new"), Some(0x999));
    }

    #[test]
    fn overwrite_keeps_encounter_order_position() {
        let mut reg = NameRegistry::new();
        reg.add("first", 1);
        reg.add("second", 2);
        reg.add("replacement", 1);

        let order: Vec<_> = reg.names().collect();
        assert_eq!(order, vec!["replacement", "second"]);
    }

    #[test]
    fn remove_by_hash_preserves_order_of_rest() {
        let mut reg = NameRegistry::new();
        reg.add("a", 1);
        reg.add("b", 2);
        reg.add("c", 3);

        assert_eq!(reg.remove_by_hash(2), Some("b".to_string()));
        let order: Vec<_> = reg.names().collect();
        assert_eq!(order, vec!["a", "c"]);
    }

    #[test]
    fn remove_by_name_targets_hash_index_only() {
        let mut reg = NameRegistry::new();
        reg.add("a", 1);

        assert_eq!(reg.remove_by_name("a"), Some(1));
        assert_eq!(reg.get_hash("a"), None);
        // The names entry is untouched.
        assert_eq!(reg.get_name(1), Some("a"));
    }

    #[test]
    fn empty_registry() {
        let mut reg = NameRegistry::new();
        assert!(reg.is_empty());
        reg.add("x", 7);
        assert!(!reg.is_empty());
        reg.clear();
        assert!(reg.is_empty());
    }
}
