//! Process-wide deduplication of template instantiations.

use log::debug;
use std::collections::HashMap;

/// Exact-string map from canonical instantiation spelling to its generated
/// identifier.
///
/// Entries are created lazily on first encounter and never removed, so each
/// distinct instantiation is traversed and emitted once no matter how many
/// members reference it. Ownership lives in the classification context; the
/// single `&mut` holder is the only writer.
#[derive(Debug, Default)]
pub struct TemplateInstantiationRegistry {
    entries: HashMap<String, String>,
}

impl TemplateInstantiationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier already assigned to a canonical spelling, if any.
    pub fn identifier(&self, spelling: &str) -> Option<&str> {
        self.entries.get(spelling).map(String::as_str)
    }

    /// Assign an identifier for a spelling seen for the first time.
    ///
    /// Callers insert before walking the instantiation's members; a
    /// self-referential instantiation then resolves to a hit instead of
    /// recursing without bound.
    pub fn insert(&mut self, spelling: &str, container_class: &str, member_name: &str) -> String {
        let identifier = format!("{}_{}_{}", container_class, member_name, mangle(spelling));
        debug!("registered instantiation '{spelling}' as {identifier}");
        self.entries.insert(spelling.to_string(), identifier.clone());
        identifier
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Substitute underscores for the characters of an instantiation spelling
/// that are not valid in a generated symbol.
pub fn mangle(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '<' | '>' | ',' | ':' | ' ' | '*' => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mangle_replaces_symbol_unsafe_characters() {
        assert_eq!(
            mangle("MyTemplate<int, Ball *>"),
            "MyTemplate_int__Ball___"
        );
        assert_eq!(mangle("a::b"), "a__b");
    }

    #[test]
    fn test_insert_scopes_by_class_and_member() {
        let mut registry = TemplateInstantiationRegistry::new();
        let id = registry.insert("Wrap<int>", "Ball", "state");
        assert_eq!(id, "Ball_state_Wrap_int_");
    }

    #[test]
    fn test_lookup_is_exact_string_keyed() {
        let mut registry = TemplateInstantiationRegistry::new();
        registry.insert("Wrap<int>", "Ball", "state");
        assert!(registry.identifier("Wrap<int>").is_some());
        assert!(registry.identifier("Wrap< int >").is_none());
    }

    #[test]
    fn test_entries_are_immutable_after_insert() {
        let mut registry = TemplateInstantiationRegistry::new();
        let first = registry.insert("Wrap<int>", "Ball", "state");
        // A second encounter goes through identifier(), not insert(); the
        // stored mapping is what every later member sees.
        assert_eq!(registry.identifier("Wrap<int>"), Some(first.as_str()));
        assert_eq!(registry.len(), 1);
    }
}
