//! Name to entity lookup tables.
//!
//! The universe owns one registry for global names; every scene owns one
//! for the local names of its children. Console front-ends resolve typed
//! names through [`Registry::get`] and complete partial input with
//! [`Registry::complete`].

use indexmap::IndexMap;
use lineage_core::AnyHandle;

use crate::error::OntologyError;

/// Insertion-ordered map from names to entity handles.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: IndexMap<String, AnyHandle>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` for `handle`.
    ///
    /// # Errors
    ///
    /// [`OntologyError::EmptyName`] for `""`, [`OntologyError::NameTaken`]
    /// if the name already maps to any handle (including `handle` itself).
    pub fn add(&mut self, name: &str, handle: AnyHandle) -> Result<(), OntologyError> {
        if name.is_empty() {
            return Err(OntologyError::EmptyName);
        }
        if self.entries.contains_key(name) {
            return Err(OntologyError::NameTaken {
                name: name.to_owned(),
            });
        }
        self.entries.insert(name.to_owned(), handle);
        Ok(())
    }

    /// The handle registered under `name`.
    pub fn get(&self, name: &str) -> Option<AnyHandle> {
        self.entries.get(name).copied()
    }

    /// Whether `name` is registered.
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove `name`, returning the handle it mapped to.
    pub fn erase(&mut self, name: &str) -> Option<AnyHandle> {
        self.entries.shift_remove(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no name is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// `(name, handle)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, AnyHandle)> + '_ {
        self.entries.iter().map(|(name, handle)| (name.as_str(), *handle))
    }

    /// Every registered name starting with `prefix`, sorted.
    pub fn completions(&self, prefix: &str) -> Vec<&str> {
        let mut matches: Vec<&str> = self.names().filter(|n| n.starts_with(prefix)).collect();
        matches.sort_unstable();
        matches
    }

    /// Longest common prefix of every name starting with `prefix`.
    ///
    /// Returns `prefix` unchanged when nothing matches.
    pub fn complete(&self, prefix: &str) -> String {
        let matches = self.completions(prefix);
        let Some((first, rest)) = matches.split_first() else {
            return prefix.to_owned();
        };
        let mut common = first.len();
        for name in rest {
            common = first
                .char_indices()
                .zip(name.chars())
                .take_while(|((_, a), b)| a == b)
                .last()
                .map_or(0, |((i, a), _)| i + a.len_utf8())
                .min(common);
        }
        first[..common].to_owned()
    }

    /// All registered names joined by single spaces.
    pub fn entity_names(&self) -> String {
        self.names().collect::<Vec<_>>().join(" ")
    }
}
