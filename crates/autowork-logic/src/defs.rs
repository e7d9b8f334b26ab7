//! Name-keyed definition registries.
//!
//! Work types, passions and similar reference data are identified by a
//! stable name. Settings refer to them by that name so a saved
//! configuration survives catalog changes; [`DefBacked`] resolves such a
//! reference against the live [`DefRegistry`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reference data with a unique name.
pub trait NamedDef {
    fn def_name(&self) -> &str;
}

/// A value backed by a named definition.
///
/// Implementors only say which name they refer to; resolution is shared.
/// `None` means the definition is missing from the registry, which is an
/// expected state after the host removed it.
pub trait DefBacked {
    type Def: NamedDef;

    fn def_ref(&self) -> Option<&str>;

    fn resolve<'a>(&self, defs: &'a DefRegistry<Self::Def>) -> Option<&'a Self::Def> {
        self.def_ref().and_then(|name| defs.get(name))
    }
}

/// Ordered registry of definitions with lookup by name.
///
/// Insertion order is preserved and is the index used by typed ids such as
/// [`crate::work::WorkTypeId`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefRegistry<T> {
    defs: Vec<T>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl<T: NamedDef> DefRegistry<T> {
    pub fn new() -> Self {
        Self {
            defs: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Add a definition. A definition with an already-registered name
    /// replaces the earlier one in place.
    pub fn insert(&mut self, def: T) -> usize {
        let name = def.def_name().to_string();
        if let Some(&idx) = self.by_name.get(&name) {
            self.defs[idx] = def;
            return idx;
        }
        let idx = self.defs.len();
        self.defs.push(def);
        self.by_name.insert(name, idx);
        idx
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index_of(name).map(|idx| &self.defs[idx])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        if self.by_name.len() == self.defs.len() {
            self.by_name.get(name).copied()
        } else {
            // Freshly deserialized registry: index not built yet
            self.defs.iter().position(|d| d.def_name() == name)
        }
    }

    pub fn by_index(&self, idx: usize) -> Option<&T> {
        self.defs.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Rebuild the name index, e.g. after deserialization.
    pub fn reindex(&mut self) {
        self.by_name = self
            .defs
            .iter()
            .enumerate()
            .map(|(idx, d)| (d.def_name().to_string(), idx))
            .collect();
    }

    /// Names in registry order.
    pub fn names(&self) -> Vec<&str> {
        self.defs.iter().map(|d| d.def_name()).collect()
    }
}

impl<T: NamedDef> Default for DefRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: NamedDef> FromIterator<T> for DefRegistry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = Self::new();
        for def in iter {
            registry.insert(def);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Thing(&'static str, u32);

    impl NamedDef for Thing {
        fn def_name(&self) -> &str {
            self.0
        }
    }

    struct ThingRef(Option<&'static str>);

    impl DefBacked for ThingRef {
        type Def = Thing;

        fn def_ref(&self) -> Option<&str> {
            self.0
        }
    }

    #[test]
    fn test_lookup_and_replace() {
        let mut reg: DefRegistry<Thing> = [Thing("a", 1), Thing("b", 2)].into_iter().collect();
        assert_eq!(reg.get("b"), Some(&Thing("b", 2)));
        assert_eq!(reg.insert(Thing("a", 9)), 0);
        assert_eq!(reg.get("a").map(|t| t.1), Some(9));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.names(), vec!["a", "b"]);
    }

    #[test]
    fn test_def_backed_resolution() {
        let reg: DefRegistry<Thing> = [Thing("mining", 1)].into_iter().collect();
        assert!(ThingRef(Some("mining")).resolve(&reg).is_some());
        assert!(ThingRef(Some("gone")).resolve(&reg).is_none());
        assert!(ThingRef(None).resolve(&reg).is_none());
    }
}
