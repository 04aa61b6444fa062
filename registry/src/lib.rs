//! Runtime-defined enumeration tokens, registered through a string-keyed
//! bijection.
//!
//! A [`SingletonRegistry`] plays the role of an extensible enum: each key
//! names exactly one [`Singleton`] token, tokens compare by identity, and a
//! key can be retired and redefined at runtime. Single-threaded by design;
//! callers needing shared access must add their own locking around a
//! registry.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use by_address::ByAddress;
use duplex_collections::HashBijection;

type Table = RefCell<HashBijection<String, Singleton>>;

#[derive(Debug)]
struct SingletonData {
    key: String,
    table: Weak<Table>,
}

/// A cheaply clonable identity token for one registration.
///
/// Two tokens are equal only if they stem from the same `get_or_define` call;
/// redefining a removed key yields a fresh, unequal token. Hashing follows
/// the same address identity, which is what keys the registry's backward
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Singleton(ByAddress<Rc<SingletonData>>);

impl Singleton {
    pub fn key(&self) -> &str {
        &self.0.key
    }

    /// Whether the same registry defined both tokens, regardless of key.
    pub fn same_registry(&self, other: &Singleton) -> bool {
        Weak::ptr_eq(&self.0.table, &other.0.table)
    }

    /// Whether this token is still the one its registry holds for its key.
    /// Turns false once the token is removed or its registry is dropped.
    pub fn is_registered(&self) -> bool {
        match self.0.table.upgrade() {
            Some(table) => table
                .borrow()
                .get_by_first(&self.0.key)
                .map_or(false, |pairing| pairing.second() == self),
            None => false,
        }
    }
}

impl std::fmt::Display for Singleton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// String-keyed registry of singleton tokens, backed by a bijection.
pub struct SingletonRegistry {
    table: Rc<Table>,
}

impl SingletonRegistry {
    pub fn new() -> Self {
        SingletonRegistry {
            table: Rc::new(RefCell::new(HashBijection::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.table.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.borrow().is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<Singleton> {
        self.table
            .borrow()
            .get_by_first(&key.to_owned())
            .map(|pairing| pairing.second().clone())
    }

    /// Returns the token registered under `key`, defining it first if absent.
    /// Repeated calls hand back the identical token until the key is removed.
    pub fn get_or_define(&self, key: &str) -> Singleton {
        if let Some(existing) = self.get(key) {
            return existing;
        }
        let token = Singleton(ByAddress(Rc::new(SingletonData {
            key: key.to_owned(),
            table: Rc::downgrade(&self.table),
        })));
        let inserted = self
            .table
            .borrow_mut()
            .insert(key.to_owned(), token.clone());
        assert!(inserted, "key was checked absent and the table has one owner");
        token
    }

    /// Retires a key, returning its token. The token stays usable as a value
    /// but reports `is_registered() == false`.
    pub fn remove(&self, key: &str) -> Option<Singleton> {
        self.table
            .borrow_mut()
            .remove_by_first(&key.to_owned())
            .map(|pairing| pairing.into_parts().1)
    }

    /// Retires a registration looked up by token identity.
    pub fn remove_singleton(&self, token: &Singleton) -> Option<Singleton> {
        self.table
            .borrow_mut()
            .remove_by_second(token)
            .map(|pairing| pairing.into_parts().1)
    }

    pub fn keys(&self) -> Vec<String> {
        self.table.borrow().firsts().cloned().collect()
    }
}

impl Default for SingletonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_or_define_returns_the_identical_token() {
        let registry = SingletonRegistry::new();

        let red = registry.get_or_define("RED");
        let red_again = registry.get_or_define("RED");

        assert_eq!(red, red_again);
        assert_eq!(red.key(), "RED");
        assert!(red.is_registered());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn redefinition_after_removal_is_a_distinct_token() {
        let registry = SingletonRegistry::new();

        let old = registry.get_or_define("RED");
        assert_eq!(registry.remove("RED"), Some(old.clone()));
        assert!(!old.is_registered());

        let fresh = registry.get_or_define("RED");
        assert_ne!(old, fresh);
        assert!(fresh.is_registered());
        // Both generations still name the same registry.
        assert!(old.same_registry(&fresh));
    }

    #[test]
    fn tokens_from_different_registries_are_unrelated() {
        let left = SingletonRegistry::new();
        let right = SingletonRegistry::new();

        let a = left.get_or_define("RED");
        let b = right.get_or_define("RED");

        assert_ne!(a, b);
        assert!(!a.same_registry(&b));
    }

    #[test]
    fn remove_by_token_identity() {
        let registry = SingletonRegistry::new();

        let red = registry.get_or_define("RED");
        let blue = registry.get_or_define("BLUE");

        assert_eq!(registry.remove_singleton(&red), Some(red.clone()));
        assert!(!red.is_registered());
        assert!(blue.is_registered());
        assert_eq!(registry.keys(), vec!["BLUE".to_string()]);

        // Removing a stale token is a no-op.
        assert_eq!(registry.remove_singleton(&red), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn tokens_outlive_their_registry_as_plain_values() {
        let red = {
            let registry = SingletonRegistry::new();
            registry.get_or_define("RED")
        };

        assert_eq!(red.key(), "RED");
        assert!(!red.is_registered());
    }
}
