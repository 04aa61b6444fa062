//! Read-only decorator over any bijection.

use std::fmt::Debug;

use crate::bijection::Bijection;
use crate::error::{Error, Result};
use crate::pairing::Pairing;

/// Forwards every read to the wrapped bijection and rejects every mutation
/// with [`Error::ReadOnly`], leaving the backing state untouched.
///
/// Views handed out through it borrow immutably, so they are read-only by
/// construction; nothing is cached because Rust views are built on demand.
pub struct ReadOnly<'a, T: ?Sized>(&'a T);

impl<'a, T: ?Sized> ReadOnly<'a, T> {
    pub fn new(inner: &'a T) -> Self {
        ReadOnly(inner)
    }
}

impl<T: ?Sized> Clone for ReadOnly<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ReadOnly<'_, T> {}

impl<A: Eq, B: Eq, T: Bijection<A, B> + ?Sized> Bijection<A, B> for ReadOnly<'_, T> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn get_by_first(&self, first: &A) -> Option<&Pairing<A, B>> {
        self.0.get_by_first(first)
    }

    fn get_by_second(&self, second: &B) -> Option<&Pairing<A, B>> {
        self.0.get_by_second(second)
    }

    fn contains(&self, first: &A, second: &B) -> bool {
        self.0.contains(first, second)
    }

    fn contains_pairing(&self, pairing: &Pairing<A, B>) -> bool {
        self.0.contains_pairing(pairing)
    }

    fn insert(&mut self, _first: A, _second: B) -> Result<bool> {
        Err(Error::ReadOnly)
    }

    fn insert_or_fail(&mut self, _first: A, _second: B) -> Result<()>
    where
        A: Debug,
        B: Debug,
    {
        Err(Error::ReadOnly)
    }

    fn remove(&mut self, _first: &A, _second: &B) -> Result<Option<Pairing<A, B>>> {
        Err(Error::ReadOnly)
    }

    fn remove_by_first(&mut self, _first: &A) -> Result<Option<Pairing<A, B>>> {
        Err(Error::ReadOnly)
    }

    fn remove_by_second(&mut self, _second: &B) -> Result<Option<Pairing<A, B>>> {
        Err(Error::ReadOnly)
    }

    fn remove_pairing(&mut self, _pairing: &Pairing<A, B>) -> Result<Option<Pairing<A, B>>> {
        Err(Error::ReadOnly)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Pairing<A, B>> + '_> {
        self.0.iter()
    }
}
