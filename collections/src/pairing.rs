use serde::{Deserialize, Serialize};

/// Names one side of a bijective association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    First,
    Second,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::First => write!(f, "first"),
            Side::Second => write!(f, "second"),
        }
    }
}

/// One immutable (first, second) association within a bijection.
///
/// Equality and hashing are value-based over both elements jointly, matching
/// how the owning bijection's indexes compare keys. Replacing a pairing means
/// removing the old one and inserting a new one; there are no setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pairing<A, B> {
    first: A,
    second: B,
}

impl<A, B> Pairing<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Pairing { first, second }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn as_refs(&self) -> (&A, &B) {
        (&self.first, &self.second)
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }

    /// The same association viewed from the other direction.
    pub fn swapped(self) -> Pairing<B, A> {
        Pairing {
            first: self.second,
            second: self.first,
        }
    }
}

impl<T> Pairing<T, T> {
    /// Side-indexed accessor, available when both elements share a type.
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }
}

impl<A, B> From<(A, B)> for Pairing<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Pairing::new(first, second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_equality_over_both_elements() {
        let p = Pairing::new("x".to_string(), 1);
        assert_eq!(p, Pairing::new("x".to_string(), 1));
        assert_ne!(p, Pairing::new("x".to_string(), 2));
        assert_ne!(p, Pairing::new("y".to_string(), 1));
    }

    #[test]
    fn accessors() {
        let p = Pairing::new(7u32, 9u32);
        assert_eq!(*p.first(), 7);
        assert_eq!(*p.second(), 9);
        assert_eq!(p.as_refs(), (&7, &9));
        assert_eq!(*p.get(Side::First), 7);
        assert_eq!(*p.get(Side::Second), 9);
        assert_eq!(p.swapped(), Pairing::new(9, 7));
        assert_eq!(p.into_parts(), (7, 9));
    }
}
