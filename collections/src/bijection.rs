//! Two-way unique mapping backed by a pair of mutually consistent indexes.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::index::MapIndex;
use crate::pairing::{Pairing, Side};

/// The storage-independent bidirectional-mapping contract.
///
/// Conflicting inserts and missing keys are ordinary outcomes (`Ok(false)`,
/// `Ok(None)`); `Err` is reserved for the opt-in strict insert and for
/// read-only wrappers rejecting mutation. Removal is atomic across both
/// underlying indexes: either the pairing disappears from both or the
/// operation reports that nothing matched.
pub trait Bijection<A: Eq, B: Eq> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The pairing holding `first` on its first side, if any.
    fn get_by_first(&self, first: &A) -> Option<&Pairing<A, B>>;

    /// The pairing holding `second` on its second side, if any.
    fn get_by_second(&self, second: &B) -> Option<&Pairing<A, B>>;

    fn contains(&self, first: &A, second: &B) -> bool {
        self.get_by_first(first)
            .map_or(false, |pairing| pairing.second() == second)
    }

    /// Consults both sides; if they disagree about the pairing's existence
    /// the bijective state is corrupt and this panics rather than answering.
    fn contains_pairing(&self, pairing: &Pairing<A, B>) -> bool {
        let by_first = self.get_by_first(pairing.first()) == Some(pairing);
        let by_second = self.get_by_second(pairing.second()) == Some(pairing);
        if by_first != by_second {
            panic!("bijection indexes disagree about a pairing's existence");
        }
        by_first
    }

    /// Inserts unless either element already participates in a pairing.
    /// `Ok(false)` means a conflicting pairing occupies a slot and nothing
    /// was mutated.
    fn insert(&mut self, first: A, second: B) -> Result<bool>;

    /// [`Bijection::insert`] taking an already-built pairing.
    fn insert_pairing(&mut self, pairing: Pairing<A, B>) -> Result<bool> {
        let (first, second) = pairing.into_parts();
        self.insert(first, second)
    }

    /// Like [`Bijection::insert`], but a conflict is an error naming the
    /// occupied side and the pairing holding it.
    fn insert_or_fail(&mut self, first: A, second: B) -> Result<()>
    where
        A: Debug,
        B: Debug;

    /// Removes the exact pairing `(first, second)`, returning it.
    fn remove(&mut self, first: &A, second: &B) -> Result<Option<Pairing<A, B>>>;

    /// Removes whichever pairing holds `first`, returning it.
    fn remove_by_first(&mut self, first: &A) -> Result<Option<Pairing<A, B>>>;

    /// Removes whichever pairing holds `second`, returning it.
    fn remove_by_second(&mut self, second: &B) -> Result<Option<Pairing<A, B>>>;

    fn remove_pairing(&mut self, pairing: &Pairing<A, B>) -> Result<Option<Pairing<A, B>>>;

    /// Live view over all stored pairings.
    fn iter(&self) -> Box<dyn Iterator<Item = &Pairing<A, B>> + '_>;

    /// Live view over every first element.
    fn firsts<'a>(&'a self) -> Box<dyn Iterator<Item = &'a A> + 'a>
    where
        B: 'a,
    {
        Box::new(self.iter().map(Pairing::first))
    }

    /// Live view over every second element.
    fn seconds<'a>(&'a self) -> Box<dyn Iterator<Item = &'a B> + 'a>
    where
        A: 'a,
    {
        Box::new(self.iter().map(Pairing::second))
    }

    /// Snapshot of all pairings; no live binding to the bijection.
    fn to_vec(&self) -> Vec<Pairing<A, B>>
    where
        A: Clone,
        B: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Snapshot as one `(first, second)` row per pairing.
    fn to_rows(&self) -> Vec<(A, B)>
    where
        A: Clone,
        B: Clone,
    {
        self.iter()
            .map(|pairing| (pairing.first().clone(), pairing.second().clone()))
            .collect()
    }

    /// Snapshot as two parallel columns, firsts and seconds.
    fn to_columns(&self) -> (Vec<A>, Vec<B>)
    where
        A: Clone,
        B: Clone,
    {
        self.iter()
            .map(|pairing| (pairing.first().clone(), pairing.second().clone()))
            .unzip()
    }
}

/// Map-backed bijection.
///
/// The forward index owns each [`Pairing`]; the backward index stores the
/// back-pointer from second element to first. Both indexes are private to
/// this struct and only ever mutated together, so the bijectivity invariant
/// can only be broken by handing [`MapBijection::with_indexes`] inconsistent
/// maps, which it rejects up front.
///
/// Iteration order is whatever the chosen [`MapIndex`] provides; see
/// [`HashBijection`] and [`OrdBijection`].
#[derive(Debug, Clone)]
pub struct MapBijection<A, B, F = HashMap<A, Pairing<A, B>>, R = HashMap<B, A>> {
    forward: F,
    backward: R,
    keys: PhantomData<(A, B)>,
}

/// Hash-backed bijection, the default flavor.
pub type HashBijection<A, B> = MapBijection<A, B>;

/// Ordered bijection; iterates pairings in ascending order of first element.
pub type OrdBijection<A, B> = MapBijection<A, B, BTreeMap<A, Pairing<A, B>>, BTreeMap<B, A>>;

impl<A, B, F, R> MapBijection<A, B, F, R>
where
    A: Clone + Eq,
    B: Clone + Eq,
    F: MapIndex<A, Pairing<A, B>>,
    R: MapIndex<B, A>,
{
    pub fn new() -> Self {
        MapBijection {
            forward: F::default(),
            backward: R::default(),
            keys: PhantomData,
        }
    }

    /// Wraps caller-supplied indexes, auditing them for bijectivity first.
    ///
    /// This is the one boundary where outside code can present non-bijective
    /// state through ordinary use, so the audit runs eagerly and the pair is
    /// rejected with [`Error::Inconsistent`] instead of being adopted.
    pub fn with_indexes(forward: F, backward: R) -> Result<Self> {
        let bijection = MapBijection {
            forward,
            backward,
            keys: PhantomData,
        };
        bijection.verify()?;
        Ok(bijection)
    }

    /// Full bijectivity audit: equal cardinality, every stored pairing keyed
    /// by its own first element, and every second element linked back to it.
    pub fn verify(&self) -> Result<()> {
        if self.forward.len() != self.backward.len() {
            return Err(Error::Inconsistent(format!(
                "index sizes diverge: {} forward vs {} backward",
                self.forward.len(),
                self.backward.len()
            )));
        }
        for (first, pairing) in self.forward.iter() {
            if pairing.first() != first {
                return Err(Error::Inconsistent(
                    "forward index keys a pairing by a foreign element".to_string(),
                ));
            }
            if self.backward.get(pairing.second()) != Some(first) {
                return Err(Error::Inconsistent(
                    "backward index misses or contradicts a stored pairing".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        assert_eq!(
            self.forward.len(),
            self.backward.len(),
            "bijection index sizes diverged"
        );
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_by_first(&self, first: &A) -> Option<&Pairing<A, B>> {
        self.forward.get(first)
    }

    pub fn get_by_second(&self, second: &B) -> Option<&Pairing<A, B>> {
        let first = self.backward.get(second)?;
        let pairing = self
            .forward
            .get(first)
            .expect("backward index links to an element absent from the forward index");
        assert!(
            pairing.second() == second,
            "backward index links to a pairing holding a different second element"
        );
        Some(pairing)
    }

    pub fn contains(&self, first: &A, second: &B) -> bool {
        self.get_by_first(first)
            .map_or(false, |pairing| pairing.second() == second)
    }

    pub fn contains_pairing(&self, pairing: &Pairing<A, B>) -> bool {
        let by_first = self.forward.get(pairing.first()) == Some(pairing);
        let by_second = self.backward.get(pairing.second()) == Some(pairing.first());
        assert!(
            by_first == by_second,
            "bijection indexes disagree about a pairing's existence"
        );
        by_first
    }

    /// Inserts `(first, second)` unless either element is already taken.
    /// Returns whether insertion occurred; a conflict mutates neither index.
    pub fn insert(&mut self, first: A, second: B) -> bool {
        if self.forward.contains(&first) || self.backward.contains(&second) {
            return false;
        }
        let pairing = Pairing::new(first, second);
        let displaced = self
            .backward
            .insert(pairing.second().clone(), pairing.first().clone());
        assert!(displaced.is_none(), "backward slot was checked vacant");
        let displaced = self.forward.insert(pairing.first().clone(), pairing);
        assert!(displaced.is_none(), "forward slot was checked vacant");
        true
    }

    /// [`MapBijection::insert`] taking an already-built pairing.
    pub fn insert_pairing(&mut self, pairing: Pairing<A, B>) -> bool {
        let (first, second) = pairing.into_parts();
        self.insert(first, second)
    }

    /// Strict insert: a conflicting pairing is an [`Error::Conflict`] naming
    /// the occupied side.
    pub fn insert_or_fail(&mut self, first: A, second: B) -> Result<()>
    where
        A: Debug,
        B: Debug,
    {
        if let Some(existing) = self.forward.get(&first) {
            return Err(Error::Conflict {
                side: Side::First,
                existing: format!("{:?}", existing),
            });
        }
        if self.backward.contains(&second) {
            let existing = self
                .get_by_second(&second)
                .expect("backward index holds the element");
            return Err(Error::Conflict {
                side: Side::Second,
                existing: format!("{:?}", existing),
            });
        }
        let inserted = self.insert(first, second);
        assert!(inserted, "both slots were checked vacant");
        Ok(())
    }

    /// The displacing insert: evicts whatever pairings currently hold `first`
    /// or `second`, returns them, and installs the new association.
    pub fn insert_overwriting(
        &mut self,
        first: A,
        second: B,
    ) -> (Option<Pairing<A, B>>, Option<Pairing<A, B>>) {
        let evicted_by_first = self.remove_by_first(&first);
        let evicted_by_second = self.remove_by_second(&second);
        let inserted = self.insert(first, second);
        assert!(inserted, "both slots were just vacated");
        (evicted_by_first, evicted_by_second)
    }

    /// Removes the exact pairing `(first, second)` from both indexes.
    pub fn remove(&mut self, first: &A, second: &B) -> Option<Pairing<A, B>> {
        if self.contains(first, second) {
            self.remove_by_first(first)
        } else {
            None
        }
    }

    /// Removes whichever pairing holds `first`, from both indexes.
    pub fn remove_by_first(&mut self, first: &A) -> Option<Pairing<A, B>> {
        let pairing = self.forward.remove(first)?;
        let linked = self
            .backward
            .remove(pairing.second())
            .expect("backward index lost a stored pairing's second element");
        assert!(
            &linked == pairing.first(),
            "backward index linked a second element to a different first element"
        );
        Some(pairing)
    }

    /// Removes whichever pairing holds `second`, from both indexes.
    pub fn remove_by_second(&mut self, second: &B) -> Option<Pairing<A, B>> {
        let first = self.backward.remove(second)?;
        let pairing = self
            .forward
            .remove(&first)
            .expect("forward index lost a pairing still linked from the backward index");
        assert!(
            pairing.second() == second,
            "forward index held a pairing with a different second element"
        );
        Some(pairing)
    }

    pub fn remove_pairing(&mut self, pairing: &Pairing<A, B>) -> Option<Pairing<A, B>> {
        if self.contains_pairing(pairing) {
            self.remove_by_first(pairing.first())
        } else {
            None
        }
    }

    /// Keeps only the pairings `keep` approves of. Every discarded pairing
    /// goes through the same two-index removal and re-validation as
    /// [`MapBijection::remove_by_first`].
    pub fn retain(&mut self, mut keep: impl FnMut(&Pairing<A, B>) -> bool) {
        let doomed: Vec<A> = self
            .forward
            .iter()
            .filter(|(_, pairing)| !keep(pairing))
            .map(|(first, _)| first.clone())
            .collect();
        for first in &doomed {
            let removed = self.remove_by_first(first);
            assert!(removed.is_some(), "pairing was present moments ago");
        }
    }

    pub fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pairing<A, B>> + '_ {
        self.forward.iter().map(|(_, pairing)| pairing)
    }

    pub fn firsts(&self) -> impl Iterator<Item = &A> + '_ {
        self.forward.iter().map(|(first, _)| first)
    }

    pub fn seconds(&self) -> impl Iterator<Item = &B> + '_ {
        self.backward.iter().map(|(second, _)| second)
    }

    pub fn to_vec(&self) -> Vec<Pairing<A, B>> {
        self.iter().cloned().collect()
    }

    pub fn to_rows(&self) -> Vec<(A, B)> {
        self.iter()
            .map(|pairing| (pairing.first().clone(), pairing.second().clone()))
            .collect()
    }

    pub fn to_columns(&self) -> (Vec<A>, Vec<B>) {
        self.iter()
            .map(|pairing| (pairing.first().clone(), pairing.second().clone()))
            .unzip()
    }
}

impl<A, B, F, R> Default for MapBijection<A, B, F, R>
where
    A: Clone + Eq,
    B: Clone + Eq,
    F: MapIndex<A, Pairing<A, B>>,
    R: MapIndex<B, A>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, B, F, R> Bijection<A, B> for MapBijection<A, B, F, R>
where
    A: Clone + Eq,
    B: Clone + Eq,
    F: MapIndex<A, Pairing<A, B>>,
    R: MapIndex<B, A>,
{
    fn len(&self) -> usize {
        MapBijection::len(self)
    }

    fn get_by_first(&self, first: &A) -> Option<&Pairing<A, B>> {
        MapBijection::get_by_first(self, first)
    }

    fn get_by_second(&self, second: &B) -> Option<&Pairing<A, B>> {
        MapBijection::get_by_second(self, second)
    }

    fn contains(&self, first: &A, second: &B) -> bool {
        MapBijection::contains(self, first, second)
    }

    fn contains_pairing(&self, pairing: &Pairing<A, B>) -> bool {
        MapBijection::contains_pairing(self, pairing)
    }

    fn insert(&mut self, first: A, second: B) -> Result<bool> {
        Ok(MapBijection::insert(self, first, second))
    }

    fn insert_pairing(&mut self, pairing: Pairing<A, B>) -> Result<bool> {
        Ok(MapBijection::insert_pairing(self, pairing))
    }

    fn insert_or_fail(&mut self, first: A, second: B) -> Result<()>
    where
        A: Debug,
        B: Debug,
    {
        MapBijection::insert_or_fail(self, first, second)
    }

    fn remove(&mut self, first: &A, second: &B) -> Result<Option<Pairing<A, B>>> {
        Ok(MapBijection::remove(self, first, second))
    }

    fn remove_by_first(&mut self, first: &A) -> Result<Option<Pairing<A, B>>> {
        Ok(MapBijection::remove_by_first(self, first))
    }

    fn remove_by_second(&mut self, second: &B) -> Result<Option<Pairing<A, B>>> {
        Ok(MapBijection::remove_by_second(self, second))
    }

    fn remove_pairing(&mut self, pairing: &Pairing<A, B>) -> Result<Option<Pairing<A, B>>> {
        Ok(MapBijection::remove_pairing(self, pairing))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Pairing<A, B>> + '_> {
        Box::new(MapBijection::iter(self))
    }
}

impl<'a, A, B, F, R> IntoIterator for &'a MapBijection<A, B, F, R>
where
    A: Clone + Eq,
    B: Clone + Eq,
    F: MapIndex<A, Pairing<A, B>>,
    R: MapIndex<B, A>,
{
    type Item = &'a Pairing<A, B>;
    type IntoIter = Box<dyn Iterator<Item = &'a Pairing<A, B>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl<A, B, F, R> Extend<(A, B)> for MapBijection<A, B, F, R>
where
    A: Clone + Eq,
    B: Clone + Eq,
    F: MapIndex<A, Pairing<A, B>>,
    R: MapIndex<B, A>,
{
    /// Displacing semantics: the last association involving an element wins.
    fn extend<I: IntoIterator<Item = (A, B)>>(&mut self, entries: I) {
        for (first, second) in entries {
            self.insert_overwriting(first, second);
        }
    }
}

impl<A, B, F, R> FromIterator<(A, B)> for MapBijection<A, B, F, R>
where
    A: Clone + Eq,
    B: Clone + Eq,
    F: MapIndex<A, Pairing<A, B>>,
    R: MapIndex<B, A>,
{
    fn from_iter<I: IntoIterator<Item = (A, B)>>(entries: I) -> Self {
        let mut bijection = Self::new();
        bijection.extend(entries);
        bijection
    }
}

impl<A, B, F, R> serde::Serialize for MapBijection<A, B, F, R>
where
    A: Clone + Eq + serde::Serialize,
    B: Clone + Eq + serde::Serialize,
    F: MapIndex<A, Pairing<A, B>>,
    R: MapIndex<B, A>,
{
    /// Serializes as a sequence of `(first, second)` pairs.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(Pairing::as_refs))
    }
}

impl<'de, A, B, F, R> serde::Deserialize<'de> for MapBijection<A, B, F, R>
where
    A: Clone + Eq + Debug + serde::Deserialize<'de>,
    B: Clone + Eq + Debug + serde::Deserialize<'de>,
    F: MapIndex<A, Pairing<A, B>>,
    R: MapIndex<B, A>,
{
    /// Rebuilds through the strict insert, so an input sequence that repeats
    /// an element on either side is a deserialization error.
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let entries = Vec::<(A, B)>::deserialize(deserializer)?;
        let mut bijection = Self::new();
        for (first, second) in entries {
            bijection
                .insert_or_fail(first, second)
                .map_err(serde::de::Error::custom)?;
        }
        Ok(bijection)
    }
}
