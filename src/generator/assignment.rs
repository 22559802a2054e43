// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The completed, immutable result of a draw.

use std::collections::BTreeMap;

/// Giver → recipient mapping covering every participant exactly once.
///
/// Only the generator constructs these, and only from a complete search
/// state, so every value satisfies the draw invariants. Iteration is sorted
/// by giver name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    pairs: BTreeMap<String, String>,
}

impl Assignment {
    pub(crate) fn from_pairs(pairs: BTreeMap<String, String>) -> Self {
        Self { pairs }
    }

    /// Recipient of `giver`, if `giver` took part.
    pub fn recipient_of(&self, giver: &str) -> Option<&str> {
        self.pairs.get(giver).map(String::as_str)
    }

    /// (giver, recipient) pairs sorted by giver.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.pairs.iter().map(|(g, r)| (g.as_str(), r.as_str()))
    }

    pub fn givers(&self) -> impl Iterator<Item = &str> + '_ {
        self.pairs.keys().map(String::as_str)
    }

    pub fn recipients(&self) -> impl Iterator<Item = &str> + '_ {
        self.pairs.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::collections::btree_map::Iter<'a, String, String>,
        fn((&'a String, &'a String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let as_strs: fn((&'a String, &'a String)) -> (&'a str, &'a str) =
            |(g, r)| (g.as_str(), r.as_str());
        self.pairs.iter().map(as_strs)
    }
}

#[cfg(test)]
impl Assignment {
    /// Build an arbitrary (possibly invalid) mapping for tests.
    pub(crate) fn from_iter_for_test<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self::from_pairs(
            pairs
                .into_iter()
                .map(|(g, r)| (g.to_string(), r.to_string()))
                .collect(),
        )
    }
}
