// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Normalized set of forbidden unordered pairs.

use std::collections::{HashMap, HashSet};

/// Two participant names with no meaningful order.
///
/// The smaller name is always stored first, so `(A, B)` and `(B, A)` are
/// equal and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnorderedPair {
    low: String,
    high: String,
}

impl UnorderedPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both names, smaller first.
    pub fn names(&self) -> (&str, &str) {
        (&self.low, &self.high)
    }

    /// A self-pair can never match a giver/recipient pair.
    pub fn is_self_pair(&self) -> bool {
        self.low == self.high
    }
}

/// Immutable set of forbidden pairs, queryable in either direction.
///
/// Names are not checked against any roster here; a pair naming an unknown
/// participant simply never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenSet {
    /// Symmetric adjacency: `partners[a]` contains `b` iff `{a, b}` is forbidden.
    partners: HashMap<String, HashSet<String>>,
    /// Number of distinct unordered pairs.
    len: usize,
}

impl ForbiddenSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a list of pair declarations.
    ///
    /// Order within a pair and repeated declarations are irrelevant.
    ///
    /// ```
    /// use santa_draw::constraints::ForbiddenSet;
    ///
    /// let set = ForbiddenSet::build([("Chuck", "Laura"), ("Laura", "Chuck")]);
    /// assert_eq!(set.len(), 1);
    /// assert!(set.contains("Laura", "Chuck"));
    /// ```
    pub fn build<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        let mut set = Self::new();
        for (a, b) in pairs {
            set.insert(a.into(), b.into());
        }
        set
    }

    fn insert(&mut self, a: String, b: String) {
        let fresh = self
            .partners
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        if a != b {
            self.partners.entry(b).or_default().insert(a);
        }
        if fresh {
            self.len += 1;
        }
    }

    /// Is `{a, b}` forbidden?
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.partners
            .get(a)
            .is_some_and(|partners| partners.contains(b))
    }

    /// Number of distinct unordered pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All pairs, each reported once, in sorted order.
    pub fn pairs(&self) -> Vec<UnorderedPair> {
        let mut pairs: Vec<UnorderedPair> = self
            .partners
            .iter()
            .flat_map(|(a, partners)| {
                partners
                    .iter()
                    .filter(move |b| a.as_str() <= b.as_str())
                    .map(move |b| UnorderedPair::new(a.as_str(), b.as_str()))
            })
            .collect();
        pairs.sort();
        pairs
    }
}

impl<A: Into<String>, B: Into<String>> FromIterator<(A, B)> for ForbiddenSet {
    fn from_iter<T: IntoIterator<Item = (A, B)>>(iter: T) -> Self {
        Self::build(iter)
    }
}
