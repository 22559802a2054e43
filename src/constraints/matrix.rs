// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Index-based view of the forbidden pairs for one roster.

use crate::constraints::ForbiddenSet;
use crate::roster::{ParticipantId, Roster};

/// Dense n×n table of forbidden giver/recipient combinations.
///
/// Symmetric by construction. Self-assignment is excluded by
/// [`ExclusionMatrix::allows`] rather than stored on the diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionMatrix {
    size: usize,
    forbidden: Vec<bool>,
}

impl ExclusionMatrix {
    /// Project `set` onto the ids of `roster`.
    ///
    /// Pairs naming someone outside the roster are dropped.
    pub fn compile(roster: &Roster, set: &ForbiddenSet) -> Self {
        let size = roster.len();
        let mut matrix = Self {
            size,
            forbidden: vec![false; size * size],
        };
        for pair in set.pairs() {
            let (a, b) = pair.names();
            if let (Some(a), Some(b)) = (roster.id_of(a), roster.id_of(b)) {
                matrix.forbid(a, b);
            }
        }
        matrix
    }

    fn forbid(&mut self, a: ParticipantId, b: ParticipantId) {
        self.forbidden[a.index() * self.size + b.index()] = true;
        self.forbidden[b.index() * self.size + a.index()] = true;
    }

    /// Number of participants covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Is `{a, b}` a forbidden pair?
    pub fn is_forbidden(&self, a: ParticipantId, b: ParticipantId) -> bool {
        self.forbidden[a.index() * self.size + b.index()]
    }

    /// May `giver` be assigned `recipient`? Excludes self and forbidden pairs.
    pub fn allows(&self, giver: ParticipantId, recipient: ParticipantId) -> bool {
        giver != recipient && !self.is_forbidden(giver, recipient)
    }

    /// Recipients `giver` may be assigned, in roster order.
    pub fn allowed_recipients(
        &self,
        giver: ParticipantId,
    ) -> impl Iterator<Item = ParticipantId> + '_ {
        (0..self.size)
            .map(|i| ParticipantId(i as u32))
            .filter(move |&r| self.allows(giver, r))
    }
}
