// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Participant roster.
//!
//! The search never touches names: every participant is addressed by a
//! dense [`ParticipantId`] into the roster, so search state can live in
//! plain index-addressed arrays.

use indexmap::IndexSet;

use crate::error::{DrawError, Result};

/// Index of a participant within a [`Roster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub(crate) u32);

impl ParticipantId {
    /// Position of this participant in roster order.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Ordered, duplicate-free set of participant names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: IndexSet<String>,
}

impl Roster {
    /// Build a roster, rejecting duplicate names.
    ///
    /// Order is preserved: the first name gets id 0, and so on.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IndexSet::new();
        for name in names {
            let name = name.into();
            if set.contains(&name) {
                return Err(DrawError::DuplicateParticipant { name });
            }
            set.insert(name);
        }
        Ok(Self { names: set })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up the id of a name.
    pub fn id_of(&self, name: &str) -> Option<ParticipantId> {
        self.names.get_index_of(name).map(|i| ParticipantId(i as u32))
    }

    /// Name of a participant.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this roster.
    pub fn name(&self, id: ParticipantId) -> &str {
        &self.names[id.index()]
    }

    /// All ids in roster order.
    pub fn ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        (0..self.names.len()).map(|i| ParticipantId(i as u32))
    }

    /// All names in roster order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}
