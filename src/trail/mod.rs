// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the draw search.
//!
//! Every write to search state goes through the trail, which remembers the
//! overwritten value. Rewinding to a checkpoint replays those records in
//! reverse, so undoing a tentative choice restores the exact prior pool and
//! partial assignment with no hand-written undo code in the predicates.

pub mod trailed;

pub use trailed::{Slot, Trailed};

use crate::roster::ParticipantId;

/// A single entry in the trail, recording one state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrailEntry {
    slot: Slot,
    old_value: Option<ParticipantId>,
}

/// The trail of state changes made during one attempt.
///
/// Checkpoints are plain trail lengths; the engine stores one per stack
/// entry and rewinds to it before (re)running that entry.
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trail sized for a roster of `participants`.
    ///
    /// Each placed giver writes two slots, so the trail never grows past
    /// twice the roster size.
    pub fn with_capacity(participants: usize) -> Self {
        Self {
            entries: Vec::with_capacity(participants * 2),
        }
    }

    /// Current position, usable as a checkpoint for [`Trail::rewind_to`].
    pub fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Write `value` into `slot`, recording the old value.
    pub fn set<T: Trailed + ?Sized>(
        &mut self,
        target: &mut T,
        slot: Slot,
        value: Option<ParticipantId>,
    ) {
        let old_value = target.read(slot);
        self.entries.push(TrailEntry { slot, old_value });
        target.write(slot, value);
    }

    /// Undo every change recorded after `checkpoint`, newest first.
    ///
    /// Rewinding to a checkpoint at or beyond the current length is a no-op.
    pub fn rewind_to<T: Trailed + ?Sized>(&mut self, checkpoint: usize, target: &mut T) {
        while self.entries.len() > checkpoint {
            if let Some(entry) = self.entries.pop() {
                target.write(entry.slot, entry.old_value);
            }
        }
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Cells {
        recipient: [Option<ParticipantId>; 3],
        giver: [Option<ParticipantId>; 3],
    }

    impl Trailed for Cells {
        fn read(&self, slot: Slot) -> Option<ParticipantId> {
            match slot {
                Slot::RecipientOf(p) => self.recipient[p.index()],
                Slot::GiverOf(p) => self.giver[p.index()],
            }
        }

        fn write(&mut self, slot: Slot, value: Option<ParticipantId>) {
            match slot {
                Slot::RecipientOf(p) => self.recipient[p.index()] = value,
                Slot::GiverOf(p) => self.giver[p.index()] = value,
            }
        }
    }

    const A: ParticipantId = ParticipantId(0);
    const B: ParticipantId = ParticipantId(1);
    const C: ParticipantId = ParticipantId(2);

    #[test]
    fn test_trail_new() {
        let trail = Trail::new();
        assert_eq!(trail.len(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_set_and_rewind() {
        let mut trail = Trail::new();
        let mut cells = Cells::default();

        trail.set(&mut cells, Slot::RecipientOf(A), Some(B));
        trail.set(&mut cells, Slot::GiverOf(B), Some(A));
        assert_eq!(trail.len(), 2);
        assert_eq!(cells.recipient[0], Some(B));

        trail.rewind_to(0, &mut cells);
        assert!(trail.is_empty());
        assert_eq!(cells.recipient[0], None);
        assert_eq!(cells.giver[1], None);
    }

    #[test]
    fn test_nested_checkpoints() {
        let mut trail = Trail::new();
        let mut cells = Cells::default();

        trail.set(&mut cells, Slot::RecipientOf(A), Some(B));
        let cp1 = trail.checkpoint();

        trail.set(&mut cells, Slot::RecipientOf(B), Some(C));
        let cp2 = trail.checkpoint();

        trail.set(&mut cells, Slot::RecipientOf(C), Some(A));
        assert_eq!(trail.len(), 3);

        trail.rewind_to(cp2, &mut cells);
        assert_eq!(cells.recipient, [Some(B), Some(C), None]);

        trail.rewind_to(cp1, &mut cells);
        assert_eq!(cells.recipient, [Some(B), None, None]);
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_overwrite_restores_oldest_value() {
        let mut trail = Trail::new();
        let mut cells = Cells::default();

        trail.set(&mut cells, Slot::RecipientOf(A), Some(B));
        let cp = trail.checkpoint();
        trail.set(&mut cells, Slot::RecipientOf(A), Some(C));
        trail.set(&mut cells, Slot::RecipientOf(A), None);

        trail.rewind_to(cp, &mut cells);
        assert_eq!(cells.recipient[0], Some(B));
    }

    #[test]
    fn test_rewind_past_end_is_noop() {
        let mut trail = Trail::with_capacity(3);
        let mut cells = Cells::default();
        trail.set(&mut cells, Slot::GiverOf(C), Some(A));

        trail.rewind_to(10, &mut cells);
        assert_eq!(trail.len(), 1);
        assert_eq!(cells.giver[2], Some(A));
    }
}
