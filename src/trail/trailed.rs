// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! State that can be restored from trail records.

use crate::roster::ParticipantId;

/// One trail-tracked cell of search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The recipient currently held by a giver.
    RecipientOf(ParticipantId),
    /// The giver that has claimed a recipient from the pool.
    GiverOf(ParticipantId),
}

/// Search state whose cells are written through the [`Trail`](super::Trail).
///
/// Implementors expose raw reads and writes of each [`Slot`]; the trail does
/// the bookkeeping so that a rewind restores the exact prior values.
pub trait Trailed {
    /// Current value of `slot`.
    fn read(&self, slot: Slot) -> Option<ParticipantId>;

    /// Overwrite `slot` without recording anything.
    fn write(&mut self, slot: Slot, value: Option<ParticipantId>);
}
