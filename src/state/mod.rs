// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable search state for one attempt.
//!
//! The partial assignment (who gives to whom, which recipients are claimed)
//! is written only through the trail. The orderings and per-round candidate
//! lists are scratch data owned by the attempt and are not trailed: each is
//! written once, before any choice that could be undone depends on it.

pub mod statistics;

use crate::roster::ParticipantId;
use crate::trail::{Slot, Trailed};

/// Dynamic state of one draw attempt.
#[derive(Debug, Clone)]
pub struct DrawState {
    /// `recipient_of[g]` is the recipient currently held by giver `g`.
    recipient_of: Vec<Option<ParticipantId>>,

    /// `giver_of[r]` is the giver that claimed `r` from the pool.
    giver_of: Vec<Option<ParticipantId>>,

    /// Order in which givers are placed, one per round.
    pub giver_order: Vec<ParticipantId>,

    /// Available-recipient pool, in its randomized order.
    pub pool: Vec<ParticipantId>,

    /// Shuffled candidate recipients computed for each round.
    pub candidates: Vec<Vec<ParticipantId>>,
}

impl DrawState {
    /// Empty state for a roster of `size` participants, in roster order.
    pub fn new(size: usize) -> Self {
        let ids: Vec<ParticipantId> = (0..size).map(|i| ParticipantId(i as u32)).collect();
        Self {
            recipient_of: vec![None; size],
            giver_of: vec![None; size],
            giver_order: ids.clone(),
            pool: ids,
            candidates: vec![Vec::new(); size],
        }
    }

    /// Recipient currently held by `giver`.
    pub fn recipient_of(&self, giver: ParticipantId) -> Option<ParticipantId> {
        self.recipient_of[giver.index()]
    }

    /// Has `recipient` been claimed by some giver?
    pub fn is_claimed(&self, recipient: ParticipantId) -> bool {
        self.giver_of[recipient.index()].is_some()
    }

    /// Number of givers placed so far.
    pub fn placed(&self) -> usize {
        self.recipient_of.iter().filter(|r| r.is_some()).count()
    }

    /// The full giver→recipient table, if every giver is placed.
    pub fn complete(&self) -> Option<Vec<ParticipantId>> {
        self.recipient_of.iter().copied().collect()
    }
}

impl Trailed for DrawState {
    fn read(&self, slot: Slot) -> Option<ParticipantId> {
        match slot {
            Slot::RecipientOf(giver) => self.recipient_of[giver.index()],
            Slot::GiverOf(recipient) => self.giver_of[recipient.index()],
        }
    }

    fn write(&mut self, slot: Slot, value: Option<ParticipantId>) {
        match slot {
            Slot::RecipientOf(giver) => self.recipient_of[giver.index()] = value,
            Slot::GiverOf(recipient) => self.giver_of[recipient.index()] = value,
        }
    }
}
