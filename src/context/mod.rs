// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining the fixed problem and per-attempt state.
//!
//! The DrawContext is the core data structure that combines:
//! - The problem: roster, exclusion matrix and reciprocity policy, immutable
//!   and shared between attempts through an `Arc`
//! - The dynamic state: partial assignment written through the trail
//! - The attempt's own random stream
//!
//! Each attempt gets a fresh context, so attempts never share mutable state
//! and can run on separate threads.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::constraints::{ExclusionMatrix, ForbiddenSet};
use crate::generator::ReciprocityPolicy;
use crate::roster::{ParticipantId, Roster};
use crate::state::statistics::Statistics;
use crate::state::DrawState;
use crate::trail::{Slot, Trail};

/// Immutable description of one draw.
///
/// Built once per generation run; every attempt reads it.
#[derive(Debug, Clone)]
pub struct DrawProblem {
    pub roster: Roster,
    pub exclusions: ExclusionMatrix,
    pub reciprocity: ReciprocityPolicy,
    /// Number of distinct forbidden pairs declared, for error reporting.
    pub forbidden_pairs: usize,
}

impl DrawProblem {
    pub fn new(roster: Roster, forbidden: &ForbiddenSet, reciprocity: ReciprocityPolicy) -> Self {
        let exclusions = ExclusionMatrix::compile(&roster, forbidden);
        Self {
            roster,
            exclusions,
            reciprocity,
            forbidden_pairs: forbidden.len(),
        }
    }

    /// Number of participants.
    pub fn size(&self) -> usize {
        self.roster.len()
    }
}

/// Search context for a single attempt.
///
/// # Memory Model
///
/// ```text
/// DrawContext {
///     problem: Arc<DrawProblem>,  // immutable, shared
///     trail: Trail,               // mutable, owned
///     state: DrawState,           // mutable, owned
///     statistics: Statistics,     // mutable, owned
///     rng: ChaCha8Rng,            // owned random stream
/// }
/// ```
#[derive(Debug)]
pub struct DrawContext {
    pub problem: Arc<DrawProblem>,
    pub trail: Trail,
    pub state: DrawState,
    pub statistics: Statistics,
    pub rng: ChaCha8Rng,
}

impl DrawContext {
    /// Create a context for one attempt, seeding its random stream.
    pub fn new(problem: Arc<DrawProblem>, seed: u64) -> Self {
        let size = problem.size();
        Self {
            problem,
            trail: Trail::with_capacity(size),
            state: DrawState::new(size),
            statistics: Statistics::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Tentatively give `recipient` to `giver` (trail-tracked).
    ///
    /// Claims `recipient` from the pool at the same time; rewinding past this
    /// call releases both.
    pub fn assign(&mut self, giver: ParticipantId, recipient: ParticipantId) {
        debug_assert!(!self.state.is_claimed(recipient), "recipient claimed twice");
        self.trail.set(&mut self.state, Slot::RecipientOf(giver), Some(recipient));
        self.trail.set(&mut self.state, Slot::GiverOf(recipient), Some(giver));
    }

    /// Undo every assignment made after `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        self.trail.rewind_to(checkpoint, &mut self.state);
    }

    /// Would giving `candidate` to `giver` pair them with each other?
    pub fn would_reciprocate(&self, giver: ParticipantId, candidate: ParticipantId) -> bool {
        self.state.recipient_of(candidate) == Some(giver)
    }
}
