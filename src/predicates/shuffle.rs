// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! ShuffleOrdersPredicate - randomizes the giver order and recipient pool.

use rand::seq::SliceRandom;

use crate::context::DrawContext;
use crate::engine::{Predicate, PredicateResult};

/// Draws the two independent orderings an attempt searches over.
///
/// Runs exactly once (round 0) and never offers choices: backtracking past
/// it ends the attempt. The giver order and the pool are shuffled with
/// separate draws, so neither ordering is tied to the other.
#[derive(Debug)]
pub struct ShuffleOrdersPredicate;

impl Predicate for ShuffleOrdersPredicate {
    fn try_pred(&mut self, ctx: &mut DrawContext, round: usize) -> PredicateResult {
        debug_assert_eq!(round, 0, "ShuffleOrdersPredicate runs once");

        ctx.state.giver_order.shuffle(&mut ctx.rng);
        ctx.state.pool.shuffle(&mut ctx.rng);

        PredicateResult::Success
    }

    fn name(&self) -> &str {
        "ShuffleOrders"
    }
}
