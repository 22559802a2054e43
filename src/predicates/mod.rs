// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! A draw attempt is the program
//!
//! ```text
//! ShuffleOrders ; AssignRecipients* ; Counting(Solutions) ; Suspend
//! ```
//!
//! # Organization
//!
//! - `shuffle`: ShuffleOrdersPredicate, randomizing giver order and pool
//! - `assign`: AssignRecipientsPredicate, one round per giver
//! - Built-in predicates: `FailPredicate`, `SuspendPredicate`

pub mod assign;
pub mod shuffle;

pub use assign::AssignRecipientsPredicate;
pub use shuffle::ShuffleOrdersPredicate;

use crate::context::DrawContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// This predicate always fails, forcing backtracking. Ending a program with
/// it makes the engine explore every alternative and then report exhaustion.
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut DrawContext, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn retry_pred(
        &mut self,
        _ctx: &mut DrawContext,
        _round: usize,
        _choice: usize,
    ) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl TerminalPredicate for FailPredicate {}

/// Built-in suspend predicate.
///
/// Reaching it means every earlier predicate succeeded; the engine stops and
/// hands the context, holding a complete solution, back to the caller.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut DrawContext, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn retry_pred(
        &mut self,
        _ctx: &mut DrawContext,
        _round: usize,
        _choice: usize,
    ) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ForbiddenSet;
    use crate::context::DrawProblem;
    use crate::generator::ReciprocityPolicy;
    use crate::roster::Roster;
    use std::sync::Arc;

    fn ctx() -> DrawContext {
        let roster = Roster::new(["A", "B"]).unwrap();
        let problem = DrawProblem::new(roster, &ForbiddenSet::new(), ReciprocityPolicy::Allow);
        DrawContext::new(Arc::new(problem), 0)
    }

    #[test]
    fn test_suspend_predicate() {
        let mut ctx = ctx();
        let mut pred = SuspendPredicate;
        assert_eq!(pred.try_pred(&mut ctx, 0), PredicateResult::Suspend);
        assert_eq!(pred.retry_pred(&mut ctx, 0, 0), PredicateResult::Failure);
    }

    #[test]
    fn test_fail_predicate() {
        let mut ctx = ctx();
        let mut pred = FailPredicate;
        assert_eq!(pred.try_pred(&mut ctx, 0), PredicateResult::Failure);
        assert_eq!(pred.retry_pred(&mut ctx, 0, 0), PredicateResult::Failure);
    }
}
