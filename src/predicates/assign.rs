// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! AssignRecipientsPredicate - places one giver per round.
//!
//! Round `i` handles the `i`-th giver of the shuffled giver order. Its
//! choices are the unclaimed recipients that giver may receive, in shuffled
//! order; the engine tries them one by one and backtracks into the previous
//! round when all of them fail.

use rand::seq::SliceRandom;

use crate::context::DrawContext;
use crate::engine::{Predicate, PredicateResult};
use crate::generator::ReciprocityPolicy;
use crate::roster::ParticipantId;
use crate::state::statistics::Counters;

/// Assigns a recipient to each giver in turn.
///
/// # Choices
///
/// For giver `g` in round `i`, the candidates are every `r` in the pool with
/// - `r` not yet claimed,
/// - `r != g`,
/// - `{g, r}` not forbidden.
///
/// They are shuffled before being offered. Under
/// [`ReciprocityPolicy::Disallow`] a candidate that already gives to `g` is
/// rejected when its turn comes.
///
/// Round `n` (one past the last giver) means every giver is placed.
#[derive(Debug)]
pub struct AssignRecipientsPredicate;

impl AssignRecipientsPredicate {
    fn giver(ctx: &DrawContext, round: usize) -> ParticipantId {
        ctx.state.giver_order[round]
    }
}

impl Predicate for AssignRecipientsPredicate {
    fn try_pred(&mut self, ctx: &mut DrawContext, round: usize) -> PredicateResult {
        if round == ctx.problem.size() {
            return PredicateResult::Success;
        }

        let giver = Self::giver(ctx, round);
        let exclusions = &ctx.problem.exclusions;
        let state = &ctx.state;
        let mut candidates: Vec<ParticipantId> = state
            .pool
            .iter()
            .copied()
            .filter(|&r| !state.is_claimed(r) && exclusions.allows(giver, r))
            .collect();

        if candidates.is_empty() {
            ctx.statistics.increment_counter(Counters::DeadEnds);
            return PredicateResult::Failure;
        }

        candidates.shuffle(&mut ctx.rng);
        let count = candidates.len();
        ctx.state.candidates[round] = candidates;
        PredicateResult::Choices(count)
    }

    fn retry_pred(
        &mut self,
        ctx: &mut DrawContext,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        let giver = Self::giver(ctx, round);
        let recipient = ctx.state.candidates[round][choice];

        if ctx.problem.reciprocity == ReciprocityPolicy::Disallow
            && ctx.would_reciprocate(giver, recipient)
        {
            ctx.statistics.increment_counter(Counters::ReciprocalRejections);
            return PredicateResult::Failure;
        }

        ctx.assign(giver, recipient);
        ctx.statistics.increment_counter(Counters::Placements);
        PredicateResult::SuccessSamePredicate
    }

    fn name(&self) -> &str {
        "AssignRecipients"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::ForbiddenSet;
    use crate::context::DrawProblem;
    use crate::roster::Roster;
    use std::sync::Arc;

    fn ctx(names: &[&str], pairs: &[(&str, &str)], policy: ReciprocityPolicy) -> DrawContext {
        let roster = Roster::new(names.iter().copied()).unwrap();
        let forbidden = ForbiddenSet::build(pairs.iter().copied());
        DrawContext::new(Arc::new(DrawProblem::new(roster, &forbidden, policy)), 5)
    }

    fn id(ctx: &DrawContext, name: &str) -> ParticipantId {
        ctx.problem.roster.id_of(name).unwrap()
    }

    #[test]
    fn test_candidates_exclude_self_forbidden_and_claimed() {
        let mut ctx = ctx(&["A", "B", "C", "D"], &[("A", "B")], ReciprocityPolicy::Allow);
        let (a, c, d) = (id(&ctx, "A"), id(&ctx, "C"), id(&ctx, "D"));
        ctx.state.giver_order = vec![a, id(&ctx, "B"), c, d];
        ctx.assign(c, d);

        // A may not take itself, B (forbidden) or D (claimed)
        assert_eq!(
            AssignRecipientsPredicate.try_pred(&mut ctx, 0),
            PredicateResult::Choices(1)
        );
        assert_eq!(ctx.state.candidates[0], vec![c]);
    }

    #[test]
    fn test_no_candidates_is_dead_end() {
        let mut ctx = ctx(&["A", "B"], &[("A", "B")], ReciprocityPolicy::Allow);
        assert_eq!(
            AssignRecipientsPredicate.try_pred(&mut ctx, 0),
            PredicateResult::Failure
        );
        assert_eq!(ctx.statistics.get(Counters::DeadEnds), 1);
    }

    #[test]
    fn test_final_round_succeeds() {
        let mut ctx = ctx(&["A", "B"], &[], ReciprocityPolicy::Allow);
        assert_eq!(
            AssignRecipientsPredicate.try_pred(&mut ctx, 2),
            PredicateResult::Success
        );
    }

    #[test]
    fn test_retry_assigns_and_advances_round() {
        let mut ctx = ctx(&["A", "B", "C"], &[], ReciprocityPolicy::Allow);
        let mut pred = AssignRecipientsPredicate;
        let PredicateResult::Choices(n) = pred.try_pred(&mut ctx, 0) else {
            panic!("expected choices");
        };
        assert_eq!(n, 2);

        let recipient = ctx.state.candidates[0][1];
        assert_eq!(pred.retry_pred(&mut ctx, 0, 1), PredicateResult::SuccessSamePredicate);
        let giver = ctx.state.giver_order[0];
        assert_eq!(ctx.state.recipient_of(giver), Some(recipient));
        assert_eq!(ctx.statistics.get(Counters::Placements), 1);
    }

    #[test]
    fn test_reciprocal_candidate_rejected_when_disallowed() {
        let mut ctx = ctx(&["A", "B", "C"], &[], ReciprocityPolicy::Disallow);
        let (a, b, c) = (id(&ctx, "A"), id(&ctx, "B"), id(&ctx, "C"));
        ctx.state.giver_order = vec![a, b, c];
        ctx.assign(a, b);

        let mut pred = AssignRecipientsPredicate;
        assert_eq!(pred.try_pred(&mut ctx, 1), PredicateResult::Choices(2));
        let back_to_a = ctx.state.candidates[1]
            .iter()
            .position(|&r| r == a)
            .unwrap();

        assert_eq!(pred.retry_pred(&mut ctx, 1, back_to_a), PredicateResult::Failure);
        assert_eq!(ctx.state.recipient_of(b), None);
        assert_eq!(ctx.statistics.get(Counters::ReciprocalRejections), 1);
    }

    #[test]
    fn test_reciprocal_candidate_accepted_when_allowed() {
        let mut ctx = ctx(&["A", "B", "C"], &[], ReciprocityPolicy::Allow);
        let (a, b, c) = (id(&ctx, "A"), id(&ctx, "B"), id(&ctx, "C"));
        ctx.state.giver_order = vec![a, b, c];
        ctx.assign(a, b);

        let mut pred = AssignRecipientsPredicate;
        pred.try_pred(&mut ctx, 1);
        let back_to_a = ctx.state.candidates[1]
            .iter()
            .position(|&r| r == a)
            .unwrap();
        assert_eq!(
            pred.retry_pred(&mut ctx, 1, back_to_a),
            PredicateResult::SuccessSamePredicate
        );
        assert_eq!(ctx.state.recipient_of(b), Some(a));
    }
}
