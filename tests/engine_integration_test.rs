// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the search engine running the draw predicates.
//!
//! These tests validate that the engine correctly:
//! - Runs the draw program through to a suspended solution
//! - Enumerates every solution exactly once when resumed
//! - Backtracks past dead ends and restores state via the trail

mod common;

use std::collections::HashSet;

use common::context;
use santa_draw::context::DrawContext;
use santa_draw::engine::EngineBuilder;
use santa_draw::predicates::{
    AssignRecipientsPredicate, FailPredicate, ShuffleOrdersPredicate, SuspendPredicate,
};
use santa_draw::state::statistics::{Counters, Statistics};
use santa_draw::ReciprocityPolicy;

const FOUR: [&str; 4] = ["A", "B", "C", "D"];

fn draw_engine_with_suspend() -> santa_draw::SearchEngine {
    EngineBuilder::new()
        .add(Box::new(ShuffleOrdersPredicate))
        .add(Box::new(AssignRecipientsPredicate))
        .terminal(Box::new(SuspendPredicate))
        .build()
}

/// Collect every solution by resuming until the engine is exhausted.
fn all_solutions(ctx: &mut DrawContext) -> Vec<Vec<usize>> {
    let mut solutions = Vec::new();
    let mut engine = Some(draw_engine_with_suspend());
    while let Some(current) = engine.take() {
        engine = current.search(ctx);
        if engine.is_some() {
            let table = ctx.state.complete().expect("suspended on a complete table");
            solutions.push(table.iter().map(|id| id.index()).collect());
        }
    }
    solutions
}

#[test]
fn test_draw_program_suspends_on_solution() {
    let mut ctx = context(&FOUR, ReciprocityPolicy::Allow, 5);
    let engine = draw_engine_with_suspend().search(&mut ctx);
    assert!(engine.is_some());

    let table = ctx.state.complete().unwrap();
    for (giver, recipient) in table.iter().enumerate() {
        assert_ne!(giver, recipient.index());
    }
    let (tries, retries) = engine.unwrap().statistics();
    // Shuffle, four giver rounds, the closing round, Suspend
    assert!(tries >= 7);
    assert!(retries >= 4);
}

#[test]
fn test_resume_enumerates_all_derangements() {
    // Four people have nine derangements
    let mut ctx = context(&FOUR, ReciprocityPolicy::Allow, 11);
    let solutions = all_solutions(&mut ctx);
    assert_eq!(solutions.len(), 9);

    let distinct: HashSet<Vec<usize>> = solutions.into_iter().collect();
    assert_eq!(distinct.len(), 9);
}

#[test]
fn test_resume_respects_disallowed_reciprocity() {
    // Without 2-cycles only the six 4-cycles remain
    let mut ctx = context(&FOUR, ReciprocityPolicy::Disallow, 3);
    let solutions = all_solutions(&mut ctx);
    assert_eq!(solutions.len(), 6);

    for table in &solutions {
        for (giver, &recipient) in table.iter().enumerate() {
            assert_ne!(table[recipient], giver, "mutual pair in {:?}", table);
        }
    }
    assert!(ctx.statistics.get(Counters::ReciprocalRejections) > 0);
}

#[test]
fn test_counting_with_fail_explores_everything() {
    let mut ctx = context(&FOUR, ReciprocityPolicy::Allow, 0);
    let engine = EngineBuilder::new()
        .add(Box::new(ShuffleOrdersPredicate))
        .add(Box::new(AssignRecipientsPredicate))
        .add(Statistics::counting_predicate(Counters::Solutions, None))
        .terminal(Box::new(FailPredicate))
        .build();

    assert!(engine.search(&mut ctx).is_none());
    assert_eq!(ctx.statistics.get(Counters::Solutions), 9);
}

fn a_gives_to_b(ctx: &DrawContext) -> bool {
    let roster = &ctx.problem.roster;
    match (roster.id_of("A"), roster.id_of("B")) {
        (Some(a), Some(b)) => ctx.state.recipient_of(a) == Some(b),
        _ => false,
    }
}

#[test]
fn test_filtered_counting() {
    // Fixing A→B leaves three ways to derange the others
    let mut ctx = context(&FOUR, ReciprocityPolicy::Allow, 0);
    let engine = EngineBuilder::new()
        .add(Box::new(ShuffleOrdersPredicate))
        .add(Box::new(AssignRecipientsPredicate))
        .add(Statistics::counting_predicate(Counters::Solutions, Some(a_gives_to_b)))
        .terminal(Box::new(FailPredicate))
        .build();

    assert!(engine.search(&mut ctx).is_none());
    assert_eq!(ctx.statistics.get(Counters::Solutions), 3);
}

#[test]
fn test_exhaustion_rewinds_everything() {
    let mut ctx = context(&FOUR, ReciprocityPolicy::Allow, 9);
    let engine = EngineBuilder::new()
        .add(Box::new(ShuffleOrdersPredicate))
        .add(Box::new(AssignRecipientsPredicate))
        .terminal(Box::new(FailPredicate))
        .build();

    assert!(engine.search(&mut ctx).is_none());
    assert_eq!(ctx.state.placed(), 0);
    assert!(ctx.trail.is_empty());
}

#[test]
fn test_two_people_disallowed_has_no_solution() {
    let mut ctx = context(&["A", "B"], ReciprocityPolicy::Disallow, 1);
    assert!(draw_engine_with_suspend().search(&mut ctx).is_none());
    assert_eq!(ctx.statistics.get(Counters::ReciprocalRejections), 1);
}
