// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. The engine coordinates with the trail to provide automatic
//! state restoration on backtracking, so the depth of the search is bounded
//! by an explicit stack rather than by host recursion.
//!
//! # Architecture
//!
//! The engine maintains a stack of predicate execution states. Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Choice mode state (whether we're trying alternatives)
//! - Current choice index (when in choice mode)
//!
//! Execution model:
//! 1. Call try_pred(round) on each predicate
//! 2. If Success: advance to next predicate
//! 3. If SuccessSamePredicate: increment round, stay at same predicate
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1)
//! 5. If Failure: backtrack to previous stack entry
//! 6. If Suspend: pause and return control to caller
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use santa_draw::context::{DrawContext, DrawProblem};
//! use santa_draw::constraints::ForbiddenSet;
//! use santa_draw::engine::EngineBuilder;
//! use santa_draw::generator::ReciprocityPolicy;
//! use santa_draw::predicates::{
//!     AssignRecipientsPredicate, ShuffleOrdersPredicate, SuspendPredicate,
//! };
//! use santa_draw::roster::Roster;
//!
//! let roster = Roster::new(["A", "B", "C"]).unwrap();
//! let problem = DrawProblem::new(roster, &ForbiddenSet::new(), ReciprocityPolicy::Allow);
//! let mut ctx = DrawContext::new(Arc::new(problem), 42);
//!
//! let engine = EngineBuilder::new()
//!     .add(Box::new(ShuffleOrdersPredicate))
//!     .add(Box::new(AssignRecipientsPredicate))
//!     .terminal(Box::new(SuspendPredicate))
//!     .build();
//!
//! // Suspended means every giver has been placed
//! assert!(engine.search(&mut ctx).is_some());
//! assert!(ctx.state.complete().is_some());
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use crate::context::DrawContext;
use crate::state::statistics::Counters;

/// Initial capacity of the predicate stack.
///
/// The draw program pushes one entry per giver plus a few fixed predicates.
const INITIAL_STACK_SIZE: usize = 64;

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Current choice being tried (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail checkpoint for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn fresh(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }
}

/// Search engine that coordinates predicate execution and backtracking.
///
/// The engine runs predicates in sequence, managing rounds, choices, and
/// backtracking automatically via the trail.
#[derive(Debug)]
pub struct SearchEngine {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls (backtracks).
    retry_count: u64,
}

impl SearchEngine {
    /// Create a new search engine with the given predicates.
    ///
    /// Prefer [`EngineBuilder`], which guarantees the program ends with a
    /// terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::with_capacity(INITIAL_STACK_SIZE),
            try_count: 0,
            retry_count: 0,
        }
    }

    /// Run the search to find one solution.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended - can resume by calling search() again
    /// - `None` if exhausted (backtracked past first predicate) - search is complete
    ///
    /// The solution is left in `ctx` as a side effect; the return value only
    /// says whether the search is suspended on one.
    ///
    /// # Panics
    ///
    /// Panics if the predicate sequence is invalid (reaches the end without FAIL or SUSPEND).
    pub fn search(mut self, ctx: &mut DrawContext) -> Option<Self> {
        if self.stack.is_empty() {
            if self.predicates.is_empty() {
                return None;
            }
            self.stack.push(StackEntry::fresh(0, 0, ctx.trail.checkpoint()));
        } else {
            // Resuming after Suspend: the suspending entry has nothing left to try.
            self.stack.pop();
        }

        loop {
            let Some(entry) = self.stack.last_mut() else {
                return None; // Search exhausted (all choices failed)
            };

            ctx.rewind_to(entry.trail_checkpoint);

            if !entry.in_choice_mode {
                let (pred_idx, round) = (entry.predicate_index, entry.round);
                self.try_count += 1;
                ctx.statistics.increment_counter(Counters::PredicateTries);
                let result = self.predicates[pred_idx].try_pred(ctx, round);

                match result {
                    PredicateResult::Success => {
                        self.seal_top();
                        self.push_next_predicate(ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.seal_top();
                        self.push_same_predicate(ctx);
                    }
                    PredicateResult::Failure => {
                        self.stack.pop();
                    }
                    PredicateResult::Choices(n) => {
                        let checkpoint = ctx.trail.checkpoint();
                        if let Some(entry) = self.stack.last_mut() {
                            entry.in_choice_mode = true;
                            entry.current_choice = 0;
                            entry.num_choices = n;
                            entry.trail_checkpoint = checkpoint;
                        }
                    }
                    PredicateResult::Suspend => return Some(self),
                }
            } else {
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }

                let (pred_idx, round, choice) =
                    (entry.predicate_index, entry.round, entry.current_choice);
                entry.current_choice += 1;
                self.retry_count += 1;
                ctx.statistics.increment_counter(Counters::PredicateRetries);
                let result = self.predicates[pred_idx].retry_pred(ctx, round, choice);

                match result {
                    PredicateResult::Success => self.push_next_predicate(ctx),
                    PredicateResult::SuccessSamePredicate => self.push_same_predicate(ctx),
                    PredicateResult::Failure => {
                        // Try next choice (loop continues)
                    }
                    PredicateResult::Choices(_) | PredicateResult::Suspend => {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                }
            }
        }
    }

    /// Mark the top entry as having no alternatives.
    ///
    /// A deterministic success is not re-run on backtrack: the engine finds
    /// zero remaining choices and keeps backtracking past it.
    fn seal_top(&mut self) {
        if let Some(entry) = self.stack.last_mut() {
            entry.in_choice_mode = true;
            entry.current_choice = 0;
            entry.num_choices = 0;
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    ///
    /// Panics if we've reached the end of the predicate sequence, as this indicates
    /// an invalid program (all valid programs must end with FAIL or SUSPEND).
    fn push_next_predicate(&mut self, ctx: &DrawContext) {
        let next_index = self.stack.last().map_or(0, |e| e.predicate_index + 1);

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 Every program must terminate with a FAIL or SUSPEND predicate."
            );
        }

        self.stack
            .push(StackEntry::fresh(next_index, 0, ctx.trail.checkpoint()));
    }

    /// Push a new stack entry for the same predicate with incremented round.
    fn push_same_predicate(&mut self, ctx: &DrawContext) {
        let (pred_index, next_round) = self
            .stack
            .last()
            .map_or((0, 0), |e| (e.predicate_index, e.round + 1));

        self.stack
            .push(StackEntry::fresh(pred_index, next_round, ctx.trail.checkpoint()));
    }

    /// Get statistics about the search.
    ///
    /// Returns (try_count, retry_count) showing how many times predicates
    /// were tried and retried.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }
}

/// Builds a [`SearchEngine`] whose program is guaranteed to end with a
/// [`TerminalPredicate`].
#[derive(Debug, Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate to the program.
    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Close the program with a terminal predicate.
    pub fn terminal<T: TerminalPredicate + 'static>(self, predicate: Box<T>) -> TerminatedBuilder {
        let mut predicates = self.predicates;
        predicates.push(predicate);
        TerminatedBuilder { predicates }
    }
}

/// A complete program, ready to build.
#[derive(Debug)]
pub struct TerminatedBuilder {
    predicates: Vec<Box<dyn Predicate>>,
}

impl TerminatedBuilder {
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.predicates)
    }
}
