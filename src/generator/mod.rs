// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Assignment generator: the retry driver around the backtracking search.
//!
//! One attempt runs the predicate program
//!
//! ```text
//! ShuffleOrders ; AssignRecipients* ; Counting(Solutions) ; Suspend
//! ```
//!
//! on a fresh [`DrawContext`]. The search is exhaustive over that attempt's
//! giver order: if any completion exists it is found. The driver repeats
//! attempts with new randomness until one succeeds or the attempt bound is
//! reached.
//!
//! # Randomness
//!
//! The caller supplies the random stream. The driver draws one `u64` seed
//! per attempt from it and seeds that attempt's own generator, so a fixed
//! caller seed reproduces the whole run, and attempts can be run on separate
//! threads without sharing a generator.

pub mod assignment;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use assignment::Assignment;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use tracing::{debug, info, warn};

use crate::constraints::ForbiddenSet;
use crate::context::{DrawContext, DrawProblem};
use crate::engine::{EngineBuilder, SearchEngine};
use crate::error::{DrawError, InfeasibleReason, Result};
use crate::feasibility;
use crate::predicates::{AssignRecipientsPredicate, ShuffleOrdersPredicate, SuspendPredicate};
use crate::roster::{ParticipantId, Roster};
use crate::state::statistics::{Counters, Statistics};

/// Default bound on randomized attempts.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5_000;

/// Whether two participants may be each other's recipient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReciprocityPolicy {
    /// A→B and B→A may both appear.
    #[default]
    Allow,
    /// No pair of participants may give to each other.
    Disallow,
}

impl From<bool> for ReciprocityPolicy {
    /// `true` means mutual pairs are allowed.
    fn from(allow_reciprocal: bool) -> Self {
        if allow_reciprocal {
            ReciprocityPolicy::Allow
        } else {
            ReciprocityPolicy::Disallow
        }
    }
}

impl fmt::Display for ReciprocityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReciprocityPolicy::Allow => write!(f, "allowed"),
            ReciprocityPolicy::Disallow => write!(f, "disallowed"),
        }
    }
}

/// Tuning knobs for one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawOptions {
    pub reciprocity: ReciprocityPolicy,
    pub max_attempts: u32,
    /// Run the perfect-matching check before spending attempts.
    pub precheck: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            reciprocity: ReciprocityPolicy::Allow,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            precheck: true,
        }
    }
}

impl DrawOptions {
    pub fn with_reciprocity(mut self, reciprocity: ReciprocityPolicy) -> Self {
        self.reciprocity = reciprocity;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_precheck(mut self, precheck: bool) -> Self {
        self.precheck = precheck;
        self
    }
}

/// A successful run with its bookkeeping.
#[derive(Debug, Clone)]
pub struct DrawOutcome {
    pub assignment: Assignment,
    /// 1-based index of the attempt that succeeded.
    pub attempts: u32,
    /// Counters summed over the attempts that were run.
    pub statistics: Statistics,
}

/// Result of a single attempt.
#[derive(Debug)]
pub(crate) struct AttemptResult {
    pub(crate) solution: Option<Vec<ParticipantId>>,
    pub(crate) statistics: Statistics,
}

/// Generator for one fixed problem (roster, forbidden pairs, options).
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use santa_draw::constraints::ForbiddenSet;
/// use santa_draw::generator::{DrawOptions, Generator};
///
/// let forbidden = ForbiddenSet::build([("A", "B")]);
/// let generator =
///     Generator::new(["A", "B", "C", "D"], &forbidden, DrawOptions::default()).unwrap();
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let assignment = generator.generate(&mut rng).unwrap();
/// assert_eq!(assignment.len(), 4);
/// assert_ne!(assignment.recipient_of("A"), Some("B"));
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    problem: Arc<DrawProblem>,
    options: DrawOptions,
}

impl Generator {
    /// Prepare a generator.
    ///
    /// Fails with [`DrawError::DuplicateParticipant`] before any search if a
    /// name repeats.
    pub fn new<I, S>(
        participants: I,
        forbidden: &ForbiddenSet,
        options: DrawOptions,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roster = Roster::new(participants)?;
        let problem = DrawProblem::new(roster, forbidden, options.reciprocity);
        Ok(Self {
            problem: Arc::new(problem),
            options,
        })
    }

    pub fn problem(&self) -> &DrawProblem {
        &self.problem
    }

    pub fn options(&self) -> &DrawOptions {
        &self.options
    }

    /// Cheap checks that prove infeasibility without searching.
    ///
    /// Fewer than two participants is always infeasible. With
    /// [`DrawOptions::precheck`] set, a missing perfect matching is too, and
    /// under [`ReciprocityPolicy::Disallow`] so is any pair of participants
    /// allowed to draw only each other.
    pub fn check_feasible(&self) -> Result<()> {
        if self.problem.size() < 2 {
            return Err(self.infeasible(InfeasibleReason::TooFewParticipants));
        }
        if !self.options.precheck {
            return Ok(());
        }

        let exclusions = &self.problem.exclusions;
        if let Err(blocked) = feasibility::find_perfect_matching(exclusions) {
            let givers = blocked.iter().map(|&id| self.name(id)).collect();
            return Err(self.infeasible(InfeasibleReason::NoPerfectMatching { givers }));
        }
        if self.problem.reciprocity == ReciprocityPolicy::Disallow {
            if let Some(&(a, b)) = feasibility::isolated_pairs(exclusions).first() {
                return Err(self.infeasible(InfeasibleReason::ForcedMutualPair {
                    first: self.name(a),
                    second: self.name(b),
                }));
            }
        }
        Ok(())
    }

    fn name(&self, id: ParticipantId) -> String {
        self.problem.roster.name(id).to_string()
    }

    /// Draw one assignment.
    pub fn generate<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<Assignment> {
        self.generate_detailed(rng).map(|outcome| outcome.assignment)
    }

    /// Draw one assignment, reporting how much work it took.
    pub fn generate_detailed<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<DrawOutcome> {
        self.check_feasible()?;

        let mut statistics = Statistics::new();
        for attempt in 1..=self.options.max_attempts {
            let result = self.run_attempt(rng.next_u64());
            statistics.merge(&result.statistics);

            match result.solution {
                Some(table) => {
                    info!(
                        participants = self.problem.size(),
                        attempts = attempt,
                        placements = statistics.get(Counters::Placements),
                        "draw succeeded"
                    );
                    return Ok(DrawOutcome {
                        assignment: self.to_assignment(&table),
                        attempts: attempt,
                        statistics,
                    });
                }
                None => {
                    debug!(
                        attempt,
                        tries = result.statistics.get(Counters::PredicateTries),
                        retries = result.statistics.get(Counters::PredicateRetries),
                        placements = result.statistics.get(Counters::Placements),
                        dead_ends = result.statistics.get(Counters::DeadEnds),
                        "draw attempt exhausted"
                    );
                }
            }
        }

        Err(self.infeasible(InfeasibleReason::AttemptsExhausted {
            attempts: self.options.max_attempts,
        }))
    }

    /// Run one complete attempt with its own random stream.
    pub(crate) fn run_attempt(&self, seed: u64) -> AttemptResult {
        let mut ctx = DrawContext::new(Arc::clone(&self.problem), seed);
        let solution = match attempt_program().search(&mut ctx) {
            Some(_suspended) => ctx.state.complete(),
            None => None,
        };
        AttemptResult {
            solution,
            statistics: ctx.statistics,
        }
    }

    fn to_assignment(&self, table: &[ParticipantId]) -> Assignment {
        let roster = &self.problem.roster;
        let pairs: BTreeMap<String, String> = roster
            .ids()
            .zip(table.iter())
            .map(|(giver, &recipient)| {
                (roster.name(giver).to_string(), roster.name(recipient).to_string())
            })
            .collect();
        Assignment::from_pairs(pairs)
    }

    pub(crate) fn infeasible(&self, reason: InfeasibleReason) -> DrawError {
        warn!(
            participants = self.problem.size(),
            forbidden_pairs = self.problem.forbidden_pairs,
            %reason,
            "draw is infeasible"
        );
        DrawError::Infeasible {
            participants: self.problem.size(),
            forbidden_pairs: self.problem.forbidden_pairs,
            reciprocity: self.problem.reciprocity,
            reason,
        }
    }
}

/// The predicate program for a single attempt.
fn attempt_program() -> SearchEngine {
    EngineBuilder::new()
        .add(Box::new(ShuffleOrdersPredicate))
        .add(Box::new(AssignRecipientsPredicate))
        .add(Statistics::counting_predicate(Counters::Solutions, None))
        .terminal(Box::new(SuspendPredicate))
        .build()
}

/// One-shot convenience wrapper: build the forbidden set, then draw.
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use santa_draw::generator::{generate, ReciprocityPolicy};
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let assignment = generate(
///     &["A", "B", "C", "D"],
///     &[],
///     ReciprocityPolicy::Disallow,
///     5_000,
///     &mut rng,
/// )
/// .unwrap();
/// for (giver, recipient) in &assignment {
///     assert_ne!(assignment.recipient_of(recipient), Some(giver));
/// }
/// ```
pub fn generate<R: RngCore + ?Sized>(
    participants: &[&str],
    forbidden_pairs: &[(&str, &str)],
    reciprocity: ReciprocityPolicy,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Assignment> {
    let forbidden = ForbiddenSet::build(forbidden_pairs.iter().copied());
    let options = DrawOptions::default()
        .with_reciprocity(reciprocity)
        .with_max_attempts(max_attempts);
    Generator::new(participants.iter().copied(), &forbidden, options)?.generate(rng)
}
