// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Constrained Secret Santa draw.
//!
//! Given a list of participants, a set of unordered pairs who must not draw
//! each other, and a reciprocity policy, produce a random assignment in which
//! every participant gives exactly one gift and receives exactly one gift.
//! Each giver then gets a private link that reveals only their own recipient.
//!
//! # Architecture
//!
//! As with any backtracking search, data splits into two tiers:
//!
//! ## Tier 1: Problem data (immutable)
//!
//! Computed once per generator and shared by every attempt:
//! - [`roster::Roster`] - participant names and their dense ids
//! - [`constraints::ExclusionMatrix`] - who may give to whom
//! - the [`ReciprocityPolicy`]
//!
//! ## Tier 2: Attempt state (mutable)
//!
//! Rebuilt for every attempt, changed only through the trail:
//! - [`Trail`] - records each write for O(1) backtracking
//! - [`state::DrawState`] - partial giver to recipient table
//! - [`state::statistics::Statistics`] - search counters
//!
//! # Search Algorithm
//!
//! One attempt is the predicate program
//!
//! 1. **ShuffleOrdersPredicate**: shuffle the giver order and the recipient pool
//! 2. **AssignRecipientsPredicate**: one round per giver, each offering the
//!    still-unclaimed allowed recipients as choices
//! 3. **SuspendPredicate**: stop with a complete assignment in the context
//!
//! run by the [`SearchEngine`]. The engine backtracks through the choices of
//! earlier rounds when a giver runs out of candidates. The
//! [`Generator`] repeats attempts with fresh randomness until one succeeds or
//! the attempt bound is reached.
//!
//! Before any attempt, a bipartite matching check proves the obviously
//! impossible inputs infeasible without searching.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use santa_draw::{DrawOptions, ForbiddenSet, Generator, ReciprocityPolicy};
//!
//! let forbidden = ForbiddenSet::build([("Chuck", "Laura"), ("Rakan", "Leah")]);
//! let options = DrawOptions::default().with_reciprocity(ReciprocityPolicy::Disallow);
//! let generator = Generator::new(
//!     ["Caleb", "Chuck", "Laura", "Rakan", "Leah"],
//!     &forbidden,
//!     options,
//! )
//! .unwrap();
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(2025);
//! let assignment = generator.generate(&mut rng).unwrap();
//! assert_eq!(assignment.len(), 5);
//! assert_ne!(assignment.recipient_of("Chuck"), Some("Laura"));
//! ```

pub mod cli;
pub mod config;
pub mod constraints;
pub mod context;
pub mod engine;
pub mod error;
pub mod feasibility;
pub mod generator;
pub mod predicates;
pub mod reveal;
pub mod roster;
pub mod state;
pub mod trail;

// Re-export commonly used types
pub use constraints::ForbiddenSet;
pub use context::DrawContext;
pub use engine::{Predicate, PredicateResult, SearchEngine};
pub use error::DrawError;
pub use generator::{generate, Assignment, DrawOptions, Generator, ReciprocityPolicy};
pub use trail::Trail;
