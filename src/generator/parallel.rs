// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Running independent attempts on the rayon thread pool.
//!
//! All attempt seeds are drawn from the caller's stream up front, in the
//! same order the sequential driver draws them. Among the attempts that
//! succeed, the one with the lowest index wins, so for a fixed caller seed
//! the parallel and sequential drivers return the same assignment.

use rand::RngCore;
use rayon::prelude::*;
use tracing::info;

use super::{DrawOutcome, Generator};
use crate::error::{InfeasibleReason, Result};
use crate::state::statistics::Counters;

impl Generator {
    /// Draw one assignment, running attempts in parallel.
    ///
    /// The returned statistics cover the winning attempt only; attempts
    /// racing it on other workers are discarded.
    pub fn generate_parallel<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<DrawOutcome> {
        self.check_feasible()?;

        let seeds: Vec<u64> = (0..self.options.max_attempts)
            .map(|_| rng.next_u64())
            .collect();

        let winner = seeds.par_iter().enumerate().find_map_first(|(index, &seed)| {
            let result = self.run_attempt(seed);
            result
                .solution
                .map(|table| (index, table, result.statistics))
        });

        match winner {
            Some((index, table, statistics)) => {
                let attempts = index as u32 + 1;
                info!(
                    participants = self.problem.size(),
                    attempts,
                    placements = statistics.get(Counters::Placements),
                    "parallel draw succeeded"
                );
                Ok(DrawOutcome {
                    assignment: self.to_assignment(&table),
                    attempts,
                    statistics,
                })
            }
            None => Err(self.infeasible(InfeasibleReason::AttemptsExhausted {
                attempts: self.options.max_attempts,
            })),
        }
    }
}
