// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Feasibility pre-check.
//!
//! A valid draw is a perfect matching in the bipartite graph joining each
//! giver to every recipient it is allowed (not itself, not forbidden). If no
//! perfect matching exists, no amount of random retrying can succeed, so the
//! generator checks this first.
//!
//! When mutual pairs are allowed the check is exact: any perfect matching is
//! a valid assignment. When they are disallowed it is only a necessary
//! condition. [`isolated_pairs`] catches the common extra case, two people
//! who may only draw each other; the randomized attempts decide the rest.

use crate::constraints::ExclusionMatrix;
use crate::roster::ParticipantId;

/// Find some perfect matching using augmenting paths (Kuhn's algorithm).
///
/// Returns `recipient[g]` for every giver `g`. When no perfect matching
/// exists, returns a set of givers whose allowed recipients, taken together,
/// are fewer than the givers themselves. Relaxing a forbidden pair inside
/// that set is what it takes to make the draw possible. Deterministic;
/// O(n³) in the worst case.
pub fn find_perfect_matching(
    exclusions: &ExclusionMatrix,
) -> Result<Vec<ParticipantId>, Vec<ParticipantId>> {
    let size = exclusions.size();
    let mut giver_of: Vec<Option<ParticipantId>> = vec![None; size];

    for giver in (0..size).map(|i| ParticipantId(i as u32)) {
        let mut visited = vec![false; size];
        if !augment(exclusions, giver, &mut visited, &mut giver_of) {
            return Err(blocked_givers(giver, &visited, &giver_of));
        }
    }

    let mut recipient_of = vec![ParticipantId(0); size];
    for (recipient, giver) in giver_of.iter().enumerate() {
        if let Some(giver) = giver {
            recipient_of[giver.index()] = ParticipantId(recipient as u32);
        }
    }
    Ok(recipient_of)
}

/// True if at least one bijection respects the self and forbidden exclusions.
pub fn has_perfect_matching(exclusions: &ExclusionMatrix) -> bool {
    find_perfect_matching(exclusions).is_ok()
}

/// Try to match `giver`, re-routing earlier givers along an alternating path.
///
/// Recursion depth is bounded by the number of participants.
fn augment(
    exclusions: &ExclusionMatrix,
    giver: ParticipantId,
    visited: &mut [bool],
    giver_of: &mut [Option<ParticipantId>],
) -> bool {
    for recipient in exclusions.allowed_recipients(giver) {
        if visited[recipient.index()] {
            continue;
        }
        visited[recipient.index()] = true;

        let free = match giver_of[recipient.index()] {
            None => true,
            Some(holder) => augment(exclusions, holder, visited, giver_of),
        };
        if free {
            giver_of[recipient.index()] = Some(giver);
            return true;
        }
    }
    false
}

/// Givers reached by a failed augmenting search.
///
/// Every recipient the search visited is held by one of them, and none of
/// them may receive from outside the visited set, so there is exactly one
/// giver more than recipients.
fn blocked_givers(
    failed: ParticipantId,
    visited: &[bool],
    giver_of: &[Option<ParticipantId>],
) -> Vec<ParticipantId> {
    let mut givers: Vec<ParticipantId> = visited
        .iter()
        .zip(giver_of)
        .filter(|(seen, _)| **seen)
        .filter_map(|(_, holder)| *holder)
        .collect();
    givers.push(failed);
    givers.sort();
    givers
}

/// Pairs of participants who are allowed to draw nobody but each other.
///
/// The allowed graph is symmetric, so every assignment permutes each of its
/// connected components. A component of exactly two people forces them to
/// swap, which is a mutual pair.
pub fn isolated_pairs(exclusions: &ExclusionMatrix) -> Vec<(ParticipantId, ParticipantId)> {
    let size = exclusions.size();
    let mut component = vec![usize::MAX; size];
    let mut pairs = Vec::new();

    for start in 0..size {
        if component[start] != usize::MAX {
            continue;
        }
        component[start] = start;
        let mut members = vec![ParticipantId(start as u32)];
        let mut next = 0;
        while next < members.len() {
            let current = members[next];
            next += 1;
            for neighbour in exclusions.allowed_recipients(current) {
                if component[neighbour.index()] == usize::MAX {
                    component[neighbour.index()] = start;
                    members.push(neighbour);
                }
            }
        }
        if let [a, b] = members[..] {
            pairs.push((a, b));
        }
    }
    pairs
}
