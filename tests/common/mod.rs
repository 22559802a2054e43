// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use santa_draw::context::{DrawContext, DrawProblem};
use santa_draw::roster::Roster;
use santa_draw::{Assignment, ForbiddenSet, ReciprocityPolicy};

/// The group the tool was first written for: thirteen people, five couples.
pub const FAMILY: [&str; 13] = [
    "Caleb", "Chuck", "Kelina", "Libby", "MaryGrace", "Laura", "John", "Rakan", "Leah", "Sam",
    "Sav", "Allen", "Zoe",
];

pub const FAMILY_COUPLES: [(&str, &str); 5] = [
    ("Chuck", "Laura"),
    ("Rakan", "Leah"),
    ("Sam", "MaryGrace"),
    ("Zoe", "Sav"),
    ("Libby", "Allen"),
];

/// `P0`, `P1`, … as owned names.
pub fn numbered(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{}", i)).collect()
}

/// Assert every invariant a draw must satisfy.
pub fn assert_valid_assignment(
    assignment: &Assignment,
    participants: &[&str],
    forbidden: &ForbiddenSet,
    reciprocity: ReciprocityPolicy,
) {
    let expected: HashSet<&str> = participants.iter().copied().collect();

    let givers: HashSet<&str> = assignment.givers().collect();
    assert_eq!(givers, expected, "givers must be exactly the participants");

    let recipients: Vec<&str> = assignment.recipients().collect();
    let distinct: HashSet<&str> = recipients.iter().copied().collect();
    assert_eq!(recipients.len(), distinct.len(), "a recipient was drawn twice");
    assert_eq!(distinct, expected, "recipients must be exactly the participants");

    for (giver, recipient) in assignment {
        assert_ne!(giver, recipient, "{} drew themselves", giver);
        assert!(
            !forbidden.contains(giver, recipient),
            "{} drew forbidden partner {}",
            giver,
            recipient
        );
        if reciprocity == ReciprocityPolicy::Disallow {
            assert_ne!(
                assignment.recipient_of(recipient),
                Some(giver),
                "{} and {} drew each other",
                giver,
                recipient
            );
        }
    }
}

/// A fresh attempt context for `names` with no forbidden pairs.
pub fn context(names: &[&str], reciprocity: ReciprocityPolicy, seed: u64) -> DrawContext {
    let roster = Roster::new(names.iter().copied()).expect("distinct names");
    let problem = DrawProblem::new(roster, &ForbiddenSet::new(), reciprocity);
    DrawContext::new(Arc::new(problem), seed)
}
