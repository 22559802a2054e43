// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Post-hoc sanity check of an assignment against the configured roster.

use std::collections::BTreeSet;

use crate::error::VerifyError;
use crate::generator::Assignment;

/// Check that `assignment` covers exactly `participants` as givers and as
/// recipients, and that nobody draws themselves.
///
/// This does not re-check forbidden pairs: it guards the hand-off between
/// the generator and the writers, not the generator's own invariants.
pub fn verify_assignment<S: AsRef<str>>(
    assignment: &Assignment,
    participants: &[S],
) -> Result<(), VerifyError> {
    let expected: BTreeSet<&str> = participants.iter().map(AsRef::as_ref).collect();

    let givers: BTreeSet<&str> = assignment.givers().collect();
    if givers != expected {
        return Err(VerifyError::GiverMismatch {
            missing: difference(&expected, &givers),
            unexpected: difference(&givers, &expected),
        });
    }

    let recipients: BTreeSet<&str> = assignment.recipients().collect();
    if recipients != expected || assignment.len() != expected.len() {
        return Err(VerifyError::RecipientMismatch {
            missing: difference(&expected, &recipients),
            unexpected: difference(&recipients, &expected),
        });
    }

    if let Some((giver, _)) = assignment.iter().find(|(g, r)| g == r) {
        return Err(VerifyError::SelfAssigned(giver.to_string()));
    }

    Ok(())
}

fn difference(a: &BTreeSet<&str>, b: &BTreeSet<&str>) -> Vec<String> {
    a.difference(b).map(|s| s.to_string()).collect()
}
