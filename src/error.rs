// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for the draw and its collaborators.
//!
//! The core only ever fails in two ways: the participant list is malformed
//! ([`DrawError::DuplicateParticipant`]) or the constraints admit no
//! assignment ([`DrawError::Infeasible`]). Backtracking failures inside an
//! attempt are ordinary control flow and never surface here.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::generator::ReciprocityPolicy;

/// Result type alias for draw operations.
pub type Result<T> = std::result::Result<T, DrawError>;

/// Why a draw was declared infeasible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfeasibleReason {
    /// Fewer than two participants; nobody can give without self-assigning.
    TooFewParticipants,

    /// The allowed giver/recipient graph has no perfect matching, so no
    /// bijection can exist whatever the random choices. `givers` are
    /// allowed fewer distinct recipients between them than there are givers.
    NoPerfectMatching { givers: Vec<String> },

    /// Two participants may draw nobody but each other while mutual pairs
    /// are disallowed.
    ForcedMutualPair { first: String, second: String },

    /// Every randomized attempt was exhausted without a valid assignment.
    AttemptsExhausted { attempts: u32 },
}

impl fmt::Display for InfeasibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InfeasibleReason::TooFewParticipants => {
                write!(f, "at least two participants are required")
            }
            InfeasibleReason::NoPerfectMatching { givers } if givers.len() == 1 => {
                write!(f, "no one-to-one assignment exists: {} has no allowed recipient", givers[0])
            }
            InfeasibleReason::NoPerfectMatching { givers } => {
                write!(
                    f,
                    "no one-to-one assignment exists: {} share too few allowed recipients",
                    givers.join(", ")
                )
            }
            InfeasibleReason::ForcedMutualPair { first, second } => {
                write!(
                    f,
                    "{} and {} may only draw each other, but mutual pairs are disallowed",
                    first, second
                )
            }
            InfeasibleReason::AttemptsExhausted { attempts } => {
                write!(f, "no valid assignment found in {} attempts", attempts)
            }
        }
    }
}

/// Errors returned by the assignment generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The same participant name appears more than once.
    #[error("Configuration error: participant '{name}' is listed more than once")]
    DuplicateParticipant { name: String },

    /// No assignment satisfies the constraints.
    #[error(
        "Infeasible draw for {participants} participants \
         ({forbidden_pairs} forbidden pairs, reciprocity {reciprocity}): {reason}"
    )]
    Infeasible {
        participants: usize,
        forbidden_pairs: usize,
        reciprocity: ReciprocityPolicy,
        reason: InfeasibleReason,
    },
}

impl DrawError {
    /// True for the infeasibility class of failure.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, DrawError::Infeasible { .. })
    }
}

/// Errors raised while loading or validating a draw configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: participant '{0}' is listed more than once")]
    DuplicateParticipant(String),

    #[error("Configuration error: forbidden pair ({0}, {1}) names unknown participant '{2}'")]
    UnknownParticipant(String, String, String),

    #[error("Configuration error: invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Configuration error: max_attempts must be at least 1")]
    ZeroAttempts,
}

/// Errors raised while decoding a reveal link.
#[derive(Debug, Error)]
pub enum RevealError {
    #[error("Invalid reveal link: {0}")]
    Url(#[from] url::ParseError),

    #[error("Reveal link has no 'data' parameter")]
    MissingData,

    #[error("Reveal payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Reveal payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Post-hoc verification failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("Verification failed: givers missing {missing:?}, unexpected {unexpected:?}")]
    GiverMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Verification failed: recipients missing {missing:?}, unexpected {unexpected:?}")]
    RecipientMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("Verification failed: '{0}' is assigned to themselves")]
    SelfAssigned(String),
}

/// Top-level error for the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Reveal(#[from] RevealError),

    #[error(transparent)]
    Verify(#[from] VerifyError),

    #[error("I/O error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
