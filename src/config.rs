// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Draw configuration loaded from TOML.
//!
//! ```toml
//! participants = ["Caleb", "Chuck", "Laura", "Rakan", "Leah"]
//! forbidden_pairs = [["Chuck", "Laura"], ["Rakan", "Leah"]]
//! allow_reciprocal = true
//! max_attempts = 5000
//! base_url = "https://example.github.io/secret-santa/index.html"
//! output = "assignments.csv"
//! qr_dir = "qr"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::constraints::ForbiddenSet;
use crate::error::ConfigError;
use crate::generator::{DrawOptions, ReciprocityPolicy, DEFAULT_MAX_ATTEMPTS};

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "santa.toml";

/// Everything needed to run and publish one draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawConfig {
    /// Unique participant names.
    pub participants: Vec<String>,

    /// Unordered pairs that must never draw each other.
    #[serde(default)]
    pub forbidden_pairs: Vec<(String, String)>,

    /// Allow A→B together with B→A.
    #[serde(default = "default_true")]
    pub allow_reciprocal: bool,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Reveal page the links point at.
    pub base_url: String,

    /// Manifest path.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Optional directory for one link file per giver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links_dir: Option<PathBuf>,

    /// Optional directory for one QR code image per giver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_dir: Option<PathBuf>,

    /// Fixed seed for a reproducible draw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_true() -> bool {
    true
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_output() -> PathBuf {
    PathBuf::from("assignments.csv")
}

impl DrawConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: DrawConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the things the generator does not: names in forbidden pairs
    /// must be participants, the base URL must parse, and at least one
    /// attempt must be allowed. Duplicate names are rejected here too, so a
    /// bad file fails before anything else runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for name in &self.participants {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateParticipant(name.clone()));
            }
        }

        for (a, b) in &self.forbidden_pairs {
            for name in [a, b] {
                if !seen.contains(name.as_str()) {
                    return Err(ConfigError::UnknownParticipant(
                        a.clone(),
                        b.clone(),
                        name.clone(),
                    ));
                }
            }
            if a == b {
                warn!(
                    participant = %a,
                    "forbidden pair names the same participant twice; dropped, it has no effect"
                );
            }
        }

        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        self.base_url()?;
        Ok(())
    }

    /// The parsed reveal page URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    /// Forbidden pairs as a set. Self-pairs are left out, since nobody
    /// draws themselves anyway.
    pub fn forbidden_set(&self) -> ForbiddenSet {
        ForbiddenSet::build(
            self.forbidden_pairs
                .iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.as_str(), b.as_str())),
        )
    }

    pub fn draw_options(&self) -> DrawOptions {
        DrawOptions::default()
            .with_reciprocity(ReciprocityPolicy::from(self.allow_reciprocal))
            .with_max_attempts(self.max_attempts)
    }
}
