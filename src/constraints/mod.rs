// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Forbidden-pair constraints.
//!
//! Declarations arrive as name pairs in any order and with duplicates.
//! [`ForbiddenSet`] normalizes them into an unordered-pair set with O(1)
//! membership, and [`ExclusionMatrix`] projects that set onto roster ids for
//! the search.

pub mod forbidden;
pub mod matrix;

pub use forbidden::{ForbiddenSet, UnorderedPair};
pub use matrix::ExclusionMatrix;
