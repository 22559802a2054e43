// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Publishing a draw without revealing it.
//!
//! Each (giver, recipient) pair becomes a reveal link that only decodes in
//! the giver's hands. The manifest associates each giver with their link.
//! Link files and QR images give each giver a copy of their own link alone.
//! Verification re-checks a finished assignment against the configured
//! participants before anything is written.

pub mod link;
pub mod manifest;
pub mod qr;
pub mod verify;

pub use link::{build_reveal_link, decode_reveal_link, RevealPayload};
pub use manifest::{safe_file_stem, write_link_files, write_manifest, MANIFEST_HEADER};
pub use qr::write_qr_codes;
pub use verify::verify_assignment;
