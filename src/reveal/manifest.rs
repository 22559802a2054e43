// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Writing the manifest and per-giver link files.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::generator::Assignment;
use crate::reveal::link::build_reveal_link;

/// First line of every manifest.
pub const MANIFEST_HEADER: [&str; 2] = ["giver", "url"];

/// Write a `giver,url` manifest with one row per giver, sorted by giver.
pub fn write_manifest<W: Write>(
    mut out: W,
    assignment: &Assignment,
    base_url: &Url,
) -> io::Result<()> {
    write_row(&mut out, &MANIFEST_HEADER)?;
    for (giver, recipient) in assignment {
        let link = build_reveal_link(base_url, giver, recipient);
        write_row(&mut out, &[giver, link.as_str()])?;
    }
    out.flush()
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    let row: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
    writeln!(out, "{}", row.join(","))
}

/// Quote a field when it holds a delimiter, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// File-name stem for a participant: alphanumerics, `-` and `_` only.
///
/// Names with nothing usable map to `unknown`.
pub fn safe_file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if stem.is_empty() {
        "unknown".to_string()
    } else {
        stem
    }
}

/// Hands out distinct file stems for participant names.
///
/// Stems that collide after sanitizing get a numeric suffix, so
/// `Mary Grace` and `MaryGrace` become `MaryGrace` and `MaryGrace-2`.
#[derive(Debug, Default)]
pub(crate) struct StemAllocator {
    used: HashSet<String>,
}

impl StemAllocator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn allocate(&mut self, name: &str) -> String {
        let base = safe_file_stem(name);
        let mut stem = base.clone();
        let mut n = 2;
        while !self.used.insert(stem.clone()) {
            stem = format!("{}-{}", base, n);
            n += 1;
        }
        stem
    }
}

/// Write one `<stem>.txt` file per giver holding only their link.
///
/// Returns the paths written, in giver order.
pub fn write_link_files(
    dir: &Path,
    assignment: &Assignment,
    base_url: &Url,
) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut stems = StemAllocator::new();
    let mut written = Vec::with_capacity(assignment.len());
    for (giver, recipient) in assignment {
        let path = dir.join(format!("{}.txt", stems.allocate(giver)));
        let link = build_reveal_link(base_url, giver, recipient);
        fs::write(&path, format!("{}\n", link))?;
        debug!(path = %path.display(), "wrote link file");
        written.push(path);
    }
    Ok(written)
}
