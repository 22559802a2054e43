// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! QR images of the reveal links, one PNG per giver.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, Luma};
use qrcode::QrCode;
use tracing::debug;
use url::Url;

use crate::generator::Assignment;
use crate::reveal::link::build_reveal_link;
use crate::reveal::manifest::StemAllocator;

/// Write one `<stem>.png` QR code per giver encoding their reveal link.
///
/// Stems follow the same rules as [`write_link_files`], so a giver's link
/// file and QR image share a name. Returns the paths written, in giver order.
///
/// [`write_link_files`]: crate::reveal::write_link_files
pub fn write_qr_codes(
    dir: &Path,
    assignment: &Assignment,
    base_url: &Url,
) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut stems = StemAllocator::new();
    let mut written = Vec::with_capacity(assignment.len());
    for (giver, recipient) in assignment {
        let path = dir.join(format!("{}.png", stems.allocate(giver)));
        let link = build_reveal_link(base_url, giver, recipient);
        write_qr_png(&path, &link)?;
        debug!(path = %path.display(), "wrote QR code");
        written.push(path);
    }
    Ok(written)
}

fn write_qr_png(path: &Path, link: &Url) -> io::Result<()> {
    let code = QrCode::new(link.as_str().as_bytes())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    let image = code.render::<Luma<u8>>().build();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(image_to_io)
}

fn image_to_io(err: ImageError) -> io::Error {
    match err {
        ImageError::IoError(err) => err,
        other => io::Error::new(io::ErrorKind::Other, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_png_per_giver() {
        let dir = tempfile::tempdir().unwrap();
        let assignment =
            Assignment::from_iter_for_test([("Ann", "Bob"), ("Bob", "Cy"), ("Cy", "Ann")]);
        let base = Url::parse("https://example.com/reveal").unwrap();

        let written = write_qr_codes(&dir.path().join("qr"), &assignment, &base).unwrap();
        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Ann.png", "Bob.png", "Cy.png"]);

        for path in &written {
            let bytes = fs::read(path).unwrap();
            assert!(!bytes.is_empty(), "{} is empty", path.display());
            assert!(bytes.starts_with(b"\x89PNG"), "{} is not a PNG", path.display());
        }
    }

    #[test]
    fn test_qr_stems_avoid_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let assignment =
            Assignment::from_iter_for_test([("Mary Grace", "A"), ("MaryGrace", "B")]);
        let base = Url::parse("https://example.com/reveal").unwrap();

        let written = write_qr_codes(dir.path(), &assignment, &base).unwrap();
        assert_eq!(written[0].file_name().unwrap(), "MaryGrace.png");
        assert_eq!(written[1].file_name().unwrap(), "MaryGrace-2.png");
    }

    #[test]
    fn test_unwritable_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        fs::write(&blocker, "not a directory").unwrap();
        let assignment = Assignment::from_iter_for_test([("Ann", "Bob"), ("Bob", "Ann")]);
        let base = Url::parse("https://example.com/reveal").unwrap();

        assert!(write_qr_codes(&blocker, &assignment, &base).is_err());
    }
}
