//! Artifact lookup in the flat build directory.
//!
//! The build directory doubles as the cache index: a file whose stem equals
//! a fingerprint is the artifact for that fingerprint. No metadata is kept
//! and content is never hashed.

use std::path::{Path, PathBuf};

use crate::fingerprint::Fingerprint;

/// Find a previously built artifact for `fingerprint` in `build_dir`.
///
/// Scans the immediate entries of the directory and matches on exact,
/// case-sensitive file stem equality.
pub fn find_artifact(
  build_dir: &Path,
  fingerprint: &Fingerprint,
) -> std::io::Result<Option<PathBuf>> {
  for entry in std::fs::read_dir(build_dir)? {
    let path = entry?.path();
    if path
      .file_stem()
      .is_some_and(|stem| stem == fingerprint.as_str())
    {
      return Ok(Some(path));
    }
  }
  Ok(None)
}
