//! Deterministic cache keys for built samples.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use gostrap_platform::Os;
use serde::Serialize;

/// Cache key identifying a built sample.
///
/// The key is the URL-safe base64 encoding of
/// `"{version}.{os}.{libraries joined by commas}"`, which keeps it safe to
/// use directly as a file name. Library order is significant. The target
/// architecture is not part of the key; artifacts built for different
/// architectures of the same (version, os, libraries) share a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Fingerprint(String);

impl Fingerprint {
  /// Compute the fingerprint for a build parameter set.
  pub fn compute(version: &str, os: Os, libs: &[String]) -> Self {
    let composed = format!("{version}.{os}.{}", libs.join(","));
    Self(URL_SAFE.encode(composed.as_bytes()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// File name of the artifact for this fingerprint, with the executable
  /// suffix the target OS expects.
  pub fn artifact_name(&self, os: Os) -> String {
    format!("{}{}", self.0, os.exe_suffix())
  }
}

impl fmt::Display for Fingerprint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
