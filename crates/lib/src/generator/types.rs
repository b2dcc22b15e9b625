//! Request, configuration, and result types for the generator.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gostrap_platform::{Arch, Os};
use serde::Serialize;

use crate::consts::DEFAULT_LIBS;

/// Configuration for a `SampleGenerator`.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
  /// Libraries included when a request names none.
  pub default_libs: Vec<String>,
  /// Deadline for a single compiler invocation; `None` waits indefinitely.
  pub build_timeout: Option<Duration>,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self {
      default_libs: DEFAULT_LIBS.iter().map(|s| s.to_string()).collect(),
      build_timeout: None,
    }
  }
}

/// Per-call options for `SampleGenerator::generate`.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
  /// Output overrides, paired positionally against the requested versions.
  /// Must not be longer than the version list.
  pub out_paths: Vec<PathBuf>,
  /// Overrides the generator's build directory for this call.
  pub build_dir: Option<PathBuf>,
  /// Rebuild (and reinstall toolchains) even when artifacts exist.
  pub force: bool,
}

/// Parameters for building one sample; one instance per requested version.
#[derive(Debug, Clone)]
pub struct BuildRequest {
  pub version: String,
  pub arch: Arch,
  pub os: Os,
  pub libs: Vec<String>,
  pub out_path: Option<PathBuf>,
  pub force: bool,
}

/// How one requested version was satisfied, or why it was not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BuildOutcome {
  /// Freshly compiled.
  Built { artifact: PathBuf },
  /// A prior artifact with the same fingerprint was reused.
  CacheHit { artifact: PathBuf },
  /// The toolchain could not be installed or resolved.
  ToolchainUnavailable,
  /// The compiler invocation failed, timed out, or the artifact could not
  /// be placed at its destination.
  CompileFailed { detail: String },
}

impl BuildOutcome {
  /// Path of the artifact, if one was produced or reused.
  pub fn artifact(&self) -> Option<&Path> {
    match self {
      Self::Built { artifact } | Self::CacheHit { artifact } => Some(artifact),
      _ => None,
    }
  }
}

/// Outcome for one requested version. Results are returned in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildResult {
  pub version: String,
  pub outcome: BuildOutcome,
}
