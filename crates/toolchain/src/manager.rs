//! The version-manager capability consumed by the build core.

use std::future::Future;
use std::path::PathBuf;

use crate::error::Result;

/// Captured output of a tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
  /// Process exit code, if the process exited normally.
  pub code: Option<i32>,
  /// Combined stdout and stderr.
  pub output: String,
}

impl ToolOutput {
  /// Whether the invocation exited with status zero.
  pub fn success(&self) -> bool {
    self.code == Some(0)
  }
}

/// Lifecycle management for versioned compiler toolchains.
///
/// The build core treats this as an abstract capability: resolve a version
/// string to an installed root, install on demand, and execute a named tool
/// from within an installation. Futures are `Send` so workers holding an
/// implementation behind an `Arc` can be spawned onto the runtime.
pub trait Toolchains {
  /// Versions available to install.
  fn list_available(&self) -> Result<Vec<String>>;

  /// Versions currently installed.
  fn list_installed(&self) -> Result<Vec<String>>;

  /// Install a version, returning whether it is usable afterwards.
  ///
  /// `force` reinstalls even when the version is already present. A version
  /// that cannot be installed yields `Ok(false)`, not an error: callers
  /// treat it as an unavailable toolchain, not a batch failure.
  fn install(&self, version: &str, force: bool) -> impl Future<Output = Result<bool>> + Send;

  /// Remove an installed version.
  fn uninstall(&self, version: &str) -> Result<()>;

  /// Resolve the installation root of a version, or `None` if not installed.
  fn toolchain_root(&self, version: &str) -> Option<PathBuf>;

  /// Run a named tool from an installed toolchain with extra environment
  /// variables, capturing combined output.
  fn run(
    &self,
    version: &str,
    tool: &str,
    args: &[String],
    env: &[(String, String)],
  ) -> impl Future<Output = Result<ToolOutput>> + Send;
}
