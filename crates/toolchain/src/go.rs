//! Filesystem-backed Go toolchain manager.
//!
//! Storage topology, rooted at the storage directory handed to `new`:
//! - `toolchains/<version>`: installed, runnable Go roots
//! - `sources/<version>`: pre-fetched source trees awaiting installation
//!
//! Installation runs the upstream bootstrap script (`make.bash`, or
//! `make.bat` on Windows) inside the staged tree's `src/` directory and
//! renames the tree into the install root on success.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::error::{Result, ToolchainError};
use crate::manager::{ToolOutput, Toolchains};

pub struct GoToolchains {
  install_dir: PathBuf,
  sources_dir: PathBuf,
}

impl GoToolchains {
  /// Create a manager rooted at `storage`, creating the layout on disk.
  pub fn new(storage: &Path) -> std::io::Result<Self> {
    let install_dir = storage.join("toolchains");
    let sources_dir = storage.join("sources");
    std::fs::create_dir_all(&install_dir)?;
    std::fs::create_dir_all(&sources_dir)?;
    Ok(Self {
      install_dir,
      sources_dir,
    })
  }

  /// Names of the immediate subdirectories of `dir`.
  fn dir_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
      let entry = entry?;
      if entry.file_type()?.is_dir() {
        names.push(entry.file_name().to_string_lossy().into_owned());
      }
    }
    names.sort();
    Ok(names)
  }
}

/// The upstream bootstrap command for the host platform.
fn make_command() -> (&'static str, &'static [&'static str]) {
  if cfg!(windows) {
    ("cmd", &["/C", "make.bat"])
  } else {
    ("/bin/bash", &["make.bash"])
  }
}

impl Toolchains for GoToolchains {
  fn list_available(&self) -> Result<Vec<String>> {
    let mut versions = Self::dir_names(&self.sources_dir)?;
    versions.extend(Self::dir_names(&self.install_dir)?);
    versions.sort();
    versions.dedup();
    Ok(versions)
  }

  fn list_installed(&self) -> Result<Vec<String>> {
    Self::dir_names(&self.install_dir)
  }

  async fn install(&self, version: &str, force: bool) -> Result<bool> {
    let root = self.install_dir.join(version);
    if root.is_dir() && !force {
      debug!(version, "toolchain already installed");
      return Ok(true);
    }

    let source_tree = self.sources_dir.join(version);
    if !source_tree.is_dir() {
      // A forced reinstall without staged sources keeps the existing
      // install; the version stays usable.
      if root.is_dir() {
        debug!(version, "no staged source tree, keeping existing install");
        return Ok(true);
      }
      warn!(version, "no staged source tree for version");
      return Ok(false);
    }

    debug!(version, source = %source_tree.display(), "building toolchain");
    let (program, args) = make_command();
    let output = Command::new(program)
      .args(args)
      .current_dir(source_tree.join("src"))
      .output()
      .await?;

    if !output.status.success() {
      let stdout = String::from_utf8_lossy(&output.stdout);
      let stderr = String::from_utf8_lossy(&output.stderr);
      error!(version, %stdout, %stderr, "toolchain bootstrap failed");
      return Ok(false);
    }

    // A forced reinstall replaces the previous root.
    if root.is_dir() {
      std::fs::remove_dir_all(&root)?;
    }
    std::fs::rename(&source_tree, &root)?;
    info!(version, root = %root.display(), "toolchain installed");
    Ok(true)
  }

  fn uninstall(&self, version: &str) -> Result<()> {
    let root = self.install_dir.join(version);
    if root.is_dir() {
      debug!(version, root = %root.display(), "uninstalling toolchain");
      std::fs::remove_dir_all(&root)?;
    }
    Ok(())
  }

  fn toolchain_root(&self, version: &str) -> Option<PathBuf> {
    let root = self.install_dir.join(version);
    root.is_dir().then_some(root)
  }

  async fn run(
    &self,
    version: &str,
    tool: &str,
    args: &[String],
    env: &[(String, String)],
  ) -> Result<ToolOutput> {
    let root = self
      .toolchain_root(version)
      .ok_or_else(|| ToolchainError::NotInstalled {
        version: version.to_string(),
      })?;

    let bin = root
      .join("bin")
      .join(format!("{tool}{}", std::env::consts::EXE_SUFFIX));
    if !bin.is_file() {
      return Err(ToolchainError::ToolNotFound {
        tool: tool.to_string(),
        root,
      });
    }

    let mut command = Command::new(&bin);
    command.args(args);
    for (key, value) in env {
      command.env(key, value);
    }

    debug!(version, tool, ?args, "running toolchain tool");
    let output = command.output().await?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Ok(ToolOutput {
      code: output.status.code(),
      output: combined,
    })
  }
}
