use std::path::PathBuf;

/// Errors from toolchain management operations.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
  #[error("toolchain version {version} is not installed")]
  NotInstalled { version: String },

  #[error("tool {tool} not found in toolchain at {root}")]
  ToolNotFound { tool: String, root: PathBuf },

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ToolchainError>;
