use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CPU architectures available as Go build targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
  I386,
  Amd64,
  Arm,
  Arm64,
  Mips,
  Mips64,
  Mips64le,
  Mipsle,
  Ppc64,
  Ppc64le,
  Riscv64,
  S390x,
}

impl Arch {
  /// Detect the host CPU architecture at runtime
  ///
  /// Returns `None` if the host architecture has no Go target equivalent
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86" => Some(Self::I386),
      "x86_64" => Some(Self::Amd64),
      "arm" => Some(Self::Arm),
      "aarch64" => Some(Self::Arm64),
      "mips" => Some(Self::Mips),
      "mips64" => Some(Self::Mips64),
      "powerpc64" => Some(Self::Ppc64),
      "riscv64" => Some(Self::Riscv64),
      "s390x" => Some(Self::S390x),
      _ => None,
    }
  }

  /// Returns the identifier passed as the `GOARCH` value
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::I386 => "i386",
      Self::Amd64 => "amd64",
      Self::Arm => "arm",
      Self::Arm64 => "arm64",
      Self::Mips => "mips",
      Self::Mips64 => "mips64",
      Self::Mips64le => "mips64le",
      Self::Mipsle => "mipsle",
      Self::Ppc64 => "ppc64",
      Self::Ppc64le => "ppc64le",
      Self::Riscv64 => "riscv64",
      Self::S390x => "s390x",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Error returned when parsing an unknown architecture identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown architecture: {0}")]
pub struct ParseArchError(pub String);

impl FromStr for Arch {
  type Err = ParseArchError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "i386" => Ok(Self::I386),
      "amd64" => Ok(Self::Amd64),
      "arm" => Ok(Self::Arm),
      "arm64" => Ok(Self::Arm64),
      "mips" => Ok(Self::Mips),
      "mips64" => Ok(Self::Mips64),
      "mips64le" => Ok(Self::Mips64le),
      "mipsle" => Ok(Self::Mipsle),
      "ppc64" => Ok(Self::Ppc64),
      "ppc64le" => Ok(Self::Ppc64le),
      "riscv64" => Ok(Self::Riscv64),
      "s390x" => Ok(Self::S390x),
      other => Err(ParseArchError(other.to_string())),
    }
  }
}
