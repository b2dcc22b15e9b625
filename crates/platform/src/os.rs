use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating systems available as Go build targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
  Android,
  Darwin,
  Dragonfly,
  Freebsd,
  Illumos,
  Ios,
  Js,
  Linux,
  Netbsd,
  Openbsd,
  Plan9,
  Solaris,
  Wasip1,
  Windows,
}

impl Os {
  /// Detect the host operating system at runtime
  ///
  /// Returns `None` if the host OS has no Go target equivalent
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "android" => Some(Self::Android),
      "macos" => Some(Self::Darwin),
      "dragonfly" => Some(Self::Dragonfly),
      "freebsd" => Some(Self::Freebsd),
      "illumos" => Some(Self::Illumos),
      "ios" => Some(Self::Ios),
      "linux" => Some(Self::Linux),
      "netbsd" => Some(Self::Netbsd),
      "openbsd" => Some(Self::Openbsd),
      "solaris" => Some(Self::Solaris),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the identifier passed as the `GOOS` value
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Android => "android",
      Self::Darwin => "darwin",
      Self::Dragonfly => "dragonfly",
      Self::Freebsd => "freebsd",
      Self::Illumos => "illumos",
      Self::Ios => "ios",
      Self::Js => "js",
      Self::Linux => "linux",
      Self::Netbsd => "netbsd",
      Self::Openbsd => "openbsd",
      Self::Plan9 => "plan9",
      Self::Solaris => "solaris",
      Self::Wasip1 => "wasip1",
      Self::Windows => "windows",
    }
  }

  /// Executable suffix for binaries targeting this OS
  pub fn exe_suffix(&self) -> &'static str {
    match self {
      Self::Windows => ".exe",
      _ => "",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Error returned when parsing an unknown operating system identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operating system: {0}")]
pub struct ParseOsError(pub String);

impl FromStr for Os {
  type Err = ParseOsError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "android" => Ok(Self::Android),
      "darwin" => Ok(Self::Darwin),
      "dragonfly" => Ok(Self::Dragonfly),
      "freebsd" => Ok(Self::Freebsd),
      "illumos" => Ok(Self::Illumos),
      "ios" => Ok(Self::Ios),
      "js" => Ok(Self::Js),
      "linux" => Ok(Self::Linux),
      "netbsd" => Ok(Self::Netbsd),
      "openbsd" => Ok(Self::Openbsd),
      "plan9" => Ok(Self::Plan9),
      "solaris" => Ok(Self::Solaris),
      "wasip1" => Ok(Self::Wasip1),
      "windows" => Ok(Self::Windows),
      other => Err(ParseOsError(other.to_string())),
    }
  }
}
