//! gostrap-toolchain: Go toolchain lifecycle management
//!
//! This crate is the boundary to the toolchain version manager:
//! - `Toolchains`: the capability the build core consumes (list, install,
//!   uninstall, resolve an installed root, run a tool from a toolchain)
//! - `GoToolchains`: a filesystem-backed implementation that installs Go
//!   versions from pre-fetched source trees via the upstream `make` scripts
//!
//! Fetching source archives over the network is out of scope; sources are
//! expected to be staged under the storage directory by an external fetcher.

pub mod error;
pub mod go;
pub mod manager;

pub use error::ToolchainError;
pub use go::GoToolchains;
pub use manager::{ToolOutput, Toolchains};
