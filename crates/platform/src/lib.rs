//! gostrap-platform: the Go build target matrix
//!
//! This crate provides the closed sets of CPU architectures and operating
//! systems that Go samples can be built for, with host detection and the
//! string identifiers passed verbatim as `GOARCH`/`GOOS` values.

pub mod arch;
pub mod os;

pub use arch::Arch;
pub use os::Os;
