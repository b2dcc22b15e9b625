//! gostrap-lib: build orchestration and fingerprint cache
//!
//! This crate turns a build request (Go version, architecture, OS, library
//! set) into a deterministic fingerprint, reuses prior artifacts named by
//! that fingerprint, and fans out one build worker per requested version:
//! - `Fingerprint`: deterministic, filesystem-safe cache key
//! - `cache`: artifact lookup by file stem in the flat build directory
//! - `source`: synthesis of the minimal Go program to compile
//! - `SampleGenerator`: the orchestrator, generic over the `Toolchains`
//!   version-manager capability

pub mod cache;
pub mod consts;
pub mod error;
pub mod fingerprint;
pub mod generator;
pub mod source;

pub use error::GenerateError;
pub use fingerprint::Fingerprint;
pub use generator::{
  BuildOutcome, BuildResult, GenerateOptions, GeneratorConfig, SampleGenerator,
};
