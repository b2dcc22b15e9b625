//! The build orchestrator.
//!
//! `SampleGenerator` resolves and installs the requested toolchain versions,
//! synthesizes the shared source file once, fans out one build worker per
//! version, and collects per-version outcomes through a shared channel after
//! all workers have finished.

pub mod types;
mod worker;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gostrap_platform::{Arch, Os};
use gostrap_toolchain::Toolchains;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::consts::{FMT_LIB, SOURCE_FILE_NAME};
use crate::error::GenerateError;
use crate::source;

pub use types::{BuildOutcome, BuildRequest, BuildResult, GenerateOptions, GeneratorConfig};

pub struct SampleGenerator<M> {
  manager: Arc<M>,
  build_dir: PathBuf,
  config: GeneratorConfig,
}

impl<M: Toolchains + Send + Sync + 'static> SampleGenerator<M> {
  /// Create a generator storing artifacts under `<storage>/build`.
  pub fn new(
    storage: &Path,
    manager: Arc<M>,
    config: GeneratorConfig,
  ) -> std::io::Result<Self> {
    let build_dir = storage.join("build");
    std::fs::create_dir_all(&build_dir)?;
    Ok(Self {
      manager,
      build_dir,
      config,
    })
  }

  /// Default build directory, doubling as the artifact cache.
  pub fn build_dir(&self) -> &Path {
    &self.build_dir
  }

  fn source_path(&self) -> PathBuf {
    self.build_dir.join(SOURCE_FILE_NAME)
  }

  /// Build one sample per requested version.
  ///
  /// Unset architecture and OS are detected from the host, falling back to
  /// amd64 / windows; an empty library list falls back to the configured
  /// default set. Output overrides pair positionally against the requested
  /// version order. Results come back in request order, one per requested
  /// version; per-version failures are reported in the outcome, never as an
  /// error.
  pub async fn generate(
    &self,
    versions: &[String],
    libs: &[String],
    arch: Option<Arch>,
    os: Option<Os>,
    options: GenerateOptions,
  ) -> Result<Vec<BuildResult>, GenerateError> {
    if options.out_paths.len() > versions.len() {
      return Err(GenerateError::TooManyOutputPaths {
        out_paths: options.out_paths.len(),
        versions: versions.len(),
      });
    }

    let arch = arch.or_else(Arch::current).unwrap_or(Arch::Amd64);
    let os = os.or_else(Os::current).unwrap_or(Os::Windows);
    let build_dir = options
      .build_dir
      .clone()
      .unwrap_or_else(|| self.build_dir.clone());
    std::fs::create_dir_all(&build_dir)?;
    // Cache lookups scan this directory from every worker; an unreadable
    // build directory is a setup failure, not a per-version one.
    std::fs::read_dir(&build_dir)?;

    let mut libs: Vec<String> = if libs.is_empty() {
      self.config.default_libs.clone()
    } else {
      libs.to_vec()
    };
    // The synthesizer appends fmt itself; keep the fingerprint consistent
    // with the synthesized import list.
    libs.retain(|lib| lib != FMT_LIB);

    // Ensure every requested version is installed before dispatch.
    let mut installed = Vec::with_capacity(versions.len());
    for version in versions {
      let usable = match self.manager.install(version, options.force).await {
        Ok(usable) => usable,
        Err(e) => {
          error!(%version, error = %e, "toolchain install failed");
          false
        }
      };
      if !usable {
        warn!(%version, "toolchain unavailable");
      }
      installed.push(usable);
    }

    // The shared source file is fully written before any worker starts;
    // workers only read it.
    let source_path = self.source_path();
    source::synthesize(&source_path, &libs)?;
    debug!(source = %source_path.display(), n_versions = versions.len(), "dispatching build workers");

    let (tx, mut rx) = mpsc::channel(versions.len().max(1));
    let mut workers = JoinSet::new();
    let mut outcomes: Vec<Option<BuildOutcome>> = vec![None; versions.len()];

    for (idx, version) in versions.iter().enumerate() {
      if !installed[idx] {
        outcomes[idx] = Some(BuildOutcome::ToolchainUnavailable);
        continue;
      }

      let request = BuildRequest {
        version: version.clone(),
        arch,
        os,
        libs: libs.clone(),
        out_path: options.out_paths.get(idx).cloned(),
        force: options.force,
      };
      let manager = Arc::clone(&self.manager);
      let tx = tx.clone();
      let source_path = source_path.clone();
      let build_dir = build_dir.clone();
      let timeout = self.config.build_timeout;

      workers.spawn(async move {
        let outcome =
          worker::build_sample(manager, request, source_path, build_dir, timeout).await;
        // The receiver outlives all workers; a send failure is unreachable.
        let _ = tx.send((idx, outcome)).await;
      });
    }
    drop(tx);

    // Join barrier: wait for every worker, then drain the channel.
    while let Some(joined) = workers.join_next().await {
      if let Err(e) = joined {
        error!(error = %e, "build worker panicked");
      }
    }
    while let Some((idx, outcome)) = rx.recv().await {
      outcomes[idx] = Some(outcome);
    }

    Ok(
      versions
        .iter()
        .zip(outcomes)
        .map(|(version, outcome)| BuildResult {
          version: version.clone(),
          outcome: outcome.unwrap_or(BuildOutcome::CompileFailed {
            detail: "build worker exited without reporting".to_string(),
          }),
        })
        .collect(),
    )
  }
}
