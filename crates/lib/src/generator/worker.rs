//! The per-version build worker.
//!
//! Each worker runs the strictly ordered sequence cache check → toolchain
//! resolution → out-of-process compile → artifact relocation. Failures are
//! confined to the worker and reported as a `BuildOutcome`; a failing
//! version never aborts its siblings.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use gostrap_toolchain::{ToolOutput, ToolchainError, Toolchains};
use tracing::{debug, error};

use crate::cache;
use crate::consts::{ENV_GOARCH, ENV_GOOS, ENV_GOROOT};
use crate::fingerprint::Fingerprint;
use crate::generator::types::{BuildOutcome, BuildRequest};

/// Build one sample, reusing a cached artifact when possible.
pub(crate) async fn build_sample<M: Toolchains>(
  manager: Arc<M>,
  request: BuildRequest,
  source_path: PathBuf,
  build_dir: PathBuf,
  timeout: Option<Duration>,
) -> BuildOutcome {
  let fingerprint = Fingerprint::compute(&request.version, request.os, &request.libs);

  if !request.force {
    match cache::find_artifact(&build_dir, &fingerprint) {
      Ok(Some(artifact)) => {
        debug!(version = %request.version, "sample already generated, skipping");
        return BuildOutcome::CacheHit { artifact };
      }
      Ok(None) => {}
      Err(e) => {
        return BuildOutcome::CompileFailed {
          detail: format!("cache lookup failed: {e}"),
        };
      }
    }
  }

  let Some(go_root) = manager.toolchain_root(&request.version) else {
    return BuildOutcome::ToolchainUnavailable;
  };

  let artifact = build_dir.join(fingerprint.artifact_name(request.os));
  let output = match invoke_compiler(
    &*manager,
    &request,
    &go_root,
    &source_path,
    &artifact,
    timeout,
  )
  .await
  {
    Ok(output) => output,
    Err(outcome) => return outcome,
  };

  if !output.success() {
    error!(
      version = %request.version,
      code = ?output.code,
      output = %output.output,
      "go build failed"
    );
    return BuildOutcome::CompileFailed {
      detail: output.output,
    };
  }

  place_artifact(artifact, request.out_path)
}

/// Run `go build` from the resolved toolchain, bounded by the deadline.
async fn invoke_compiler<M: Toolchains>(
  manager: &M,
  request: &BuildRequest,
  go_root: &Path,
  source_path: &Path,
  artifact: &Path,
  timeout: Option<Duration>,
) -> Result<ToolOutput, BuildOutcome> {
  let args = vec![
    "build".to_string(),
    "-o".to_string(),
    artifact.to_string_lossy().into_owned(),
    source_path.to_string_lossy().into_owned(),
  ];
  let env = vec![
    (ENV_GOROOT.to_string(), go_root.to_string_lossy().into_owned()),
    (ENV_GOARCH.to_string(), request.arch.as_str().to_string()),
    (ENV_GOOS.to_string(), request.os.as_str().to_string()),
  ];

  debug!(version = %request.version, artifact = %artifact.display(), "building sample");
  let invocation = manager.run(&request.version, "go", &args, &env);

  let result = match timeout {
    Some(limit) => match tokio::time::timeout(limit, invocation).await {
      Ok(result) => result,
      Err(_) => {
        error!(version = %request.version, ?limit, "go build timed out");
        return Err(BuildOutcome::CompileFailed {
          detail: format!("compile timed out after {limit:?}"),
        });
      }
    },
    None => invocation.await,
  };

  result.map_err(|e| match e {
    ToolchainError::NotInstalled { .. } => BuildOutcome::ToolchainUnavailable,
    other => BuildOutcome::CompileFailed {
      detail: other.to_string(),
    },
  })
}

/// Move the artifact to its override destination, if one was requested.
fn place_artifact(artifact: PathBuf, out_path: Option<PathBuf>) -> BuildOutcome {
  let Some(out_path) = out_path else {
    return BuildOutcome::Built { artifact };
  };
  match std::fs::rename(&artifact, &out_path) {
    Ok(()) => BuildOutcome::Built { artifact: out_path },
    Err(e) => BuildOutcome::CompileFailed {
      detail: format!(
        "failed to move artifact to {}: {e}",
        out_path.display()
      ),
    },
  }
}
