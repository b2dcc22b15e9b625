//! End-to-end orchestrator tests against a mock toolchain manager.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use gostrap_lib::{
  BuildOutcome, Fingerprint, GenerateOptions, GeneratorConfig, SampleGenerator,
};
use gostrap_platform::{Arch, Os};
use gostrap_toolchain::{ToolOutput, Toolchains};
use tempfile::TempDir;

/// A toolchain manager with a fixed set of installable versions whose `go`
/// invocations are simulated by writing the requested output file.
struct MockToolchains {
  root: PathBuf,
  installable: HashSet<String>,
  failing: HashSet<String>,
  compile_delay: Option<Duration>,
  compiles: AtomicUsize,
}

impl MockToolchains {
  fn new(versions: &[&str]) -> Self {
    Self {
      root: PathBuf::from("/fake/goroot"),
      installable: versions.iter().map(|v| v.to_string()).collect(),
      failing: HashSet::new(),
      compile_delay: None,
      compiles: AtomicUsize::new(0),
    }
  }

  fn compiles(&self) -> usize {
    self.compiles.load(Ordering::SeqCst)
  }
}

impl Toolchains for MockToolchains {
  fn list_available(&self) -> gostrap_toolchain::error::Result<Vec<String>> {
    Ok(self.installable.iter().cloned().collect())
  }

  fn list_installed(&self) -> gostrap_toolchain::error::Result<Vec<String>> {
    Ok(self.installable.iter().cloned().collect())
  }

  async fn install(&self, version: &str, _force: bool) -> gostrap_toolchain::error::Result<bool> {
    Ok(self.installable.contains(version))
  }

  fn uninstall(&self, _version: &str) -> gostrap_toolchain::error::Result<()> {
    Ok(())
  }

  fn toolchain_root(&self, version: &str) -> Option<PathBuf> {
    self.installable.contains(version).then(|| self.root.clone())
  }

  async fn run(
    &self,
    version: &str,
    _tool: &str,
    args: &[String],
    _env: &[(String, String)],
  ) -> gostrap_toolchain::error::Result<ToolOutput> {
    if let Some(delay) = self.compile_delay {
      tokio::time::sleep(delay).await;
    }
    self.compiles.fetch_add(1, Ordering::SeqCst);

    if self.failing.contains(version) {
      return Ok(ToolOutput {
        code: Some(2),
        output: "syntax error".to_string(),
      });
    }

    // args are ["build", "-o", <obj>, <source>]
    let obj = args
      .iter()
      .position(|a| a == "-o")
      .and_then(|i| args.get(i + 1))
      .expect("build invocation carries an output path");
    std::fs::write(obj, b"sample")?;
    Ok(ToolOutput {
      code: Some(0),
      output: String::new(),
    })
  }
}

fn generator(
  storage: &TempDir,
  manager: Arc<MockToolchains>,
  config: GeneratorConfig,
) -> SampleGenerator<MockToolchains> {
  SampleGenerator::new(storage.path(), manager, config).unwrap()
}

fn versions(names: &[&str]) -> Vec<String> {
  names.iter().map(|v| v.to_string()).collect()
}

fn libs(names: &[&str]) -> Vec<String> {
  names.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn builds_then_reuses_the_cached_artifact() {
  let storage = TempDir::new().unwrap();
  let manager = Arc::new(MockToolchains::new(&["1.21.0"]));
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());

  let requested = versions(&["1.21.0"]);
  let included = libs(&["os", "net"]);

  let first = generator
    .generate(
      &requested,
      &included,
      Some(Arch::Amd64),
      Some(Os::Linux),
      GenerateOptions::default(),
    )
    .await
    .unwrap();

  assert_eq!(first.len(), 1);
  let artifact = match &first[0].outcome {
    BuildOutcome::Built { artifact } => artifact.clone(),
    other => panic!("expected Built, got {other:?}"),
  };
  assert!(artifact.exists());
  let expected = Fingerprint::compute("1.21.0", Os::Linux, &included);
  assert_eq!(artifact.file_name().unwrap(), expected.as_str());
  assert_eq!(manager.compiles(), 1);

  // Identical request: cache hit, no second compiler invocation.
  let second = generator
    .generate(
      &requested,
      &included,
      Some(Arch::Amd64),
      Some(Os::Linux),
      GenerateOptions::default(),
    )
    .await
    .unwrap();

  assert_eq!(
    second[0].outcome,
    BuildOutcome::CacheHit {
      artifact: artifact.clone()
    }
  );
  assert_eq!(manager.compiles(), 1);
}

#[tokio::test]
async fn force_rebuilds_despite_existing_artifact() {
  let storage = TempDir::new().unwrap();
  let manager = Arc::new(MockToolchains::new(&["1.21.0"]));
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());

  let requested = versions(&["1.21.0"]);
  let included = libs(&["os"]);

  generator
    .generate(
      &requested,
      &included,
      None,
      Some(Os::Linux),
      GenerateOptions::default(),
    )
    .await
    .unwrap();
  assert_eq!(manager.compiles(), 1);

  let results = generator
    .generate(
      &requested,
      &included,
      None,
      Some(Os::Linux),
      GenerateOptions {
        force: true,
        ..Default::default()
      },
    )
    .await
    .unwrap();

  assert!(matches!(results[0].outcome, BuildOutcome::Built { .. }));
  assert_eq!(manager.compiles(), 2);
}

#[tokio::test]
async fn uninstallable_version_yields_partial_batch() {
  let storage = TempDir::new().unwrap();
  let manager = Arc::new(MockToolchains::new(&["1.21.0"]));
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());

  let results = generator
    .generate(
      &versions(&["1.21.0", "9.9.9"]),
      &libs(&["os"]),
      None,
      Some(Os::Linux),
      GenerateOptions::default(),
    )
    .await
    .unwrap();

  assert_eq!(results.len(), 2);
  assert_eq!(results[0].version, "1.21.0");
  assert!(matches!(results[0].outcome, BuildOutcome::Built { .. }));
  assert_eq!(results[1].version, "9.9.9");
  assert_eq!(results[1].outcome, BuildOutcome::ToolchainUnavailable);
}

#[tokio::test]
async fn compile_failure_is_isolated_to_its_version() {
  let storage = TempDir::new().unwrap();
  let mut manager = MockToolchains::new(&["1.21.0", "1.22.0"]);
  manager.failing.insert("1.22.0".to_string());
  let manager = Arc::new(manager);
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());

  let results = generator
    .generate(
      &versions(&["1.21.0", "1.22.0"]),
      &libs(&["os"]),
      None,
      Some(Os::Linux),
      GenerateOptions::default(),
    )
    .await
    .unwrap();

  assert!(matches!(results[0].outcome, BuildOutcome::Built { .. }));
  assert!(matches!(
    &results[1].outcome,
    BuildOutcome::CompileFailed { detail } if detail.contains("syntax error")
  ));
}

#[tokio::test]
async fn too_many_output_paths_fails_before_any_side_effect() {
  let storage = TempDir::new().unwrap();
  let manager = Arc::new(MockToolchains::new(&["1.21.0"]));
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());

  let result = generator
    .generate(
      &versions(&["1.21.0"]),
      &libs(&["os"]),
      None,
      Some(Os::Linux),
      GenerateOptions {
        out_paths: vec![PathBuf::from("a"), PathBuf::from("b")],
        ..Default::default()
      },
    )
    .await;

  assert!(result.is_err());
  assert!(!storage.path().join("build/main.go").exists());
  assert_eq!(manager.compiles(), 0);
}

#[tokio::test]
async fn inaccessible_build_dir_propagates_before_dispatch() {
  let storage = TempDir::new().unwrap();
  let manager = Arc::new(MockToolchains::new(&["1.21.0"]));
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());

  // Occupy the build directory path with a plain file
  let blocked = storage.path().join("not-a-dir");
  std::fs::write(&blocked, b"").unwrap();

  let result = generator
    .generate(
      &versions(&["1.21.0"]),
      &libs(&["os"]),
      None,
      Some(Os::Linux),
      GenerateOptions {
        build_dir: Some(blocked),
        ..Default::default()
      },
    )
    .await;

  // Batch-level setup failure: error, not a per-version outcome
  assert!(matches!(result, Err(gostrap_lib::GenerateError::Io(_))));
  assert_eq!(manager.compiles(), 0);
}

#[tokio::test]
async fn output_overrides_pair_against_request_order() {
  let storage = TempDir::new().unwrap();
  let manager = Arc::new(MockToolchains::new(&["1.21.0", "1.22.0"]));
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());
  let override_path = storage.path().join("first-sample");

  let results = generator
    .generate(
      &versions(&["1.21.0", "1.22.0"]),
      &libs(&["os"]),
      None,
      Some(Os::Linux),
      GenerateOptions {
        out_paths: vec![override_path.clone()],
        ..Default::default()
      },
    )
    .await
    .unwrap();

  // The single override belongs to the first requested version; the second
  // version stays in the build directory.
  assert_eq!(
    results[0].outcome.artifact().unwrap(),
    override_path.as_path()
  );
  assert!(override_path.exists());
  let second = results[1].outcome.artifact().unwrap();
  assert_eq!(second.parent().unwrap(), storage.path().join("build"));
}

#[tokio::test]
async fn empty_library_list_uses_configured_defaults() {
  let storage = TempDir::new().unwrap();
  let manager = Arc::new(MockToolchains::new(&["1.21.0"]));
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());

  generator
    .generate(
      &versions(&["1.21.0"]),
      &[],
      None,
      Some(Os::Linux),
      GenerateOptions::default(),
    )
    .await
    .unwrap();

  let source = std::fs::read_to_string(storage.path().join("build/main.go")).unwrap();
  assert!(source.contains("import _ \"os\""));
  assert!(source.contains("import _ \"compress/bzip2\""));
  assert!(source.contains("import _ \"archive/zip\""));
  assert!(source.contains("import \"fmt\""));
}

#[tokio::test]
async fn results_come_back_in_request_order() {
  let storage = TempDir::new().unwrap();
  let mut manager = MockToolchains::new(&["1.20.0", "1.21.0", "1.22.0"]);
  manager.compile_delay = Some(Duration::from_millis(20));
  let manager = Arc::new(manager);
  let generator = generator(&storage, Arc::clone(&manager), GeneratorConfig::default());

  let requested = versions(&["1.22.0", "1.20.0", "1.21.0"]);
  let results = generator
    .generate(
      &requested,
      &libs(&["os"]),
      None,
      Some(Os::Linux),
      GenerateOptions::default(),
    )
    .await
    .unwrap();

  let reported: Vec<&str> = results.iter().map(|r| r.version.as_str()).collect();
  assert_eq!(reported, vec!["1.22.0", "1.20.0", "1.21.0"]);
}

#[tokio::test]
async fn slow_compile_hits_the_configured_deadline() {
  let storage = TempDir::new().unwrap();
  let mut manager = MockToolchains::new(&["1.21.0"]);
  manager.compile_delay = Some(Duration::from_secs(5));
  let manager = Arc::new(manager);
  let config = GeneratorConfig {
    build_timeout: Some(Duration::from_millis(50)),
    ..Default::default()
  };
  let generator = generator(&storage, Arc::clone(&manager), config);

  let results = generator
    .generate(
      &versions(&["1.21.0"]),
      &libs(&["os"]),
      None,
      Some(Os::Linux),
      GenerateOptions::default(),
    )
    .await
    .unwrap();

  assert!(matches!(
    &results[0].outcome,
    BuildOutcome::CompileFailed { detail } if detail.contains("timed out")
  ));
}
