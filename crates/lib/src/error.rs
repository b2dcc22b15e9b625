/// Batch-level errors from `SampleGenerator::generate`.
///
/// Per-version failures never surface here; they are reported as
/// `BuildOutcome` variants in the result list.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
  #[error("{out_paths} output paths given for {versions} versions; the number of output paths cannot exceed the number of samples")]
  TooManyOutputPaths { out_paths: usize, versions: usize },

  #[error("i/o error: {0}")]
  Io(#[from] std::io::Error),
}
