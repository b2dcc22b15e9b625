//! Constants shared across the build core.

/// Name of the synthesized source file in the build directory.
pub const SOURCE_FILE_NAME: &str = "main.go";

/// The library providing the diagnostic print statements; always imported
/// functionally, never as a side-effect import.
pub const FMT_LIB: &str = "fmt";

/// Environment variables configuring the compiler invocation.
pub const ENV_GOROOT: &str = "GOROOT";
pub const ENV_GOARCH: &str = "GOARCH";
pub const ENV_GOOS: &str = "GOOS";

/// Libraries included when the caller requests none.
pub const DEFAULT_LIBS: [&str; 16] = [
  "os",
  "compress/bzip2",
  "compress/flate",
  "compress/gzip",
  "compress/lzw",
  "compress/zlib",
  "archive/tar",
  "archive/zip",
  "crypto",
  "io",
  "net",
  "path",
  "regexp",
  "strings",
  "syscall",
  "unicode",
];
