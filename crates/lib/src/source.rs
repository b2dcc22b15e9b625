//! Synthesis of the minimal Go program to compile.

use std::fmt::Write as _;
use std::path::Path;

use crate::consts::FMT_LIB;

/// Write the sample source file to `path`, overwriting any previous content.
///
/// Each requested library is imported for side effect only (`import _`), so
/// the produced binary statically links it. `fmt` is always imported last as
/// a functional import for the diagnostic prints, and is dropped from the
/// requested list if the caller named it, avoiding a duplicate declaration.
pub fn synthesize(path: &Path, libs: &[String]) -> std::io::Result<()> {
  let libs: Vec<&str> = libs
    .iter()
    .map(String::as_str)
    .filter(|lib| *lib != FMT_LIB)
    .collect();

  let mut source = String::from("package main\n");
  for lib in &libs {
    let _ = writeln!(source, "import _ \"{lib}\"");
  }
  source.push_str("import \"fmt\"\n");
  source.push_str("func main() {\n");
  source.push_str("fmt.Println(\"Built using the following libs :\")\n");
  for lib in libs.iter().chain(&[FMT_LIB]) {
    let _ = writeln!(source, "fmt.Println(\" - {lib}\")");
  }
  source.push_str("}\n");

  std::fs::write(path, source)
}
