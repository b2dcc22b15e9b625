use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use console::{Term, style};
use gostrap_lib::{BuildOutcome, GenerateOptions, GeneratorConfig, SampleGenerator};
use gostrap_platform::{Arch, Os};
use gostrap_toolchain::{GoToolchains, Toolchains};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

/// gostrap - build clean GO sample binaries across toolchain versions
#[derive(Parser)]
#[command(name = "gostrap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GO libs to include in the generated samples
    #[arg(short, long, value_name = "LIBS", num_args = 0.., value_delimiter = ',')]
    libs: Vec<String>,

    /// GO versions to build the samples with
    #[arg(short, long = "go", value_name = "VERSIONS", num_args = 0.., value_delimiter = ',')]
    go: Vec<String>,

    /// Target CPU architecture (host architecture if unset)
    #[arg(short, long, value_name = "ARCH")]
    arch: Option<Arch>,

    /// Target operating system (host OS if unset)
    #[arg(short, long, value_name = "PLATFORM")]
    platform: Option<Os>,

    /// Paths where to save the generated samples
    #[arg(short, long, value_name = "PATHS", num_args = 0.., value_delimiter = ',')]
    output: Vec<PathBuf>,

    /// Force rebuild of existing samples
    #[arg(short, long)]
    force: bool,

    /// Show available GO versions
    #[arg(short, long)]
    show: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .init();

    if std::env::args().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(());
    }

    let cli = Cli::parse();
    let term = Term::stderr();

    if cli.show {
        let manager = GoToolchains::new(&PathBuf::from("./storage"))?;
        let available = manager.list_available()?;
        if available.is_empty() {
            println!("no available GO versions");
        } else {
            let (_, width) = Term::stdout().size();
            print!("{}", output::columnize(&available, width as usize));
        }
        return Ok(());
    }

    // Validate before anything touches the disk.
    if cli.output.len() > cli.go.len() {
        term.write_line(&format!(
            "{} the number of output paths cannot exceed the number of samples",
            style("error:").red().bold()
        ))?;
        std::process::exit(1);
    }

    let storage = PathBuf::from("./storage");
    let manager = Arc::new(GoToolchains::new(&storage)?);
    let generator = SampleGenerator::new(&storage, manager, GeneratorConfig::default())?;

    let results = generator
        .generate(
            &cli.go,
            &cli.libs,
            cli.arch,
            cli.platform,
            GenerateOptions {
                out_paths: cli.output,
                build_dir: None,
                force: cli.force,
            },
        )
        .await?;

    for result in &results {
        match &result.outcome {
            BuildOutcome::Built { artifact } | BuildOutcome::CacheHit { artifact } => {
                info!(
                    version = %result.version,
                    path = %artifact.display(),
                    "sample built"
                );
            }
            BuildOutcome::ToolchainUnavailable => {
                term.write_line(&format!(
                    "{} no usable toolchain for GO version \"{}\"",
                    style("warning:").yellow().bold(),
                    result.version
                ))?;
            }
            BuildOutcome::CompileFailed { detail } => {
                term.write_line(&format!(
                    "{} build failed for GO version \"{}\": {}",
                    style("error:").red().bold(),
                    result.version,
                    detail.trim()
                ))?;
            }
        }
    }

    Ok(())
}
