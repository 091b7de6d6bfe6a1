//! Convert Go struct declarations to a C header or TypeScript interfaces.
//!
//! Usage:
//!   structconv [OPTIONS] c FILE.go ...
//!   structconv [OPTIONS] typescript [--namespace NS] FILE.go ...
//!
//! Output goes to stdout unless `--output DIR` is given, in which case it is
//! written to `DIR/<NAME>.<h|ts>` (NAME defaults to the first input's stem).
//! Warnings are logged to stderr; set `RUST_LOG` for more detail.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use structconv::{convert_files, Config, Target};

/// Generate C headers or TypeScript interfaces from Go structs
#[derive(Parser, Debug)]
#[command(name = "structconv", version)]
struct CommandLineInterface {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args, Debug)]
struct Settings {
    /// output directory (stdout if omitted); created if missing
    #[arg(long, short, global = true)]
    output: Option<PathBuf>,

    /// output file name without extension (defaults to the first input's stem)
    #[arg(long, short, global = true)]
    name: Option<String>,

    /// prepended to every record name
    #[arg(long, default_value = "", global = true)]
    prefix: String,

    /// appended to every record name
    #[arg(long, default_value = "", global = true)]
    suffix: String,

    /// extra C include line (repeatable)
    #[arg(long = "include", global = true)]
    includes: Vec<String>,

    /// extra TypeScript import line (repeatable)
    #[arg(long = "import", global = true)]
    imports: Vec<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit a C header with one typedef struct per record
    C(Inputs),
    /// emit TypeScript interface declarations
    Typescript {
        /// wrap interfaces in `namespace NS` and export it as default
        #[arg(long)]
        namespace: Option<String>,

        #[command(flatten)]
        inputs: Inputs,
    },
}

#[derive(Args, Debug)]
struct Inputs {
    /// Go source files
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = CommandLineInterface::parse();

    let (target, files, namespace) = match cli.cmd {
        Command::C(inputs) => (Target::C, inputs.files, None),
        Command::Typescript { namespace, inputs } => (Target::TypeScript, inputs.files, namespace),
    };
    let config = build_config(&cli.settings, namespace);

    let conversion = convert_files(&files, target, &config).context("conversion failed")?;
    if !conversion.warnings.is_empty() {
        tracing::info!(count = conversion.warnings.len(), "finished with warnings");
    }

    match &cli.settings.output {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(conversion.output.as_bytes()).context("write stdout")?;
            stdout.flush().context("flush stdout")?;
        }
        Some(dir) => {
            let path = output_path(dir, cli.settings.name.as_deref(), &files[0], target)?;
            std::fs::write(&path, &conversion.output)
                .with_context(|| format!("write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
    }

    Ok(())
}

fn build_config(settings: &Settings, namespace: Option<String>) -> Config {
    let mut config = Config::new()
        .with_prefix(settings.prefix.as_str())
        .with_suffix(settings.suffix.as_str());
    if let Some(ns) = namespace {
        config = config.with_namespace(ns);
    }
    for include in &settings.includes {
        config = config.with_include(include.as_str());
    }
    for import in &settings.imports {
        config = config.with_import(import.as_str());
    }
    config
}

/// Create `dir` if needed and return `dir/<name>.<ext>`.
fn output_path(dir: &Path, name: Option<&str>, first_input: &Path, target: Target) -> anyhow::Result<PathBuf> {
    if dir.exists() && !dir.is_dir() {
        bail!("output path {} exists and is not a directory", dir.display());
    }
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let stem = match name {
        Some(name) => name.to_string(),
        None => first_input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .with_context(|| format!("no file name in {}", first_input.display()))?,
    };
    Ok(dir.join(format!("{}.{}", stem, target.file_extension())))
}
