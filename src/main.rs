//! godown: generate Go source files from structured Markdown.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use godown::driver::SignatureReport;
use godown::{config, generate, input};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "godown")]
#[command(about = "Generate Go source files from structured Markdown", long_about = None)]
struct Args {
    /// Markdown files or directories to convert
    #[arg(value_name = "PATH", default_value = ".")]
    paths: Vec<PathBuf>,

    /// File suffixes to match when scanning directories
    #[arg(long, short = 'e', value_name = "EXT")]
    ext: Vec<String>,

    /// Directory to write generated files to
    #[arg(long, short = 'o', value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Print generated source instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Print recognised function signatures as JSON
    #[arg(long)]
    signatures: bool,

    /// Log progress and recognition decisions
    #[arg(long, short = 'v', conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(long, short = 'q')]
    quiet: bool,
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("GODOWN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("failed to initialise logging: {error}");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.quiet, args.verbose);

    let mut cfg = config::Config::load();

    // Override config with command line args
    if !args.ext.is_empty() {
        cfg.file_extensions = args.ext;
    }
    if let Some(dir) = args.output_dir {
        cfg.output_dir = dir.to_string_lossy().into_owned();
    }
    if args.signatures {
        cfg.emit_signatures = true;
    }

    let documents = match input::find_documents(args.paths, &cfg.file_extensions) {
        Ok(documents) => documents,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::FAILURE;
        }
    };

    if documents.is_empty() {
        eprintln!("No matching files found");
        return ExitCode::SUCCESS;
    }

    let mut reports = Vec::new();
    let mut failed = false;

    for doc in &documents {
        match convert(doc, &cfg, args.stdout) {
            Ok(report) => reports.push(report),
            Err(error) => {
                tracing::error!(document = %doc.display(), %error, "generation failed");
                eprintln!("Error: {error}");
                failed = true;
            }
        }
    }

    if cfg.emit_signatures {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("Error: {error}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn convert(
    doc: &std::path::Path,
    cfg: &config::Config,
    to_stdout: bool,
) -> godown::Result<SignatureReport> {
    let name = doc
        .file_name()
        .map_or_else(|| doc.display().to_string(), |name| name.to_string_lossy().into_owned());
    let markdown = input::read_document(doc)?;
    let generated = generate(&name, &markdown)?;

    let output = if to_stdout {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(generated.as_bytes())
            .map_err(|source| godown::Error::Io {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
        None
    } else {
        let path = input::output_path(doc, cfg.output_dir());
        input::write_output(&path, generated.as_bytes())?;
        tracing::info!(input = %doc.display(), output = %path.display(), "generated");
        Some(path.display().to_string())
    };

    Ok(SignatureReport {
        input: doc.display().to_string(),
        output,
        signatures: generated.signatures,
    })
}
