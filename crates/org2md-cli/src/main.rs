//! org2md: CLI tool to convert Org outline markup to Markdown

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use config::Config;
use org2md_core::{Stage, convert_file, resolve_source};

#[derive(Parser, Debug)]
#[command(name = "org2md")]
#[command(about = "Convert Org outline markup to Markdown")]
#[command(version)]
#[command(after_help = "Examples:
  org2md notes.org                  # Print Markdown to stdout
  org2md notes.org notes.md         # Write Markdown to notes.md
  org2md -q notes.org notes.md      # Write without progress notices")]
struct Cli {
    /// Input Org file
    input: PathBuf,

    /// Output file (prints to stdout when omitted)
    output: Option<PathBuf>,

    /// Path to a configuration file (defaults to looking up _org2md.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - suppress progress notices
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let options = config.to_options();

    let source = resolve_source(&cli.input)?;

    if cli.verbose {
        eprintln!("Resolved input: {}", source.display());
        eprintln!("Applying {} rewrite stages per line", Stage::PIPELINE.len());
    }

    // Stdout doubles as the destination when no output path is given, so
    // progress notices are suppressed to keep piped output clean.
    let quiet = cli.quiet || cli.output.is_none();

    if !quiet {
        eprintln!(
            "Transforming Org from '{}' to Markdown syntax...",
            source.display()
        );
    }

    let converted = convert_file(&source, &options)
        .with_context(|| format!("Failed to convert: {}", source.display()))?;

    match &cli.output {
        Some(dest) => {
            if !quiet {
                eprintln!("Writing output to {}", dest.display());
            }
            fs::write(dest, &converted)
                .with_context(|| format!("Failed to write: {}", dest.display()))?;
        }
        None => {
            print!("{converted}");
            if !converted.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}

/// Locate the configuration: an explicit --config path wins, then an
/// `_org2md.toml` next to the input file, then one in the working directory.
fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(path) = &cli.config {
        return Config::load(path);
    }
    if let Some(dir) = cli.input.parent() {
        if let Some(config) = Config::load_from_dir(dir)? {
            return Ok(config);
        }
    }
    if let Some(config) = Config::load_from_dir(Path::new("."))? {
        return Ok(config);
    }
    Ok(Config::default())
}
