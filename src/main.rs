use abp_cleaner::{Config, InputSource, Pipeline, OUTPUT_FILE_NAME, resolve_input};
use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "abp-cleaner",
    version,
    about = "Normalize and deduplicate a domain list into a grouped Adblock Plus rule file",
    long_about = "Normalize and deduplicate a domain list into a grouped \
    Adblock Plus rule file.\n\n\
    Without arguments the first .txt file in the working directory is cleaned \
    (ABPcleanedList.txt itself is skipped). If none is found you are asked for a path. \
    The result is written to ABPcleanedList.txt in the working directory.\n\n\
    USAGE EXAMPLES:\n  \
      # Clean the first .txt list in the current directory\n  \
      abp-cleaner\n\n  \
      # Clean a specific list\n  \
      abp-cleaner ./blocklist.txt\n\n  \
      # Preview statistics without writing\n  \
      abp-cleaner --dry-run --json"
)]
struct Cli {
    /// Domain list to clean (skips discovery)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Working directory searched for lists and receiving the output
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    dir: PathBuf,

    /// Dry run (don't write the output file)
    #[arg(long)]
    dry_run: bool,

    /// Keep a timestamped copy of an existing output file
    #[arg(long)]
    backup: bool,

    /// Print run statistics as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let mut builder = Config::builder()
        .work_dir(cli.dir)
        .dry_run(cli.dry_run)
        .backup_existing(cli.backup);

    if let Some(input) = cli.input {
        builder = builder.input(input);
    }

    let config = builder.build()
        .context("Failed to build configuration")?;

    let resolved = match resolve_input(&config, prompt_for_path) {
        Ok(resolved) => resolved,
        Err(e) if e.is_not_found() => {
            tracing::debug!("{}", e);
            eprintln!("Error: File not found.");
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            return Err(anyhow::Error::new(e).context("Failed to locate an input list"));
        }
    };

    if resolved.source == InputSource::Discovered {
        let name = resolved.path.file_name().map_or_else(
            || resolved.path.display().to_string(),
            |n| n.to_string_lossy().to_string(),
        );
        println!("Found file: {}. Processing...", name);
    }

    let stats = Pipeline::new(config)
        .context("Failed to create pipeline")?
        .run(&resolved.path)
        .context("Pipeline execution failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else if stats.dry_run {
        println!(
            "Dry run: {} unique entries would be written to '{}'.",
            stats.unique_entries, OUTPUT_FILE_NAME
        );
    } else {
        println!(
            "Success! Processed {} unique entries into '{}'.",
            stats.unique_entries, OUTPUT_FILE_NAME
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn prompt_for_path() -> io::Result<String> {
    print!("No .txt files found. Please enter the full path to your file: ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer)
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("abp_cleaner=warn"),
        1 => EnvFilter::new("abp_cleaner=info"),
        2 => EnvFilter::new("abp_cleaner=debug"),
        _ => EnvFilter::new("abp_cleaner=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}
