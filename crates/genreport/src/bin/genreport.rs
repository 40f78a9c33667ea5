use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use genreport::render::{OutputFormat, render};
use genreport::{
    ConnectivityPolicy, GedDocument, NumberingConfig, NumberingEngine, NumberingError,
    RootSelector,
};
use tracing_subscriber::EnvFilter;

/// Exit status for a connectivity failure, distinct from other errors.
const EXIT_ISLANDS: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "genreport",
    version,
    about = "Assign deterministic report identifiers to every person in a GEDCOM file"
)]
struct Cli {
    /// GEDCOM file to read.
    #[arg(long, short)]
    input: PathBuf,

    /// Root individual (@I123@ or 123). Defaults to the first individual in the file.
    #[arg(long)]
    root: Option<String>,

    /// Number the connected part and list disconnected individuals instead of failing.
    #[arg(long)]
    allow_islands: bool,

    /// YAML configuration (connectivity policy, special-case identifiers).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listing format: `text` or `json`.
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Write the listing here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => return fail(&err),
    };
    let preview_limit = config.island_preview_limit;

    match run(&cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let report = err
                .downcast_ref::<NumberingError>()
                .and_then(NumberingError::connectivity_report);
            match report {
                Some(report) => {
                    eprintln!("error: {report}.");
                    eprint!("{}", report.preview(preview_limit));
                    eprintln!(
                        "\nTip: verify --root, fix family links, \
                         or re-run with --allow-islands to proceed anyway."
                    );
                    ExitCode::from(EXIT_ISLANDS)
                }
                None => fail(&err),
            }
        }
    }
}

fn fail(err: &anyhow::Error) -> ExitCode {
    eprintln!("error: {err:#}");
    ExitCode::FAILURE
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<NumberingConfig> {
    let mut config = match &cli.config {
        Some(path) => NumberingConfig::from_path(path)?,
        None => NumberingConfig::default(),
    };
    if cli.allow_islands {
        config.connectivity = ConnectivityPolicy::Permissive;
    }
    Ok(config)
}

fn run(cli: &Cli, config: NumberingConfig) -> Result<()> {
    let doc = GedDocument::from_path(&cli.input)?;
    let graph = doc.graph();
    tracing::info!(
        individuals = graph.len(),
        families = graph.families().len(),
        placeholders = doc.placeholders().len(),
        "loaded {}",
        cli.input.display()
    );

    let selector = RootSelector::parse(cli.root.as_deref());
    let engine = NumberingEngine::from_config(config)?;
    let table = engine.run_selector(graph, &selector)?;

    let listing = render(graph, &table, cli.format).context("failed to render listing")?;
    match &cli.output {
        Some(path) => std::fs::write(path, listing)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{listing}"),
    }
    Ok(())
}
