//! benchcmp - benchmark result aggregator
//!
//! Reads per-subject load-test exports, resource-monitoring exports and
//! artifact sizes from a results directory, reduces each to summary
//! statistics and writes one comparison report.
//!
//! Exit codes:
//!   0 - Report written (missing or malformed inputs only leave fields null)
//!   1 - Runtime error (bad arguments, unreadable config, output not writable)

mod analysis;
mod cli;
mod config;
mod models;
mod report;

use analysis::Aggregator;
use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::{Config, CONFIG_FILE_NAME};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("benchcmp v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        error!("Analysis failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .benchcmp.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize subjects, file names and column names.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }
}

/// Build the comparison report and write it out.
fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);

    let subjects = config.effective_subjects();
    if subjects.len() != config.general.subjects.len() {
        warn!("Ignoring blank or duplicate subject names");
    }
    if subjects.is_empty() {
        anyhow::bail!("No subjects configured");
    }

    let results_dir = config.results_dir();
    if !results_dir.is_dir() {
        warn!(
            "Results directory {} does not exist; every field will be null",
            results_dir.display()
        );
    }

    if !args.quiet {
        println!(
            "🔬 Analyzing {} subject(s) in {}\n",
            subjects.len(),
            results_dir.display()
        );
    }

    let aggregator = Aggregator::new(&config);
    let comparison = aggregator.build_report(&subjects, |name, summary| {
        if summary.is_empty() {
            warn!("[{}] no inputs found", name);
        }
        if !args.quiet {
            println!("{}\n", report::subject_summary_text(name, summary));
        }
    });

    let content = match args.format {
        OutputFormat::Json => report::generate_json_report(&comparison)?,
        OutputFormat::Markdown => report::generate_markdown_report(&comparison),
    };

    let output_path = config.output_path(args.format);
    report::write_report(&content, &output_path)?;

    info!(
        "Wrote {} subject(s) to {}",
        comparison.len(),
        output_path.display()
    );
    if !args.quiet {
        println!("✅ Analysis complete! Report saved to: {}", output_path.display());
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
