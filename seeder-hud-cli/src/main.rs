//! Seeder HUD CLI Application
//!
//! Command-line front end for the seeder-hud library. It replays a seeding
//! scenario against a simulated implement and reports:
//! - Which display elements the HUD would redraw on every tick
//! - How each button press was dispatched (forwarded / ignored)
//! - A summary of redraw activity and the final implement state

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

mod config;
mod replay;
mod report;
mod vehicle;

use config::OutputFormat;

/// Seeder HUD - Replay seeding scenarios through the HUD state tracker
#[derive(Parser, Debug)]
#[command(name = "seeder-hud-cli")]
#[command(about = "Replay seeding scenarios through the seeder HUD tracker", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the scenario file (TOML)
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Report format (overrides [output] format)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file for the report (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Seeder HUD CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using seeder-hud library v{}", seeder_hud::VERSION);

    let Some(scenario_path) = &args.scenario else {
        // No arguments - show help
        println!("Seeder HUD - No scenario specified");
        println!("\nQuick Start:");
        println!("  seeder-hud-cli --scenario field.toml");
        println!("  seeder-hud-cli --scenario field.toml --format json --output report.json");
        println!("\nUse --help for more options");
        return Ok(());
    };

    log::info!("Loading scenario from: {:?}", scenario_path);
    let config = config::load_config(scenario_path)?;
    log::debug!(
        "Scenario loaded: {} tick entries, {} segments",
        config.ticks.len(),
        config.tracker.segment_count
    );

    let report = replay::run(&config)?;

    let format = args.format.unwrap_or(config.output.format);
    let name = scenario_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("scenario");
    let rendered = report::render(&report, name, format)?;

    match args.output.as_ref().or(config.output.output_file.as_ref()) {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {:?}", path))?;
            log::info!("Report written to {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
