//! worldarea: command-line runner for worldarea-core
//!
//! Runs the whole country-area analysis once:
//!
//! - loads the bundled Natural Earth world sample (or `--input`),
//! - drops Antarctica (or `--exclude <name>`),
//! - computes areas in EPSG:6933,
//! - writes `outputs/world_area_top20.csv`, `outputs/figures/world_area.png`
//!   and `outputs/maps/world_map.html`.
//!
//! Usage examples
//! --------------
//!
//!   $ worldarea
//!   $ worldarea --out-dir /tmp/run --top 10
//!   $ RUST_LOG=worldarea_core=debug worldarea
//!
//! Logs go to stderr; stdout only carries the completion line.
mod args;

use crate::args::CliArgs;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = args.into_config();
    tracing::debug!("Config: {config:?}");

    let report = worldarea_core::run(&config)?;
    tracing::info!(
        "{} of {} features retained, largest: {}",
        report.retained,
        report.loaded,
        report.largest.as_ref().map_or("-", |r| r.name.as_str())
    );

    println!("{}", worldarea_core::COMPLETION_MESSAGE);
    Ok(())
}
