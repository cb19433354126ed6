//! Blinc Sortable replay tool
//!
//! Runs a drag scenario (lists plus a pointer script, see [`scenario`])
//! headlessly against a Taffy-laid-out document and prints the emitted
//! notifications and the final item order of every list. Handy for checking
//! how the insertion heuristics behave on a given layout.

mod replay;
mod scenario;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::scenario::Scenario;

/// Replay sortable drag scenarios
#[derive(Parser, Debug)]
#[command(name = "blinc-sortable")]
#[command(about = "Replay sortable list drag scenarios headlessly")]
#[command(version)]
struct Args {
    /// Scenario file (TOML)
    scenario: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging (RUST_LOG directives still apply)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let scenario = Scenario::load(&args.scenario)?;
    tracing::info!(
        lists = scenario.lists.len(),
        steps = scenario.steps.len(),
        "loaded {}",
        args.scenario.display()
    );

    let report = replay::run(&scenario)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for event in &report.events {
        println!(
            "step {:>3}  {:<8} {:<12} {}",
            event.step, event.kind, event.list, event.item
        );
    }
    println!();
    for (list, items) in &report.lists {
        println!("{list}: {}", items.join(", "));
    }
    for (list, offset) in &report.scroll {
        println!("{list} scrolled to {offset:.1}");
    }
    Ok(())
}
