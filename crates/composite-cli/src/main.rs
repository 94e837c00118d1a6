//! Composite field command-line tool.
//!
//! Resolves composite form fields from flat JSON form data or stored values
//! and prints the structured result as JSON.

mod cli;

use clap::Parser;
use cli::{Cli, run};
use tracing::info;

/// Initializes logging to stderr so stdout carries only JSON.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("composite_fields={},composite={}", level, level))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(error) = cli.config.clone().validated() {
        eprintln!("Configuration error: {}", error);
        std::process::exit(1);
    }

    info!(separator = %cli.config.separator, "Running composite command");

    let output = run(&cli, std::io::stdin().lock())?;
    println!("{}", output);

    Ok(())
}
