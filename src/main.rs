use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod check;
mod config;
mod extract;
mod report;
mod resolve;
mod runner;

use config::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs MUST go to stderr: stdout is the primary result stream, and a log
    // line there would corrupt piped output (e.g. `wp-config-checker | sh`).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = config::merge::load_config(&cli)?;
    config.validate()?;
    info!(
        "wp-config-checker starting: {} worker(s), {}s timeout",
        config.workers, config.connection_timeout_secs
    );

    let input = open_input(&config.input)?;
    let primary = open_output(&config.output)?;
    let diagnostic: Box<dyn Write + Send> = Box::new(io::stderr());

    let summary = runner::run_checks(&config, input, primary, diagnostic).await?;
    info!(
        "checked {} file(s): {} passed, {} failed",
        summary.checked, summary.passed, summary.failed
    );
    Ok(())
}

fn open_input(spec: &str) -> Result<Box<dyn BufRead + Send>> {
    if spec == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        let file = File::open(spec).with_context(|| format!("cannot open input list {spec}"))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

fn open_output(spec: &str) -> Result<Box<dyn Write + Send>> {
    if spec == "-" {
        Ok(Box::new(io::stdout()))
    } else {
        let file =
            File::create(spec).with_context(|| format!("cannot create output file {spec}"))?;
        Ok(Box::new(file))
    }
}
