mod cli;
mod error;
mod output;

use std::process::ExitCode;

use clap::Parser;
use topline_core::{NewsLookup, NewsLookupBuilder, SourceId};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let lookup = build_lookup(&cli)?;
    debug!(?lookup, topic = %cli.topic, "lookup configured");

    let report = lookup.lookup(&cli.topic).await?;
    output::render(&cli.topic, &report, cli.format, cli.pretty)?;

    Ok(ExitCode::SUCCESS)
}

fn build_lookup(cli: &Cli) -> Result<NewsLookup, CliError> {
    Ok(lookup_builder(cli)?.build()?)
}

/// `--api-key` wins over the environment; `--source` replaces the defaults.
fn lookup_builder(cli: &Cli) -> Result<NewsLookupBuilder, CliError> {
    let mut builder = NewsLookup::builder()
        .with_env_credentials()
        .with_timeout_ms(cli.timeout_ms);

    if let Some(api_key) = &cli.api_key {
        builder = builder.with_api_key(api_key);
    }
    if !cli.sources.is_empty() {
        let sources = cli
            .sources
            .iter()
            .map(|raw| SourceId::parse(raw))
            .collect::<Result<Vec<_>, _>>()?;
        builder = builder.with_sources(sources);
    }
    if let Some(base_url) = &cli.base_url {
        builder = builder.with_base_url(base_url);
    }

    Ok(builder)
}
