use std::io::{self, Write};

use serde::Serialize;
use topline_core::{LookupReport, NewsItem, SourceId};

use crate::cli::OutputFormat;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    topic: &'a str,
    item: Option<&'a NewsItem>,
    source_chain: &'a [SourceId],
    selected_source: Option<&'a SourceId>,
    latency_ms: u64,
}

pub fn render(
    topic: &str,
    report: &LookupReport,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, topic, report, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    topic: &str,
    report: &LookupReport,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => write_text(out, topic, report.item.as_ref())?,
        OutputFormat::Json => {
            let payload = JsonOutput {
                topic,
                item: report.item.as_ref(),
                source_chain: &report.source_chain,
                selected_source: report.selected_source.as_ref(),
                latency_ms: report.latency_ms,
            };
            let rendered = if pretty {
                serde_json::to_string_pretty(&payload)?
            } else {
                serde_json::to_string(&payload)?
            };
            writeln!(out, "{rendered}")?;
        }
    }

    Ok(())
}

fn write_text<W: Write>(out: &mut W, topic: &str, item: Option<&NewsItem>) -> io::Result<()> {
    writeln!(out, "Latest news on {topic}")?;
    match item {
        Some(item) => {
            writeln!(out, "Title: {}", item.title)?;
            writeln!(out, "Date: {}", item.date)?;
            writeln!(out, "Text")?;
            writeln!(out, "{}", item.text)
        }
        None => writeln!(out, "No news found for '{topic}'"),
    }
}
