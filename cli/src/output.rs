//! Renders results as text blocks, a JSON array, or a flat CSV table.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use bannergrab_common::banner::BannerResult;

pub const CSV_HEADER: [&str; 5] = ["host", "port", "protocol", "banner", "error"];
const BLOCK_SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl OutputFormat {
    /// Infers the format from the file extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let extension: String = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => anyhow::bail!(
                "cannot infer output format from '{}': use a .json or .csv extension",
                path.display()
            ),
        }
    }
}

pub fn write_file(path: &Path, format: OutputFormat, results: &[BannerResult]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    match format {
        OutputFormat::Json => write_json(&mut writer, results)?,
        OutputFormat::Csv => write_csv(&mut writer, results)?,
    }

    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))
}

pub fn write_json<W: Write>(mut writer: W, results: &[BannerResult]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, results).context("failed to encode JSON")?;
    writeln!(writer)?;
    Ok(())
}

pub fn write_csv<W: Write>(writer: W, results: &[BannerResult]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for result in results {
        csv_writer.write_record([
            result.host.as_str(),
            result.port.as_str(),
            result.protocol.as_str(),
            result.banner.as_str(),
            result.error_text(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// One block per result. `verbose` adds why reading stopped.
pub fn render_text(results: &[BannerResult], verbose: bool) -> String {
    let mut out = String::new();
    let separator: String = "-".repeat(BLOCK_SEPARATOR_WIDTH);

    for result in results {
        out.push_str(&format!(
            "Host: {}:{} | Protocol: {}\n",
            result.host, result.port, result.protocol
        ));
        match &result.error {
            Some(error) => out.push_str(&format!("  [ERROR] {error}\n")),
            None => out.push_str(&format!("  Banner:\n{}\n", result.banner)),
        }
        if verbose {
            if let Some(termination) = result.termination {
                out.push_str(&format!("  (stopped on {termination})\n"));
            }
        }
        out.push_str(&separator);
        out.push('\n');
    }
    out
}

/// Counts of each outcome kind in a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub banners: usize,
    pub silent: usize,
    pub errors: usize,
}

impl Summary {
    pub fn tally(results: &[BannerResult]) -> Self {
        results.iter().fold(Summary::default(), |mut acc, result| {
            if result.is_error() {
                acc.errors += 1;
            } else if result.is_silent() {
                acc.silent += 1;
            } else {
                acc.banners += 1;
            }
            acc
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
