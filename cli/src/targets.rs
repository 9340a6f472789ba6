use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use bannergrab_common::network::target::Target;

/// Reads one raw target per line, skipping blank lines and `#` comments.
pub fn read_target_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content: String = std::fs::read_to_string(path)
        .with_context(|| format!("failed to open targets file {}", path.display()))?;
    Ok(parse_target_lines(&content))
}

pub fn parse_target_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Parses every raw target, failing on the first that names no host.
pub fn parse_targets(raw: &[String]) -> anyhow::Result<Vec<Target>> {
    raw.iter()
        .map(|s| Target::from_str(s).with_context(|| format!("invalid target '{s}'")))
        .collect()
}
