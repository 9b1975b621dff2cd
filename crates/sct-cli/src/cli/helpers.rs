use anyhow::{Context, Result};
use sct_core::{ArchiveLimits, ArchiveLimitsOverrides};
use std::fs;

/// Resolve `--limits` on top of the defaults. Accepts inline JSON or `@path`.
pub fn parse_limits(arg: Option<&str>) -> Result<ArchiveLimits> {
    let defaults = ArchiveLimits::default();
    let Some(s) = arg else {
        return Ok(defaults);
    };
    let overrides = if let Some(path) = s.strip_prefix('@') {
        let path = path.trim();
        if path.is_empty() {
            anyhow::bail!("--limits @path: path cannot be empty");
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("limits file not found: {}", path))?;
        serde_json::from_str::<ArchiveLimitsOverrides>(&content)
            .with_context(|| format!("invalid limits JSON in {}", path))?
    } else {
        serde_json::from_str::<ArchiveLimitsOverrides>(s)
            .context("invalid --limits JSON (use --limits @path for a file)")?
    };
    Ok(defaults.apply(overrides))
}
