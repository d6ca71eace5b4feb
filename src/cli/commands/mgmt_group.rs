use anyhow::{bail, Context, Result};
use tracing::warn;

use super::helpers::load_context;
use crate::cli::az::AzureCli;
use crate::cli::{GlobalArgs, MgmtGroupCreateArgs};

/// One management group to create: `name` or `name,Display Name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MgmtGroupEntry {
    pub name: String,
    pub display_name: Option<String>,
}

impl MgmtGroupEntry {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (name, display) = match line.split_once(',') {
            Some((name, display)) => (name.trim(), Some(display.trim())),
            None => (line, None),
        };
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            display_name: display.filter(|d| !d.is_empty()).map(str::to_string),
        })
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<(String, String)>,
}

/// Parse batch input, skipping blank lines and `#` comments
pub fn parse_batch(text: &str) -> Vec<MgmtGroupEntry> {
    text.lines().filter_map(MgmtGroupEntry::parse).collect()
}

pub fn execute_mgmt_group_create(args: MgmtGroupCreateArgs, global: &GlobalArgs) -> Result<()> {
    let mut entries: Vec<MgmtGroupEntry> = args
        .names
        .iter()
        .filter_map(|n| MgmtGroupEntry::parse(n))
        .collect();
    if let Some(ref path) = args.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        entries.extend(parse_batch(&text));
    }
    if entries.is_empty() {
        bail!("No management groups given. Pass names or --file <path>");
    }

    let (_config, cli) = load_context(global)?;

    eprintln!("==> Creating {} management group(s)", entries.len());
    if let Some(ref parent) = args.parent {
        eprintln!("    Parent: {}", parent);
    }
    eprintln!();

    let summary = create_batch(&cli, &entries, args.parent.as_deref());

    eprintln!();
    eprintln!("Created: {}", summary.created.len());
    eprintln!("Skipped: {} (already exist)", summary.skipped.len());
    if !summary.failed.is_empty() {
        eprintln!("Failed:  {}", summary.failed.len());
        for (name, err) in &summary.failed {
            eprintln!("  - {}: {}", name, err);
        }
        bail!(
            "{} of {} management groups failed",
            summary.failed.len(),
            entries.len()
        );
    }

    eprintln!("\n[ok] Management groups ready");
    Ok(())
}

/// Create each group in order, continuing past failures
pub fn create_batch(
    cli: &AzureCli,
    entries: &[MgmtGroupEntry],
    parent: Option<&str>,
) -> BatchSummary {
    let mut summary = BatchSummary::default();

    for entry in entries {
        let result = cli.management_group().exists(&entry.name).and_then(|exists| {
            if exists {
                return Ok(false);
            }
            cli.management_group()
                .create(&entry.name, entry.display_name.as_deref(), parent)
                .map(|()| true)
        });

        match result {
            Ok(true) => {
                eprintln!("  [ok] {}", entry.name);
                summary.created.push(entry.name.clone());
            }
            Ok(false) => {
                eprintln!("  [skip] {} (already exists)", entry.name);
                summary.skipped.push(entry.name.clone());
            }
            Err(e) => {
                warn!(
                    group = %entry.name,
                    error = %format!("{:#}", e),
                    "management group creation failed"
                );
                eprintln!("  [failed] {}: {:#}", entry.name, e);
                summary.failed.push((entry.name.clone(), format!("{:#}", e)));
            }
        }
    }

    summary
}
