use anyhow::{bail, Result};
use tracing::{debug, warn};

use super::helpers::{fetch_targets, load_context, resolve_resource_group};
use crate::cli::az::AzureCli;
use crate::cli::{tag_args, GlobalArgs, MergeArgs};
use crate::tags::{plan, TagChange, TagRules};

pub struct MergeOptions<'a> {
    pub group: &'a str,
    pub resource_type: Option<&'a str>,
    pub include_group: bool,
    pub dry_run: bool,
}

#[derive(Debug, Default)]
pub struct MergeSummary {
    pub scanned: usize,
    pub changes: Vec<TagChange>,
    pub updated: usize,
    /// (resource name, error) for each update that failed
    pub failed: Vec<(String, String)>,
}

pub fn execute_merge(args: MergeArgs, global: &GlobalArgs) -> Result<()> {
    let (config, cli) = load_context(global)?;
    let group = resolve_resource_group(args.resource_group, &config)?;
    let rules = config.tag_rules(&tag_args(&args.tags), &[]);

    if !rules.has_tags() {
        bail!("No tags to merge. Pass --tag KEY=VALUE or set [tags] / [[rules]] in .azadmin.toml");
    }

    let account = cli.account().show()?;

    eprintln!("==> Merging tags into resource group: {}", group);
    eprintln!("    Subscription: {} ({})", account.name, account.id);
    eprintln!("    Tags:         {}", rules.defaults);
    if !rules.rules.is_empty() {
        eprintln!("    Type rules:   {}", rules.rules.len());
    }
    if args.dry_run {
        eprintln!("    Mode:         dry run (no changes will be applied)");
    }
    eprintln!();

    let opts = MergeOptions {
        group: &group,
        resource_type: args.resource_type.as_deref(),
        include_group: args.include_group,
        dry_run: args.dry_run,
    };
    let summary = run_merge(&cli, &rules, &opts)?;

    eprintln!();
    eprintln!("Scanned:   {}", summary.scanned);
    eprintln!("Unchanged: {}", summary.scanned - summary.changes.len());
    if args.dry_run {
        eprintln!("Would update: {}", summary.changes.len());
        return Ok(());
    }
    eprintln!("Updated:   {}", summary.updated);

    if !summary.failed.is_empty() {
        eprintln!("Failed:    {}", summary.failed.len());
        for (name, err) in &summary.failed {
            eprintln!("  - {}: {}", name, err);
        }
        bail!(
            "{} of {} tag updates failed",
            summary.failed.len(),
            summary.changes.len()
        );
    }

    eprintln!("\n[ok] Tag merge complete");
    Ok(())
}

/// Plan and apply tag merges, one resource at a time in list order.
///
/// A failed update is recorded and the next resource is processed.
pub fn run_merge(cli: &AzureCli, rules: &TagRules, opts: &MergeOptions) -> Result<MergeSummary> {
    rules.validate()?;

    let targets = fetch_targets(cli, opts.group, opts.resource_type, opts.include_group)?;
    let mut changes = plan(targets.group.iter(), rules);
    changes.extend(plan(&targets.resources, rules));
    debug!(planned = changes.len(), "planned tag updates");

    let mut summary = MergeSummary {
        scanned: targets.resources.len() + usize::from(targets.group.is_some()),
        ..MergeSummary::default()
    };

    for change in &changes {
        eprintln!("  {} ({})", change.name, change.resource_type);
        for key in &change.diff.added {
            eprintln!("    + {}={}", key, change.merged.get(key).unwrap_or_default());
        }
        for c in &change.diff.changed {
            eprintln!("    ~ {}: {} -> {}", c.key, c.from, c.to);
        }

        if opts.dry_run {
            continue;
        }

        match cli.tag().merge(&change.id, &change.merged) {
            Ok(()) => {
                summary.updated += 1;
                eprintln!("    [ok] updated");
            }
            Err(e) => {
                warn!(resource = %change.id, error = %format!("{:#}", e), "tag update failed");
                eprintln!("    [failed] {:#}", e);
                summary.failed.push((change.name.clone(), format!("{:#}", e)));
            }
        }
    }

    summary.changes = changes;
    Ok(summary)
}
