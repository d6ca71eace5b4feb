use anyhow::{bail, Context, Result};

use super::helpers::{fetch_targets, load_context, resolve_resource_group};
use crate::cli::az::AzureCli;
use crate::cli::{tag_args, AuditArgs, GlobalArgs, OutputFormat};
use crate::tags::{audit, AuditReport, TagRules};

pub fn execute_audit(args: AuditArgs, global: &GlobalArgs) -> Result<()> {
    let (config, cli) = load_context(global)?;
    let group = resolve_resource_group(args.resource_group, &config)?;
    let rules = config.tag_rules(&tag_args(&args.tags), &args.required);

    if rules.is_empty() {
        bail!("Nothing to audit. Pass --tag/--require or configure tags in .azadmin.toml");
    }

    if args.format == OutputFormat::Text {
        eprintln!("==> Auditing tags in resource group: {}", group);
        if let Some(sub) = cli.subscription() {
            eprintln!("    Subscription: {}", sub);
        }
        eprintln!();
    }

    let report = run_audit(
        &cli,
        &rules,
        &group,
        args.resource_type.as_deref(),
        args.include_group,
    )?;

    match args.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize audit report")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_report(&report),
    }

    if args.strict && !report.is_clean() {
        bail!(
            "{} of {} resources are not compliant",
            report.findings.len(),
            report.scanned
        );
    }

    Ok(())
}

pub fn run_audit(
    cli: &AzureCli,
    rules: &TagRules,
    group: &str,
    resource_type: Option<&str>,
    include_group: bool,
) -> Result<AuditReport> {
    let targets = fetch_targets(cli, group, resource_type, include_group)?;

    let group_report = audit(targets.group.iter(), rules);
    let mut report = audit(&targets.resources, rules);
    report.scanned += group_report.scanned;
    report.compliant += group_report.compliant;
    let mut findings = group_report.findings;
    findings.append(&mut report.findings);
    report.findings = findings;

    Ok(report)
}

fn print_report(report: &AuditReport) {
    for finding in &report.findings {
        eprintln!("  [drift] {} ({})", finding.name, finding.resource_type);
        if !finding.missing.is_empty() {
            eprintln!("    missing: {}", finding.missing.join(", "));
        }
        for m in &finding.mismatched {
            eprintln!("    {}: '{}' (want '{}')", m.key, m.from, m.to);
        }
    }

    eprintln!();
    eprintln!("Scanned:       {}", report.scanned);
    eprintln!("Compliant:     {}", report.compliant);
    eprintln!("Non-compliant: {}", report.findings.len());

    if report.is_clean() {
        eprintln!("\n[ok] All resources compliant");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::az::testing::ScriptedRunner;
    use crate::tags::TagSet;

    const GROUP_JSON: &str = r#"{
        "id": "/subscriptions/sub/resourceGroups/rg",
        "location": "westeurope",
        "name": "rg",
        "tags": null
    }"#;

    const LIST_JSON: &str = r#"[
        {"id": "/r/st1", "name": "st1", "type": "Microsoft.Storage/storageAccounts", "tags": {"env": "dev"}},
        {"id": "/r/app1", "name": "app1", "type": "Microsoft.Web/sites", "tags": {"env": "prod", "owner": "ops"}}
    ]"#;

    fn rules() -> TagRules {
        TagRules::new(TagSet::from_pairs(["env=prod"]).unwrap())
            .with_required(["owner".to_string()])
    }

    #[test]
    fn test_audit_resources() {
        let runner = ScriptedRunner::default()
            .ok(&["group", "show"], GROUP_JSON)
            .ok(&["resource", "list"], LIST_JSON);

        let report = run_audit(&runner.cli(), &rules(), "rg", None, false).unwrap();
        assert_eq!(report.scanned, 2);
        assert_eq!(report.compliant, 1);
        assert_eq!(report.findings.len(), 1);
        let finding = &report.findings[0];
        assert_eq!(finding.name, "st1");
        assert_eq!(finding.missing, vec!["owner".to_string()]);
        assert_eq!(finding.mismatched[0].to, "prod");
    }

    #[test]
    fn test_audit_include_group_lists_group_first() {
        let runner = ScriptedRunner::default()
            .ok(&["group", "show"], GROUP_JSON)
            .ok(&["resource", "list"], LIST_JSON);

        let report = run_audit(&runner.cli(), &rules(), "rg", None, true).unwrap();
        assert_eq!(report.scanned, 3);
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.findings[0].name, "rg");
        assert_eq!(
            report.findings[0].missing,
            vec!["env".to_string(), "owner".to_string()]
        );
    }

    #[test]
    fn test_audit_makes_no_updates() {
        let runner = ScriptedRunner::default()
            .ok(&["group", "show"], GROUP_JSON)
            .ok(&["resource", "list"], LIST_JSON);
        run_audit(&runner.cli(), &rules(), "rg", None, true).unwrap();
        assert!(runner.calls_starting_with(&["tag"]).is_empty());
    }
}
