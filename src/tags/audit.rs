// src/tags/audit.rs
use serde::Serialize;

use super::{TagRules, TagValueChange, Tagged};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFinding {
    pub id: String,
    pub name: String,
    pub resource_type: String,
    pub missing: Vec<String>,
    pub mismatched: Vec<TagValueChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub scanned: usize,
    pub compliant: usize,
    pub findings: Vec<AuditFinding>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Check each item for missing required keys and values that differ from
/// the desired tags.
pub fn audit<'a, T, I>(items: I, rules: &TagRules) -> AuditReport
where
    T: Tagged + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut report = AuditReport::default();

    for item in items {
        report.scanned += 1;
        let tags = item.tags();

        let missing: Vec<String> = rules
            .required_for(item.resource_type())
            .into_iter()
            .filter(|k| !tags.contains_key(k))
            .collect();

        // Absent keys are already reported as missing
        let mismatched = tags
            .diff(&rules.desired_for(item.resource_type()))
            .changed;

        if missing.is_empty() && mismatched.is_empty() {
            report.compliant += 1;
            continue;
        }

        report.findings.push(AuditFinding {
            id: item.id().to_string(),
            name: item.name().to_string(),
            resource_type: item.resource_type().to_string(),
            missing,
            mismatched,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::reconcile::tests::item;

    #[test]
    fn test_audit_counts() {
        let rules = TagRules::new([("env", "prod")].into_iter().collect())
            .with_required(["owner".to_string()]);
        let items = vec![
            item("ok", "Microsoft.Web/sites", &[("env", "prod"), ("owner", "a")]),
            item("missing", "Microsoft.Web/sites", &[("env", "prod")]),
            item("drift", "Microsoft.Web/sites", &[("env", "dev"), ("owner", "a")]),
        ];
        let report = audit(&items, &rules);
        assert_eq!(report.scanned, 3);
        assert_eq!(report.compliant, 1);
        assert_eq!(report.findings.len(), 2);

        assert_eq!(report.findings[0].name, "missing");
        assert_eq!(report.findings[0].missing, vec!["owner".to_string()]);
        assert!(report.findings[0].mismatched.is_empty());

        assert_eq!(report.findings[1].name, "drift");
        assert!(report.findings[1].missing.is_empty());
        assert_eq!(report.findings[1].mismatched[0].from, "dev");
    }

    #[test]
    fn test_audit_untagged_resource_reports_all_desired_as_missing() {
        let rules = TagRules::new([("env", "prod"), ("team", "core")].into_iter().collect());
        let items = vec![item("bare", "Microsoft.Web/sites", &[])];
        let report = audit(&items, &rules);
        assert_eq!(
            report.findings[0].missing,
            vec!["env".to_string(), "team".to_string()]
        );
    }

    #[test]
    fn test_audit_empty_rules_is_clean() {
        let items = vec![item("a", "Microsoft.Web/sites", &[])];
        let report = audit(&items, &TagRules::default());
        assert!(report.is_clean());
        assert_eq!(report.compliant, 1);
    }

    #[test]
    fn test_report_serializes() {
        let rules = TagRules::default().with_required(["owner".to_string()]);
        let items = vec![item("a", "Microsoft.Web/sites", &[])];
        let json = serde_json::to_value(audit(&items, &rules)).unwrap();
        assert_eq!(json["scanned"], 1);
        assert_eq!(json["findings"][0]["missing"][0], "owner");
    }
}
