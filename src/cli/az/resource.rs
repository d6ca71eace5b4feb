// src/cli/az/resource.rs
use anyhow::{Context, Result};
use serde::Deserialize;

use super::AzureCli;
use crate::tags::{TagSet, Tagged};

pub struct ResourceCli<'a> {
    pub(super) az: &'a AzureCli,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "TagSet::deserialize_nullable")]
    pub tags: TagSet,
}

impl Tagged for Resource {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn resource_type(&self) -> &str {
        &self.resource_type
    }
    fn tags(&self) -> &TagSet {
        &self.tags
    }
}

impl ResourceCli<'_> {
    /// List resources in a group, optionally filtered by resource type
    pub fn list(&self, group: &str, resource_type: Option<&str>) -> Result<Vec<Resource>> {
        let mut args = self.az.scoped(&[
            "resource",
            "list",
            "--resource-group",
            group,
            "--output",
            "json",
        ]);
        if let Some(t) = resource_type {
            args.push("--resource-type".to_string());
            args.push(t.to_string());
        }

        self.az
            .run_json(&args)
            .with_context(|| format!("Failed to list resources in group '{}'", group))
    }
}
