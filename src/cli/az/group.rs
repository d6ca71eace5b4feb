// src/cli/az/group.rs
use anyhow::{Context, Result};
use serde::Deserialize;

use super::AzureCli;
use crate::tags::{TagSet, Tagged};

/// Resource type Azure reports for resource groups.
pub const RESOURCE_GROUP_TYPE: &str = "Microsoft.Resources/resourceGroups";

const NOT_FOUND_ERRORS: &[&str] = &["ResourceGroupNotFound", "could not be found"];

pub struct GroupCli<'a> {
    pub(super) az: &'a AzureCli,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceGroup {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default, deserialize_with = "TagSet::deserialize_nullable")]
    pub tags: TagSet,
}

impl Tagged for ResourceGroup {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn resource_type(&self) -> &str {
        RESOURCE_GROUP_TYPE
    }
    fn tags(&self) -> &TagSet {
        &self.tags
    }
}

impl GroupCli<'_> {
    /// Fetch a resource group, or None if it does not exist
    pub fn show(&self, name: &str) -> Result<Option<ResourceGroup>> {
        let args = self
            .az
            .scoped(&["group", "show", "--name", name, "--output", "json"]);
        let Some(stdout) = self
            .az
            .run_optional(&args, NOT_FOUND_ERRORS)
            .with_context(|| format!("Failed to look up resource group '{}'", name))?
        else {
            return Ok(None);
        };
        let group = serde_json::from_str(&stdout)
            .with_context(|| format!("Invalid JSON for resource group '{}'", name))?;
        Ok(Some(group))
    }

    /// Create resource group
    pub fn create(&self, name: &str, location: &str, tags: &TagSet) -> Result<ResourceGroup> {
        let mut args = self.az.scoped(&[
            "group",
            "create",
            "--name",
            name,
            "--location",
            location,
            "--output",
            "json",
        ]);
        if !tags.is_empty() {
            args.push("--tags".to_string());
            args.extend(tags.to_cli_args());
        }

        self.az.run_json(&args).with_context(|| {
            format!(
                "Failed to create resource group '{}' in location '{}'",
                name, location
            )
        })
    }
}
