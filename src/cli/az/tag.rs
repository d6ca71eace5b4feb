// src/cli/az/tag.rs
use anyhow::{bail, Context, Result};

use super::AzureCli;
use crate::tags::TagSet;

pub struct TagCli<'a> {
    pub(super) az: &'a AzureCli,
}

impl TagCli<'_> {
    /// Merge `tags` into the tags of the resource (or resource group) `resource_id`.
    ///
    /// Keys not in `tags` are left untouched by Azure.
    pub fn merge(&self, resource_id: &str, tags: &TagSet) -> Result<()> {
        if tags.is_empty() {
            bail!("No tags to merge into '{}'", resource_id);
        }

        let mut args = self.az.scoped(&[
            "tag",
            "update",
            "--resource-id",
            resource_id,
            "--operation",
            "Merge",
            "--output",
            "none",
            "--tags",
        ]);
        args.extend(tags.to_cli_args());

        self.az
            .run(&args)
            .with_context(|| format!("Failed to update tags on '{}'", resource_id))?;
        Ok(())
    }
}
