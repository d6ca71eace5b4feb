// src/cli/az/management_group.rs
use anyhow::{Context, Result};

use super::{tenant, AzureCli};

/// Management groups live at tenant scope, so no `--subscription` is passed.
pub struct ManagementGroupCli<'a> {
    pub(super) az: &'a AzureCli,
}

impl ManagementGroupCli<'_> {
    /// Check if management group exists
    pub fn exists(&self, name: &str) -> Result<bool> {
        let args = tenant(&[
            "account",
            "management-group",
            "show",
            "--name",
            name,
            "--output",
            "none",
        ]);
        self.az
            .succeeds(&args)
            .with_context(|| format!("Failed to check if management group '{}' exists", name))
    }

    pub fn create(&self, name: &str, display_name: Option<&str>, parent: Option<&str>) -> Result<()> {
        let mut args = tenant(&[
            "account",
            "management-group",
            "create",
            "--name",
            name,
            "--output",
            "none",
        ]);
        if let Some(display) = display_name {
            args.push("--display-name".to_string());
            args.push(display.to_string());
        }
        if let Some(parent) = parent {
            args.push("--parent".to_string());
            args.push(parent.to_string());
        }

        self.az
            .run(&args)
            .with_context(|| format!("Failed to create management group '{}'", name))?;
        Ok(())
    }
}
