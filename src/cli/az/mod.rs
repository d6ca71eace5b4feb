// src/cli/az/mod.rs
mod account;
mod group;
mod management_group;
mod resource;
mod tag;

#[cfg(test)]
pub(crate) mod testing;

pub use account::{Account, AccountCli};
pub use group::{GroupCli, ResourceGroup, RESOURCE_GROUP_TYPE};
pub use management_group::ManagementGroupCli;
pub use resource::{Resource, ResourceCli};
pub use tag::TagCli;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use std::process::Command;
use tracing::debug;

/// Environment variable overriding the `az` executable.
pub const AZ_BIN_ENV: &str = "AZADMIN_AZ";

/// Raw result of one `az` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AzOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl AzOutput {
    fn mentions_any(&self, patterns: &[&str]) -> bool {
        patterns
            .iter()
            .any(|p| self.stderr.contains(p) || self.stdout.contains(p))
    }
}

/// Executes `az` with the given arguments.
pub trait AzRunner {
    fn run(&self, args: &[String]) -> Result<AzOutput>;
}

/// Runs the real `az` executable as a child process.
pub struct AzProcess {
    program: String,
}

impl AzProcess {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Uses `$AZADMIN_AZ` if set, otherwise `az` from `PATH`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(AZ_BIN_ENV).unwrap_or_else(|_| "az".to_string()))
    }
}

impl AzRunner for AzProcess {
    fn run(&self, args: &[String]) -> Result<AzOutput> {
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .with_context(|| {
                format!(
                    "Failed to execute '{}'. Is Azure CLI installed?",
                    self.program
                )
            })?;

        Ok(AzOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Azure CLI wrapper with optional subscription context
pub struct AzureCli {
    runner: Box<dyn AzRunner>,
    subscription: Option<String>,
}

impl AzureCli {
    pub fn new(subscription: Option<String>) -> Self {
        Self::with_runner(Box::new(AzProcess::from_env()), subscription)
    }

    pub fn with_runner(runner: Box<dyn AzRunner>, subscription: Option<String>) -> Self {
        Self {
            runner,
            subscription,
        }
    }

    pub fn subscription(&self) -> Option<&str> {
        self.subscription.as_deref()
    }

    // Service accessors
    pub fn account(&self) -> AccountCli<'_> {
        AccountCli { az: self }
    }
    pub fn group(&self) -> GroupCli<'_> {
        GroupCli { az: self }
    }
    pub fn resource(&self) -> ResourceCli<'_> {
        ResourceCli { az: self }
    }
    pub fn tag(&self) -> TagCli<'_> {
        TagCli { az: self }
    }
    pub fn management_group(&self) -> ManagementGroupCli<'_> {
        ManagementGroupCli { az: self }
    }

    /// Base arguments for a subscription-scoped command.
    fn scoped(&self, base: &[&str]) -> Vec<String> {
        let mut args = tenant(base);
        if let Some(sub) = &self.subscription {
            args.push("--subscription".to_string());
            args.push(sub.clone());
        }
        args
    }

    fn exec(&self, args: &[String]) -> Result<AzOutput> {
        debug!(command = %format!("az {}", args.join(" ")), "running az");
        let output = self.runner.run(args)?;
        debug!(success = output.success, "az finished");
        Ok(output)
    }

    /// Run and return trimmed stdout, failing on non-zero exit.
    fn run(&self, args: &[String]) -> Result<String> {
        let output = self.exec(args)?;
        if !output.success {
            bail!("az command failed: {}", output.stderr.trim());
        }
        Ok(output.stdout.trim().to_string())
    }

    /// Run and parse stdout as JSON
    fn run_json<T: DeserializeOwned>(&self, args: &[String]) -> Result<T> {
        let stdout = self.run(args)?;
        serde_json::from_str(&stdout).context("Azure CLI returned invalid JSON")
    }

    /// Run and return stdout, or None if the command fails with a not-found error
    fn run_optional(&self, args: &[String], not_found_errors: &[&str]) -> Result<Option<String>> {
        let output = self.exec(args)?;
        if output.success {
            return Ok(Some(output.stdout));
        }
        if output.mentions_any(not_found_errors) {
            return Ok(None);
        }
        bail!("az command failed: {}", output.stderr.trim());
    }

    /// Run and report only whether the command exited successfully
    fn succeeds(&self, args: &[String]) -> Result<bool> {
        Ok(self.exec(args)?.success)
    }
}

/// Base arguments for a tenant-level command (no `--subscription`).
fn tenant(base: &[&str]) -> Vec<String> {
    base.iter().map(|s| s.to_string()).collect()
}
