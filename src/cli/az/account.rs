// src/cli/az/account.rs
use anyhow::{Context, Result};
use serde::Deserialize;

use super::AzureCli;

pub struct AccountCli<'a> {
    pub(super) az: &'a AzureCli,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tenant_id: Option<String>,
}

impl AccountCli<'_> {
    /// Current (or `--subscription`) subscription
    pub fn show(&self) -> Result<Account> {
        let args = self.az.scoped(&["account", "show", "--output", "json"]);
        self.az
            .run_json(&args)
            .context("Failed to get subscription. Run 'az login' first.")
    }
}
