use anyhow::{bail, Result};
use tracing::debug;

use crate::cli::az::{AzureCli, Resource, ResourceGroup, RESOURCE_GROUP_TYPE};
use crate::cli::config::Config;
use crate::cli::GlobalArgs;

const GROUP_REQUIRED_ERROR: &str = "No resource group specified. Either:\n  \
    1. Pass --resource-group <name>\n  \
    2. Set resource_group in .azadmin.toml (see `azadmin init`)";

pub const DEFAULT_LOCATION: &str = "westus";

/// Load config and build the az wrapper for the selected subscription
pub fn load_context(global: &GlobalArgs) -> Result<(Config, AzureCli)> {
    let config = Config::load(global.config.as_deref())?;
    let subscription = resolve_subscription(global.subscription.clone(), &config);
    debug!(subscription = ?subscription, "loaded config");
    Ok((config, AzureCli::new(subscription)))
}

pub fn resolve_subscription(arg: Option<String>, config: &Config) -> Option<String> {
    arg.or_else(|| config.subscription.clone())
}

/// Resolve resource group from args or config
pub fn resolve_resource_group(arg: Option<String>, config: &Config) -> Result<String> {
    match arg.or_else(|| config.resource_group.clone()) {
        Some(group) => Ok(group),
        None => bail!(GROUP_REQUIRED_ERROR),
    }
}

/// Resolve location from args or config, noting when falling back to default
pub fn resolve_location(arg: Option<String>, config: &Config) -> String {
    arg.or_else(|| config.location.clone()).unwrap_or_else(|| {
        eprintln!(
            "    Note: No location specified, using default: {}",
            DEFAULT_LOCATION
        );
        DEFAULT_LOCATION.to_string()
    })
}

/// Resources (and optionally the group itself) targeted by audit and merge.
pub struct Targets {
    pub group: Option<ResourceGroup>,
    pub resources: Vec<Resource>,
}

pub fn fetch_targets(
    cli: &AzureCli,
    group: &str,
    resource_type: Option<&str>,
    include_group: bool,
) -> Result<Targets> {
    let Some(rg) = cli.group().show(group)? else {
        bail!("Resource group '{}' not found", group);
    };
    let resources = cli.resource().list(group, resource_type)?;
    debug!(group, count = resources.len(), "listed resources");

    // A type filter applies to the group too
    let group_matches =
        resource_type.map_or(true, |t| t.eq_ignore_ascii_case(RESOURCE_GROUP_TYPE));
    Ok(Targets {
        group: (include_group && group_matches).then_some(rg),
        resources,
    })
}
