use anyhow::Result;

use super::helpers::{load_context, resolve_location};
use crate::cli::az::{AzureCli, ResourceGroup};
use crate::cli::{tag_args, GlobalArgs, GroupCreateArgs};
use crate::tags::TagSet;

#[derive(Debug)]
pub enum GroupOutcome {
    Created(ResourceGroup),
    AlreadyExists(ResourceGroup),
}

pub fn execute_group_create(args: GroupCreateArgs, global: &GlobalArgs) -> Result<()> {
    let (config, cli) = load_context(global)?;
    let location = resolve_location(args.location, &config);
    let tags = config.tags.merge(&tag_args(&args.tags));

    let account = cli.account().show()?;

    eprintln!("==> Creating resource group: {}", args.name);
    eprintln!("    Subscription: {} ({})", account.name, account.id);
    eprintln!("    Location:     {}", location);
    eprintln!("    Tags:         {}", tags);
    eprintln!();

    match create_group(&cli, &args.name, &location, &tags)? {
        GroupOutcome::Created(group) => {
            eprintln!("[ok] Created {}", group.id);
        }
        GroupOutcome::AlreadyExists(group) => {
            eprintln!(
                "[ok] Resource group '{}' already exists in {} (unchanged)",
                group.name, group.location
            );
            if group.location != location {
                eprintln!(
                    "    Note: existing location '{}' differs from requested '{}'",
                    group.location, location
                );
            }
        }
    }

    Ok(())
}

/// Create the group unless it already exists
pub fn create_group(
    cli: &AzureCli,
    name: &str,
    location: &str,
    tags: &TagSet,
) -> Result<GroupOutcome> {
    tags.validate()?;

    if let Some(existing) = cli.group().show(name)? {
        return Ok(GroupOutcome::AlreadyExists(existing));
    }

    let group = cli.group().create(name, location, tags)?;
    Ok(GroupOutcome::Created(group))
}
