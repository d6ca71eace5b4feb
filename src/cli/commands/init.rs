use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::config::{Config, CONFIG_FILENAME};
use crate::cli::{tag_args, GlobalArgs, InitArgs};

pub fn execute_init(args: InitArgs, global: &GlobalArgs) -> Result<()> {
    // Check if config already exists
    if Path::new(CONFIG_FILENAME).exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            CONFIG_FILENAME
        );
    }

    let tags = tag_args(&args.tags);
    tags.validate()?;

    let config = Config {
        subscription: global.subscription.clone(),
        resource_group: args.resource_group,
        location: args.location,
        tags,
        ..Config::default()
    };

    config.save(CONFIG_FILENAME)?;

    eprintln!("Created {}", CONFIG_FILENAME);
    if let Some(ref sub) = config.subscription {
        eprintln!("  subscription: {}", sub);
    }
    if let Some(ref rg) = config.resource_group {
        eprintln!("  resource_group: {}", rg);
    }
    if let Some(ref location) = config.location {
        eprintln!("  location: {}", location);
    }
    if !config.tags.is_empty() {
        eprintln!("  tags: {}", config.tags);
    }
    eprintln!();
    eprintln!("Add [[rules]] entries for per-type tags, then run: azadmin audit");

    Ok(())
}
