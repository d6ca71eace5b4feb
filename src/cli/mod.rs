pub mod az;
pub mod commands;
pub mod config;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::tags::{TagError, TagSet};

#[derive(Parser)]
#[command(name = "azadmin")]
#[command(about = "Audit and merge Azure resource tags, create resource and management groups")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: ./.azadmin.toml, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subscription name or ID passed to az
    #[arg(long, global = true, env = "AZADMIN_SUBSCRIPTION")]
    pub subscription: Option<String>,

    /// Enable debug logging (shows every az invocation)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

const TAG_KEY_CASE_NOTE: &str = "Tag keys are compared case-sensitively: a resource tagged \
    `Env=prod` is reported as missing `env` and gets `env` added by merge, \
    although Azure treats the two names as the same tag.";

#[derive(Subcommand)]
pub enum Commands {
    /// Write a starter .azadmin.toml in the current directory
    Init(InitArgs),
    /// Report resources missing required tags or carrying drifted values
    #[command(after_help = TAG_KEY_CASE_NOTE)]
    Audit(AuditArgs),
    /// Merge desired tags into every resource of a resource group
    #[command(after_help = TAG_KEY_CASE_NOTE)]
    Merge(MergeArgs),
    /// Manage resource groups
    Group(GroupArgs),
    /// Manage management groups
    MgmtGroup(MgmtGroupArgs),
}

#[derive(clap::Args)]
pub struct InitArgs {
    /// Default resource group
    #[arg(long, short = 'g')]
    pub resource_group: Option<String>,

    /// Default location for new resource groups
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Default tag (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,

    /// Overwrite an existing config
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct AuditArgs {
    /// Resource group to audit (falls back to config)
    #[arg(long, short = 'g')]
    pub resource_group: Option<String>,

    /// Desired tag, merged over configured tags (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,

    /// Key that must be present (repeatable)
    #[arg(long = "require", value_name = "KEY")]
    pub required: Vec<String>,

    /// Only audit resources of this type
    #[arg(long = "type", value_name = "RESOURCE_TYPE")]
    pub resource_type: Option<String>,

    /// Also audit the resource group's own tags (skipped when --type names
    /// another type)
    #[arg(long)]
    pub include_group: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Exit non-zero when any finding is reported
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args)]
pub struct MergeArgs {
    /// Resource group to update (falls back to config)
    #[arg(long, short = 'g')]
    pub resource_group: Option<String>,

    /// Tag to merge, over configured tags (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,

    /// Only update resources of this type
    #[arg(long = "type", value_name = "RESOURCE_TYPE")]
    pub resource_type: Option<String>,

    /// Also merge tags into the resource group itself (skipped when --type
    /// names another type)
    #[arg(long)]
    pub include_group: bool,

    /// Show what would change without applying
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct GroupArgs {
    #[command(subcommand)]
    pub command: GroupCommands,
}

#[derive(Subcommand)]
pub enum GroupCommands {
    /// Create a resource group (no-op if it exists)
    Create(GroupCreateArgs),
}

#[derive(clap::Args)]
pub struct GroupCreateArgs {
    /// Resource group name
    pub name: String,

    /// Location (falls back to config)
    #[arg(long, short = 'l')]
    pub location: Option<String>,

    /// Tag for the new group, over configured tags (repeatable)
    #[arg(long = "tag", value_name = "KEY=VALUE", value_parser = parse_tag)]
    pub tags: Vec<(String, String)>,
}

#[derive(clap::Args)]
pub struct MgmtGroupArgs {
    #[command(subcommand)]
    pub command: MgmtGroupCommands,
}

#[derive(Subcommand)]
pub enum MgmtGroupCommands {
    /// Create management groups, continuing past failures
    Create(MgmtGroupCreateArgs),
}

#[derive(clap::Args)]
pub struct MgmtGroupCreateArgs {
    /// Management group names (NAME or NAME,Display Name)
    pub names: Vec<String>,

    /// File with one NAME or NAME,Display Name per line
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Parent management group ID or name
    #[arg(long)]
    pub parent: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn parse_tag(s: &str) -> Result<(String, String), TagError> {
    TagSet::parse_pair(s)
}

/// Collect `--tag` pairs; later pairs win.
pub fn tag_args(pairs: &[(String, String)]) -> TagSet {
    pairs.iter().cloned().collect()
}
