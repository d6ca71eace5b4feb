use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::tags::{TagRules, TagSet, TypeRule};

pub const CONFIG_FILENAME: &str = ".azadmin.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Keys every resource must carry
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Tags merged into every resource
    #[serde(default, skip_serializing_if = "TagSet::is_empty")]
    pub tags: TagSet,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<TypeRule>,
}

impl Config {
    /// Load from `path` if given, else the first config found in the working
    /// directory or the user config directory, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return load_config_from_path(path);
        }
        match default_locations().into_iter().find(|p| p.exists()) {
            Some(found) => load_config_from_path(found),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Tag rules from config, with `extra_tags` and `extra_required` layered on top.
    pub fn tag_rules(&self, extra_tags: &TagSet, extra_required: &[String]) -> TagRules {
        TagRules::new(self.tags.merge(extra_tags))
            .with_required(self.required.iter().chain(extra_required).cloned())
            .with_rules(self.rules.iter().cloned())
    }
}

pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let content = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config in {}", path.as_ref().display()))?;
    Ok(config)
}

/// `./.azadmin.toml`, then `<config_dir>/azadmin/config.toml`
pub fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILENAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("azadmin").join("config.toml"));
    }
    paths
}
