// src/tags/rules.rs
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{TagError, TagSet};

/// Tags and required keys applied to one resource type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    /// Azure provider type, e.g. `Microsoft.Storage/storageAccounts`
    pub resource_type: String,
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub tags: TagSet,
}

impl TypeRule {
    /// Azure resource types are case-insensitive.
    pub fn matches(&self, resource_type: &str) -> bool {
        self.resource_type.eq_ignore_ascii_case(resource_type)
    }
}

/// Desired tags for a resource group: defaults plus per-type rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRules {
    pub defaults: TagSet,
    pub required: Vec<String>,
    pub rules: Vec<TypeRule>,
}

impl TagRules {
    pub fn new(defaults: TagSet) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn with_required(mut self, required: impl IntoIterator<Item = String>) -> Self {
        self.required.extend(required);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = TypeRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Tags that every resource of `resource_type` should carry.
    ///
    /// Matching rules are applied in declaration order on top of the
    /// defaults, so later rules win.
    pub fn desired_for(&self, resource_type: &str) -> TagSet {
        self.matching(resource_type)
            .fold(self.defaults.clone(), |acc, rule| acc.merge(&rule.tags))
    }

    /// Keys that must be present on a resource of `resource_type`.
    pub fn required_for(&self, resource_type: &str) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = self.required.iter().cloned().collect();
        keys.extend(self.desired_for(resource_type).keys().map(str::to_string));
        for rule in self.matching(resource_type) {
            keys.extend(rule.required.iter().cloned());
        }
        keys
    }

    /// Check every tag set the rules could produce.
    pub fn validate(&self) -> Result<(), TagError> {
        self.defaults.validate()?;
        for rule in &self.rules {
            self.desired_for(&rule.resource_type).validate()?;
        }
        Ok(())
    }

    /// False if no rule would add a tag to any resource.
    pub fn has_tags(&self) -> bool {
        !self.defaults.is_empty() || self.rules.iter().any(|r| !r.tags.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.required.is_empty() && self.rules.is_empty()
    }

    fn matching<'a>(&'a self, resource_type: &'a str) -> impl Iterator<Item = &'a TypeRule> {
        self.rules.iter().filter(move |r| r.matches(resource_type))
    }
}
