// src/tags/mod.rs
//! Tag sets and the merge/diff logic used to decide whether a resource needs
//! an update.

mod audit;
mod reconcile;
mod rules;

pub use audit::{audit, AuditFinding, AuditReport};
pub use reconcile::{plan, TagChange, Tagged};
pub use rules::{TagRules, TypeRule};

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Azure allows at most 50 tags on a resource or resource group.
pub const MAX_TAGS: usize = 50;
pub const MAX_KEY_LEN: usize = 512;
pub const MAX_VALUE_LEN: usize = 256;
/// Azure's reserved characters, plus `=` which `az --tags` splits on.
const FORBIDDEN_KEY_CHARS: &[char] = &['<', '>', '%', '&', '\\', '?', '/', '='];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagError {
    #[error("invalid tag '{0}': expected KEY=VALUE")]
    MissingSeparator(String),

    #[error("invalid tag '{0}': key must not be empty")]
    EmptyKey(String),

    #[error("tag key '{key}' is {len} chars (max 512)")]
    KeyTooLong { key: String, len: usize },

    #[error("value of tag '{key}' is {len} chars (max 256)")]
    ValueTooLong { key: String, len: usize },

    #[error("tag key '{key}' contains forbidden character '{ch}'")]
    ForbiddenChar { key: String, ch: char },

    #[error("{count} tags exceeds the Azure limit of 50")]
    TooMany { count: usize },
}

/// Tag key/value pairs as returned by `az` (`"tags": {...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet(BTreeMap<String, String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Right-biased merge: keys from `overlay` win, keys only in `self` are kept.
    pub fn merge(&self, overlay: &TagSet) -> TagSet {
        let mut merged = self.0.clone();
        for (k, v) in &overlay.0 {
            merged.insert(k.clone(), v.clone());
        }
        TagSet(merged)
    }

    /// Keys that `target` adds to or changes in `self`.
    ///
    /// Keys present only in `self` are not reported, since a merge never
    /// removes them.
    pub fn diff(&self, target: &TagSet) -> TagDiff {
        let mut diff = TagDiff::default();
        for (k, v) in &target.0 {
            match self.0.get(k) {
                None => diff.added.push(k.clone()),
                Some(old) if old != v => diff.changed.push(TagValueChange {
                    key: k.clone(),
                    from: old.clone(),
                    to: v.clone(),
                }),
                Some(_) => {}
            }
        }
        diff
    }

    /// Parse a `KEY=VALUE` pair. Splits on the first `=`.
    pub fn parse_pair(s: &str) -> Result<(String, String), TagError> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| TagError::MissingSeparator(s.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(TagError::EmptyKey(s.to_string()));
        }
        Ok((key.to_string(), value.to_string()))
    }

    pub fn from_pairs<I, S>(pairs: I) -> Result<TagSet, TagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = TagSet::new();
        for pair in pairs {
            let (k, v) = Self::parse_pair(pair.as_ref())?;
            set.insert(k, v);
        }
        Ok(set)
    }

    /// Check Azure's tag name and size constraints.
    pub fn validate(&self) -> Result<(), TagError> {
        if self.0.len() > MAX_TAGS {
            return Err(TagError::TooMany {
                count: self.0.len(),
            });
        }
        for (k, v) in &self.0 {
            if k.is_empty() {
                return Err(TagError::EmptyKey(format!("={}", v)));
            }
            let key_len = k.chars().count();
            if key_len > MAX_KEY_LEN {
                return Err(TagError::KeyTooLong {
                    key: k.clone(),
                    len: key_len,
                });
            }
            if let Some(ch) = k.chars().find(|c| FORBIDDEN_KEY_CHARS.contains(c)) {
                return Err(TagError::ForbiddenChar { key: k.clone(), ch });
            }
            let value_len = v.chars().count();
            if value_len > MAX_VALUE_LEN {
                return Err(TagError::ValueTooLong {
                    key: k.clone(),
                    len: value_len,
                });
            }
        }
        Ok(())
    }

    /// Arguments for `az ... --tags`: one `key=value` per tag.
    pub fn to_cli_args(&self) -> Vec<String> {
        self.0.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
    }

    /// Deserialize helper: `az` prints `"tags": null` for untagged resources.
    pub fn deserialize_nullable<'de, D>(deserializer: D) -> Result<TagSet, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<TagSet>::deserialize(deserializer)?.unwrap_or_default())
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "(none)");
        }
        let parts: Vec<String> = self.to_cli_args();
        write!(f, "{}", parts.join(", "))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        TagSet(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagValueChange {
    pub key: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagDiff {
    pub added: Vec<String>,
    pub changed: Vec<TagValueChange>,
}

impl TagDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.changed.is_empty()
    }
}
