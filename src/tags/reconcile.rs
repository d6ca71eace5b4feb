// src/tags/reconcile.rs
use serde::Serialize;

use super::{TagDiff, TagRules, TagSet};

/// Anything that carries Azure tags and has a resource type.
pub trait Tagged {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn resource_type(&self) -> &str;
    fn tags(&self) -> &TagSet;
}

/// A tag update that needs to be applied to one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagChange {
    pub id: String,
    pub name: String,
    pub resource_type: String,
    pub current: TagSet,
    pub merged: TagSet,
    pub diff: TagDiff,
}

/// Compute the updates needed to bring `items` in line with `rules`.
///
/// Items whose merged tags equal their current tags produce no change.
/// Output order follows input order.
pub fn plan<'a, T, I>(items: I, rules: &TagRules) -> Vec<TagChange>
where
    T: Tagged + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter_map(|item| {
            let current = item.tags();
            let merged = current.merge(&rules.desired_for(item.resource_type()));
            if &merged == current {
                return None;
            }
            Some(TagChange {
                id: item.id().to_string(),
                name: item.name().to_string(),
                resource_type: item.resource_type().to_string(),
                diff: current.diff(&merged),
                current: current.clone(),
                merged,
            })
        })
        .collect()
}
