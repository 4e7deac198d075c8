//! Membership classification by resource kind

use groupsweep_common::{ResourceIdentifier, ResourceKind};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Group members bucketed by managed kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedResources {
    buckets: BTreeMap<ResourceKind, BTreeSet<ResourceIdentifier>>,
    dropped: BTreeSet<ResourceIdentifier>,
}

impl ClassifiedResources {
    /// Members of one kind
    pub fn get(&self, kind: ResourceKind) -> impl Iterator<Item = &ResourceIdentifier> {
        self.buckets.get(&kind).into_iter().flatten()
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.buckets.get(&kind).map_or(0, BTreeSet::len)
    }

    /// Number of classified members across all kinds
    pub fn len(&self) -> usize {
        self.buckets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members whose kind is unmanaged or whose type tag is malformed
    pub fn dropped(&self) -> &BTreeSet<ResourceIdentifier> {
        &self.dropped
    }
}

/// Split identifiers into per-kind buckets.
///
/// Each recognized identifier lands in exactly one bucket; duplicates
/// collapse. Unrecognized identifiers are dropped, never an error.
pub fn classify<I>(identifiers: I) -> ClassifiedResources
where
    I: IntoIterator<Item = ResourceIdentifier>,
{
    let mut classified = ClassifiedResources::default();

    for identifier in identifiers {
        match identifier.kind() {
            Some(kind) => {
                classified
                    .buckets
                    .entry(kind)
                    .or_default()
                    .insert(identifier);
            }
            None => {
                debug!(
                    resource_type = %identifier.resource_type(),
                    resource_arn = %identifier.resource_arn(),
                    "Dropping unmanaged resource"
                );
                classified.dropped.insert(identifier);
            }
        }
    }

    classified
}
