//! EC2 types

use std::collections::BTreeMap;

/// An elastic IP allocation and its tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElasticAddress {
    pub allocation_id: String,
    pub public_ip: Option<String>,
    pub tags: BTreeMap<String, String>,
}

impl ElasticAddress {
    pub fn new(allocation_id: impl Into<String>) -> Self {
        Self {
            allocation_id: allocation_id.into(),
            public_ip: None,
            tags: BTreeMap::new(),
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Whether any tag, under any key, carries `value`.
    ///
    /// The provisioning step tags its addresses with the derived EIP name but
    /// the key is not fixed, so matching is on the value alone. An unrelated
    /// address carrying the same value would match too.
    pub fn has_tag_value(&self, value: &str) -> bool {
        self.tags.values().any(|v| v == value)
    }
}
