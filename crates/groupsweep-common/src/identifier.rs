//! Resource identifiers as reported by the resource-grouping service

use crate::resource_kind::ResourceKind;
use serde::Serialize;

/// One member of a resource group: a type tag plus the resource's ARN.
///
/// Identifiers are opaque apart from the kind segment of the type tag and
/// the last path segment of the ARN, which is the provider's resource ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ResourceIdentifier {
    resource_type: String,
    resource_arn: String,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, resource_arn: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            resource_arn: resource_arn.into(),
        }
    }

    /// Type tag, e.g. `AWS::EC2::Subnet`
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn resource_arn(&self) -> &str {
        &self.resource_arn
    }

    /// Managed kind, or `None` for types this tool does not remove
    pub fn kind(&self) -> Option<ResourceKind> {
        ResourceKind::from_type_tag(&self.resource_type)
    }

    /// Provider resource ID (`subnet-0abc` in `arn:aws:ec2:...:subnet/subnet-0abc`)
    pub fn resource_id(&self) -> &str {
        match self.resource_arn.rsplit_once('/') {
            Some((_, id)) => id,
            None => self
                .resource_arn
                .rsplit(':')
                .next()
                .unwrap_or(self.resource_arn.as_str()),
        }
    }
}
