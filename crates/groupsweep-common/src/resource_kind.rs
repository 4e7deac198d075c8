//! Managed resource kinds and teardown ordering
//!
//! Resources must be removed in dependency order: anything that references
//! another resource goes before the resource it references.

use serde::Serialize;
use std::fmt;

/// Types of AWS resources removed by a group teardown
///
/// Variants are declared in teardown order, so the derived `Ord` sorts a
/// collection of kinds into the order they must be deleted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// EC2 instance (must be terminated before its SG and subnet can go)
    Instance,
    /// Security group (depends on instances being terminated)
    SecurityGroup,
    /// NAT gateway (holds an elastic IP and sits in a subnet)
    NatGateway,
    /// Elastic IP allocation (released once the NAT gateway is gone)
    ElasticIp,
    /// Internet gateway (must be detached before the VPC can go)
    InternetGateway,
    /// Subnet
    Subnet,
    /// Route table
    RouteTable,
    /// VPC, the root of the dependency graph
    Vpc,
}

impl ResourceKind {
    /// Every kind, in the order the teardown sequencer visits them.
    pub const TEARDOWN_ORDER: [ResourceKind; 8] = [
        ResourceKind::Instance,
        ResourceKind::SecurityGroup,
        ResourceKind::NatGateway,
        ResourceKind::ElasticIp,
        ResourceKind::InternetGateway,
        ResourceKind::Subnet,
        ResourceKind::RouteTable,
        ResourceKind::Vpc,
    ];

    /// The kind segment used in resource-group type tags (`AWS::EC2::<segment>`)
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Instance => "Instance",
            ResourceKind::SecurityGroup => "SecurityGroup",
            ResourceKind::NatGateway => "NatGateway",
            ResourceKind::ElasticIp => "EIP",
            ResourceKind::InternetGateway => "InternetGateway",
            ResourceKind::Subnet => "Subnet",
            ResourceKind::RouteTable => "RouteTable",
            ResourceKind::Vpc => "VPC",
        }
    }

    /// Match a kind segment against the managed kinds.
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::TEARDOWN_ORDER
            .into_iter()
            .find(|kind| kind.as_str() == segment)
    }

    /// Parse a resource-group type tag such as `AWS::EC2::Instance`.
    ///
    /// The tag splits on `:` into exactly five segments (the double colons
    /// leave empty segments between them) and segment 4 names the kind.
    /// Malformed tags and unmanaged kinds yield `None`.
    pub fn from_type_tag(type_tag: &str) -> Option<Self> {
        let segments: Vec<&str> = type_tag.split(':').collect();
        if segments.len() != 5 {
            return None;
        }
        Self::from_segment(segments[4])
    }

    /// Whether members of this kind are found by scanning tags rather than
    /// through the resource group.
    pub fn discovered_by_tag_scan(self) -> bool {
        matches!(self, ResourceKind::ElasticIp)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instances_before_security_groups() {
        assert!(
            ResourceKind::Instance < ResourceKind::SecurityGroup,
            "Instances must be cleaned before security groups"
        );
    }

    #[test]
    fn test_vpc_is_last() {
        for kind in ResourceKind::TEARDOWN_ORDER {
            if kind != ResourceKind::Vpc {
                assert!(kind < ResourceKind::Vpc, "{kind} must be deleted before the VPC");
            }
        }
    }

    #[test]
    fn test_nat_gateway_before_eip_and_subnet() {
        assert!(ResourceKind::NatGateway < ResourceKind::ElasticIp);
        assert!(ResourceKind::NatGateway < ResourceKind::Subnet);
    }

    #[test]
    fn test_order_matches_priority() {
        let mut sorted = ResourceKind::TEARDOWN_ORDER;
        sorted.reverse();
        sorted.sort();
        assert_eq!(sorted, ResourceKind::TEARDOWN_ORDER);
    }

    #[test]
    fn test_parse_type_tags() {
        assert_eq!(
            ResourceKind::from_type_tag("AWS::EC2::Instance"),
            Some(ResourceKind::Instance)
        );
        assert_eq!(
            ResourceKind::from_type_tag("AWS::EC2::EIP"),
            Some(ResourceKind::ElasticIp)
        );
        assert_eq!(
            ResourceKind::from_type_tag("AWS::EC2::VPC"),
            Some(ResourceKind::Vpc)
        );
        assert_eq!(ResourceKind::from_type_tag("AWS::S3::Bucket"), None);
        assert_eq!(ResourceKind::from_type_tag("Instance"), None);
        assert_eq!(ResourceKind::from_type_tag("AWS::EC2::Instance::Extra"), None);
    }

    #[test]
    fn test_segment_roundtrip() {
        for kind in ResourceKind::TEARDOWN_ORDER {
            assert_eq!(ResourceKind::from_segment(kind.as_str()), Some(kind));
        }
    }
}
