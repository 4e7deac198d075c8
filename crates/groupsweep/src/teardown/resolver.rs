//! Group membership lookup

use crate::aws::CloudApi;
use crate::error::TeardownError;
use groupsweep_common::ResourceIdentifier;
use tracing::info;

/// Code returned by the grouping service for a group that does not exist
const GROUP_NOT_FOUND_CODE: &str = "NotFoundException";

/// Current members of a resource group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMembership {
    pub identifiers: Vec<ResourceIdentifier>,
    /// False when the group itself is missing; membership is then empty
    pub exists: bool,
}

/// Read the members of `group_name`.
///
/// A missing group is not an error: it means there is nothing to remove.
/// Any other failure is returned without retrying.
pub async fn resolve_group<C: CloudApi>(
    api: &C,
    group_name: &str,
) -> Result<GroupMembership, TeardownError> {
    match api.list_group_resources(group_name).await {
        Ok(identifiers) => {
            info!(group = %group_name, members = identifiers.len(), "Resolved resource group");
            Ok(GroupMembership {
                identifiers,
                exists: true,
            })
        }
        Err(e) if e.code() == Some(GROUP_NOT_FOUND_CODE) => {
            info!(group = %group_name, "Resource group does not exist, nothing to remove");
            Ok(GroupMembership::default())
        }
        Err(source) => Err(TeardownError::GroupResolution {
            group: group_name.to_string(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{MockCloudApi, ProviderError};

    #[tokio::test]
    async fn test_missing_group_is_empty() {
        let mut api = MockCloudApi::new();
        api.expect_list_group_resources()
            .times(1)
            .returning(|_| Err(ProviderError::new("NotFoundException", "no such group")));

        let membership = resolve_group(&api, "rg-missing").await.unwrap();
        assert!(!membership.exists);
        assert!(membership.identifiers.is_empty());
    }

    #[tokio::test]
    async fn test_existing_group() {
        let mut api = MockCloudApi::new();
        api.expect_list_group_resources()
            .withf(|group| group == "rg-awsbi-module")
            .returning(|_| {
                Ok(vec![ResourceIdentifier::new(
                    "AWS::EC2::VPC",
                    "arn:aws:ec2:eu-central-1:1:vpc/vpc-1",
                )])
            });

        let membership = resolve_group(&api, "rg-awsbi-module").await.unwrap();
        assert!(membership.exists);
        assert_eq!(membership.identifiers.len(), 1);
    }

    #[tokio::test]
    async fn test_other_errors_propagate() {
        let mut api = MockCloudApi::new();
        api.expect_list_group_resources()
            .returning(|_| Err(ProviderError::new("ForbiddenException", "denied")));

        let err = resolve_group(&api, "rg-awsbi-module").await.unwrap_err();
        assert!(matches!(err, TeardownError::GroupResolution { .. }));
    }
}
