//! Resource Groups client
//!
//! The group is the only index of what a module provisioned: membership is
//! read from it and the group itself is deleted last.

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::error::ProviderError;
use aws_sdk_resourcegroups::Client;
use groupsweep_common::ResourceIdentifier;
use tracing::{debug, info};

/// Resource Groups client for membership lookup and group deletion
pub struct ResourceGroupsClient {
    client: Client,
}

impl FromAwsContext for ResourceGroupsClient {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.resource_groups_client(),
        }
    }
}

impl ResourceGroupsClient {
    /// List every member of a group, following pagination tokens until the
    /// service stops returning one.
    ///
    /// Members the service reports without an ARN or type cannot be acted on
    /// and are skipped.
    pub async fn list_group_resources(
        &self,
        group_name: &str,
    ) -> Result<Vec<ResourceIdentifier>, ProviderError> {
        let mut members = Vec::new();
        let mut next_token: Option<String> = None;
        let mut pages = 0u32;

        loop {
            let response = self
                .client
                .list_group_resources()
                .group(group_name)
                .set_next_token(next_token.take())
                .send()
                .await?;
            pages += 1;

            members.extend(
                response
                    .resources()
                    .iter()
                    .filter_map(|item| item.identifier())
                    .filter_map(|id| {
                        Some(ResourceIdentifier::new(id.resource_type()?, id.resource_arn()?))
                    }),
            );

            match response.next_token() {
                Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
                _ => break,
            }
        }

        debug!(group = %group_name, members = members.len(), pages, "Listed group resources");
        Ok(members)
    }

    /// Delete a resource group (the member resources are not touched)
    pub async fn delete_group(&self, group_name: &str) -> Result<(), ProviderError> {
        info!(group = %group_name, "Deleting resource group");
        self.client
            .delete_group()
            .group(group_name)
            .send()
            .await?;
        Ok(())
    }
}
