//! Provider surface used by the teardown
//!
//! The teardown only talks to the provider through [`CloudApi`], so unit
//! tests substitute a `MockCloudApi` and integration tests an in-memory fake.

use crate::aws::context::{AwsContext, FromAwsContext};
use crate::aws::ec2::{ElasticAddress, Ec2Client};
use crate::aws::error::ProviderError;
use crate::aws::resource_groups::ResourceGroupsClient;
use aws_sdk_ec2::types::{InstanceStateName, NatGatewayState};
use groupsweep_common::ResourceIdentifier;

/// Provider calls needed to tear down a resource group.
///
/// Every method is a single request; retrying and waiting happen above this
/// trait.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait CloudApi: Send + Sync {
    /// List every member of a resource group
    async fn list_group_resources(
        &self,
        group_name: &str,
    ) -> Result<Vec<ResourceIdentifier>, ProviderError>;

    /// Delete a resource group
    async fn delete_group(&self, group_name: &str) -> Result<(), ProviderError>;

    /// Lifecycle state of an instance, `None` when it is not returned
    async fn describe_instance(
        &self,
        instance_id: &str,
    ) -> Result<Option<InstanceStateName>, ProviderError>;

    async fn terminate_instance(&self, instance_id: &str) -> Result<(), ProviderError>;

    /// State of a NAT gateway, `None` when it is not returned
    async fn describe_nat_gateway(
        &self,
        nat_gateway_id: &str,
    ) -> Result<Option<NatGatewayState>, ProviderError>;

    async fn delete_nat_gateway(&self, nat_gateway_id: &str) -> Result<(), ProviderError>;

    /// VPCs an internet gateway is attached to, `None` when it is not returned
    async fn describe_internet_gateway(
        &self,
        internet_gateway_id: &str,
    ) -> Result<Option<Vec<String>>, ProviderError>;

    async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), ProviderError>;

    async fn delete_internet_gateway(&self, internet_gateway_id: &str)
    -> Result<(), ProviderError>;

    async fn delete_security_group(&self, group_id: &str) -> Result<(), ProviderError>;

    async fn delete_route_table(&self, route_table_id: &str) -> Result<(), ProviderError>;

    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), ProviderError>;

    async fn delete_vpc(&self, vpc_id: &str) -> Result<(), ProviderError>;

    /// Every elastic IP in the account/region
    async fn describe_addresses(&self) -> Result<Vec<ElasticAddress>, ProviderError>;

    async fn release_address(&self, allocation_id: &str) -> Result<(), ProviderError>;

    async fn key_pair_exists(&self, key_name: &str) -> Result<bool, ProviderError>;

    async fn delete_key_pair(&self, key_name: &str) -> Result<(), ProviderError>;
}

/// The real provider: EC2 plus Resource Groups, built from one context
pub struct AwsCloud {
    ec2: Ec2Client,
    groups: ResourceGroupsClient,
}

impl FromAwsContext for AwsCloud {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            ec2: Ec2Client::from_context(ctx),
            groups: ResourceGroupsClient::from_context(ctx),
        }
    }
}

impl CloudApi for AwsCloud {
    async fn list_group_resources(
        &self,
        group_name: &str,
    ) -> Result<Vec<ResourceIdentifier>, ProviderError> {
        self.groups.list_group_resources(group_name).await
    }

    async fn delete_group(&self, group_name: &str) -> Result<(), ProviderError> {
        self.groups.delete_group(group_name).await
    }

    async fn describe_instance(
        &self,
        instance_id: &str,
    ) -> Result<Option<InstanceStateName>, ProviderError> {
        self.ec2.describe_instance_state(instance_id).await
    }

    async fn terminate_instance(&self, instance_id: &str) -> Result<(), ProviderError> {
        self.ec2.terminate_instance(instance_id).await
    }

    async fn describe_nat_gateway(
        &self,
        nat_gateway_id: &str,
    ) -> Result<Option<NatGatewayState>, ProviderError> {
        self.ec2.describe_nat_gateway_state(nat_gateway_id).await
    }

    async fn delete_nat_gateway(&self, nat_gateway_id: &str) -> Result<(), ProviderError> {
        self.ec2.delete_nat_gateway(nat_gateway_id).await
    }

    async fn describe_internet_gateway(
        &self,
        internet_gateway_id: &str,
    ) -> Result<Option<Vec<String>>, ProviderError> {
        self.ec2
            .describe_internet_gateway_attachments(internet_gateway_id)
            .await
    }

    async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), ProviderError> {
        self.ec2
            .detach_internet_gateway(internet_gateway_id, vpc_id)
            .await
    }

    async fn delete_internet_gateway(
        &self,
        internet_gateway_id: &str,
    ) -> Result<(), ProviderError> {
        self.ec2.delete_internet_gateway(internet_gateway_id).await
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<(), ProviderError> {
        self.ec2.delete_security_group(group_id).await
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<(), ProviderError> {
        self.ec2.delete_route_table(route_table_id).await
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), ProviderError> {
        self.ec2.delete_subnet(subnet_id).await
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<(), ProviderError> {
        self.ec2.delete_vpc(vpc_id).await
    }

    async fn describe_addresses(&self) -> Result<Vec<ElasticAddress>, ProviderError> {
        self.ec2.describe_addresses().await
    }

    async fn release_address(&self, allocation_id: &str) -> Result<(), ProviderError> {
        self.ec2.release_address(allocation_id).await
    }

    async fn key_pair_exists(&self, key_name: &str) -> Result<bool, ProviderError> {
        self.ec2.key_pair_exists(key_name).await
    }

    async fn delete_key_pair(&self, key_name: &str) -> Result<(), ProviderError> {
        self.ec2.delete_key_pair(key_name).await
    }
}
