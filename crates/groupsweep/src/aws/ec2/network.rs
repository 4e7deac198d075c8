//! Single-call deletes: security groups, route tables, subnets, VPCs

use super::Ec2Client;
use crate::aws::error::ProviderError;
use tracing::info;

impl Ec2Client {
    pub async fn delete_security_group(&self, group_id: &str) -> Result<(), ProviderError> {
        info!(sg_id = %group_id, "Deleting security group");
        self.client
            .delete_security_group()
            .group_id(group_id)
            .send()
            .await?;
        Ok(())
    }

    pub async fn delete_route_table(&self, route_table_id: &str) -> Result<(), ProviderError> {
        info!(route_table_id = %route_table_id, "Deleting route table");
        self.client
            .delete_route_table()
            .route_table_id(route_table_id)
            .send()
            .await?;
        Ok(())
    }

    pub async fn delete_subnet(&self, subnet_id: &str) -> Result<(), ProviderError> {
        info!(subnet_id = %subnet_id, "Deleting subnet");
        self.client.delete_subnet().subnet_id(subnet_id).send().await?;
        Ok(())
    }

    pub async fn delete_vpc(&self, vpc_id: &str) -> Result<(), ProviderError> {
        info!(vpc_id = %vpc_id, "Deleting VPC");
        self.client.delete_vpc().vpc_id(vpc_id).send().await?;
        Ok(())
    }
}
