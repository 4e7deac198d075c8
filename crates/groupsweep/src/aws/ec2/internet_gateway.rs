//! Internet gateway detach and removal

use super::Ec2Client;
use crate::aws::error::ProviderError;
use tracing::{debug, info};

impl Ec2Client {
    /// Describe an internet gateway and return the VPCs it is attached to.
    ///
    /// Returns `Ok(None)` when the gateway is not returned at all.
    pub async fn describe_internet_gateway_attachments(
        &self,
        internet_gateway_id: &str,
    ) -> Result<Option<Vec<String>>, ProviderError> {
        let response = self
            .client
            .describe_internet_gateways()
            .internet_gateway_ids(internet_gateway_id)
            .send()
            .await?;

        let attachments = response.internet_gateways().first().map(|gateway| {
            gateway
                .attachments()
                .iter()
                .filter_map(|a| a.vpc_id())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        debug!(
            internet_gateway_id = %internet_gateway_id,
            attachments = ?attachments,
            "Described internet gateway"
        );
        Ok(attachments)
    }

    pub async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), ProviderError> {
        info!(
            internet_gateway_id = %internet_gateway_id,
            vpc_id = %vpc_id,
            "Detaching internet gateway"
        );

        self.client
            .detach_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .vpc_id(vpc_id)
            .send()
            .await?;

        Ok(())
    }

    pub async fn delete_internet_gateway(
        &self,
        internet_gateway_id: &str,
    ) -> Result<(), ProviderError> {
        info!(internet_gateway_id = %internet_gateway_id, "Deleting internet gateway");

        self.client
            .delete_internet_gateway()
            .internet_gateway_id(internet_gateway_id)
            .send()
            .await?;

        Ok(())
    }
}
