//! Elastic IP discovery and release

use super::Ec2Client;
use super::types::ElasticAddress;
use crate::aws::error::ProviderError;
use tracing::{debug, info};

impl Ec2Client {
    /// List every elastic IP in the account/region with its tags.
    ///
    /// Addresses without an allocation ID cannot be released by allocation
    /// and are skipped.
    pub async fn describe_addresses(&self) -> Result<Vec<ElasticAddress>, ProviderError> {
        let response = self.client.describe_addresses().send().await?;

        let addresses: Vec<ElasticAddress> = response
            .addresses()
            .iter()
            .filter_map(|address| {
                let allocation_id = address.allocation_id()?;
                Some(ElasticAddress {
                    allocation_id: allocation_id.to_string(),
                    public_ip: address.public_ip().map(str::to_string),
                    tags: address
                        .tags()
                        .iter()
                        .filter_map(|tag| Some((tag.key()?.to_string(), tag.value()?.to_string())))
                        .collect(),
                })
            })
            .collect();

        debug!(count = addresses.len(), "Described elastic IPs");
        Ok(addresses)
    }

    /// Release an Elastic IP address
    pub async fn release_address(&self, allocation_id: &str) -> Result<(), ProviderError> {
        info!(allocation_id = %allocation_id, "Releasing Elastic IP");
        self.client
            .release_address()
            .allocation_id(allocation_id)
            .send()
            .await?;
        Ok(())
    }
}
