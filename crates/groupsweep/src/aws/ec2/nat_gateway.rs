//! NAT gateway removal

use super::Ec2Client;
use crate::aws::error::ProviderError;
use aws_sdk_ec2::types::NatGatewayState;
use tracing::{debug, info};

impl Ec2Client {
    /// Describe a NAT gateway's state; `Ok(None)` when none is returned.
    pub async fn describe_nat_gateway_state(
        &self,
        nat_gateway_id: &str,
    ) -> Result<Option<NatGatewayState>, ProviderError> {
        let response = self
            .client
            .describe_nat_gateways()
            .nat_gateway_ids(nat_gateway_id)
            .send()
            .await?;

        let state = response.nat_gateways().first().map(|gateway| {
            gateway
                .state()
                .cloned()
                .unwrap_or(NatGatewayState::Pending)
        });

        debug!(nat_gateway_id = %nat_gateway_id, state = ?state, "Described NAT gateway");
        Ok(state)
    }

    /// Delete a NAT gateway. Deletion is asynchronous: the gateway moves
    /// through `deleting` before it reaches `deleted`.
    pub async fn delete_nat_gateway(&self, nat_gateway_id: &str) -> Result<(), ProviderError> {
        info!(nat_gateway_id = %nat_gateway_id, "Deleting NAT gateway");

        self.client
            .delete_nat_gateway()
            .nat_gateway_id(nat_gateway_id)
            .send()
            .await?;

        Ok(())
    }
}
