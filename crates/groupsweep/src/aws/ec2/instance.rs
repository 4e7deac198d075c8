//! EC2 instance termination

use super::Ec2Client;
use crate::aws::error::ProviderError;
use aws_sdk_ec2::types::InstanceStateName;
use tracing::{debug, info};

impl Ec2Client {
    /// Describe an instance's lifecycle state.
    ///
    /// Returns `Ok(None)` when no reservation holds the instance. An instance
    /// reported without a state is treated as still pending.
    pub async fn describe_instance_state(
        &self,
        instance_id: &str,
    ) -> Result<Option<InstanceStateName>, ProviderError> {
        let response = self
            .client
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await?;

        let state = response
            .reservations()
            .iter()
            .flat_map(|r| r.instances())
            .next()
            .map(|instance| {
                instance
                    .state()
                    .and_then(|s| s.name())
                    .cloned()
                    .unwrap_or(InstanceStateName::Pending)
            });

        debug!(instance_id = %instance_id, state = ?state, "Described instance");
        Ok(state)
    }

    /// Terminate an instance
    pub async fn terminate_instance(&self, instance_id: &str) -> Result<(), ProviderError> {
        info!(instance_id = %instance_id, "Terminating instance");

        self.client
            .terminate_instances()
            .instance_ids(instance_id)
            .send()
            .await?;

        Ok(())
    }
}
