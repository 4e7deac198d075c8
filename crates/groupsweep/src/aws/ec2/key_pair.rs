//! Key pair removal

use super::Ec2Client;
use crate::aws::error::{ProviderError, ignore_not_found};
use tracing::info;

impl Ec2Client {
    /// Whether a key pair with this name exists.
    ///
    /// `DeleteKeyPair` succeeds for names that do not exist, so the teardown
    /// checks first to tell a real delete from a no-op.
    pub async fn key_pair_exists(&self, key_name: &str) -> Result<bool, ProviderError> {
        let result = self
            .client
            .describe_key_pairs()
            .key_names(key_name)
            .send()
            .await
            .map_err(ProviderError::from);

        Ok(ignore_not_found(result)?.is_some_and(|response| !response.key_pairs().is_empty()))
    }

    pub async fn delete_key_pair(&self, key_name: &str) -> Result<(), ProviderError> {
        info!(key_name = %key_name, "Deleting key pair");
        self.client
            .delete_key_pair()
            .key_name(key_name)
            .send()
            .await?;
        Ok(())
    }
}
