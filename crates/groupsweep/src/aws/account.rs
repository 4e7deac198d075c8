//! AWS account validation and identity

use crate::aws::error::ProviderError;
use crate::error::TeardownError;
use serde::Serialize;
use tracing::info;

/// Strongly-typed AWS account ID (12-digit string)
///
/// Captured once at the start of a run so the report says which account was
/// swept.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display, derive_more::Deref,
)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(s: impl Into<String>) -> Self {
        AccountId(s.into())
    }
}

/// Fetch the current AWS account ID from credentials via STS GetCallerIdentity
///
/// This operation requires no special permissions, so a failure here means
/// the session itself is unusable and the run cannot start.
pub async fn get_current_account_id(
    config: &aws_config::SdkConfig,
    region: &str,
) -> Result<AccountId, TeardownError> {
    let sts = aws_sdk_sts::Client::new(config);
    let identity = sts
        .get_caller_identity()
        .send()
        .await
        .map_err(|e| TeardownError::Credentials {
            region: region.to_string(),
            source: ProviderError::from(e),
        })?;

    let account = identity.account().ok_or_else(|| TeardownError::Credentials {
        region: region.to_string(),
        source: ProviderError::without_code("No account ID returned from STS GetCallerIdentity"),
    })?;

    info!(account_id = %account, "AWS account validated");

    Ok(AccountId(account.to_string()))
}
