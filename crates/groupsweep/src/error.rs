//! Run-level errors
//!
//! Per-resource failures never surface here: they are recorded in the
//! report. A `TeardownError` means the run could not start or could not
//! learn what to remove.

use crate::aws::error::ProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeardownError {
    /// Arguments that cannot describe a group
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No usable session or credentials
    #[error("cannot obtain AWS credentials in region {region}")]
    Credentials {
        region: String,
        #[source]
        source: ProviderError,
    },

    /// Membership lookup failed for a reason other than the group missing
    #[error("failed to resolve resource group {group}")]
    GroupResolution {
        group: String,
        #[source]
        source: ProviderError,
    },
}
