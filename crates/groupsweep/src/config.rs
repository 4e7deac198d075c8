//! Configuration types for a teardown run

use crate::error::TeardownError;
use crate::wait::RetryPolicy;
use groupsweep_common::GroupNames;
use groupsweep_common::names::RESOURCE_GROUP_PREFIX;

/// Longest resource group name the grouping service accepts
const MAX_GROUP_NAME_LEN: usize = 128;

/// How reports and plans are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Everything a run needs besides the provider session
#[derive(Debug, Clone)]
pub struct TeardownConfig {
    /// Module whose group, key pair and elastic IPs are removed
    pub module: String,
    /// AWS region
    pub region: String,
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
    pub format: OutputFormat,
    /// Interval and ceiling for polls and retries
    pub retry: RetryPolicy,
}

impl TeardownConfig {
    pub fn names(&self) -> GroupNames {
        GroupNames::for_module(&self.module)
    }

    /// Reject module names that cannot have produced a resource group.
    pub fn validate(&self) -> Result<(), TeardownError> {
        if self.module.is_empty() {
            return Err(TeardownError::InvalidConfig(
                "module name must not be empty".to_string(),
            ));
        }

        if let Some(c) = self
            .module
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(TeardownError::InvalidConfig(format!(
                "module name {:?} contains invalid character {c:?}",
                self.module
            )));
        }

        if RESOURCE_GROUP_PREFIX.len() + self.module.len() > MAX_GROUP_NAME_LEN {
            return Err(TeardownError::InvalidConfig(format!(
                "module name is too long: group names are limited to {MAX_GROUP_NAME_LEN} characters"
            )));
        }

        if self.region.trim().is_empty() {
            return Err(TeardownError::InvalidConfig(
                "region must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
