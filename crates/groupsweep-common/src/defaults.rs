//! Default configuration values

use std::time::Duration;

/// Default AWS region
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Fixed interval between polls and retries
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(5);

/// Attempt ceiling for polls and retries (30 x 5s = 150s per resource)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
