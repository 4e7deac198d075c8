//! AWS test utilities
//!
//! Provides region detection and unique module names for AWS integration tests.

use chrono::Utc;

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to eu-central-1
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "eu-central-1".to_string())
}

/// Generate a unique module name for test resources.
///
/// Format: `groupsweep-test-{timestamp_ms}-{counter}`, so groups created by
/// tests that start simultaneously never collide.
pub fn test_module_name() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("groupsweep-test-{}-{}", ts, counter)
}
