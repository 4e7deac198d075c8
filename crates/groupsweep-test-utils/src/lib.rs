//! Shared test utilities for groupsweep
//!
//! ## Modules
//!
//! - [`aws`]: AWS region detection and unique module names
//! - [`logging`]: Tracing output captured by the test harness

pub mod aws;
pub mod logging;

pub use aws::{get_test_region, test_module_name};
pub use logging::init_test_tracing;
