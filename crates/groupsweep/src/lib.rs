//! groupsweep: ordered, idempotent teardown of a tagged AWS resource group
//!
//! A module's resources are found through its resource group (`rg-<module>`),
//! removed in dependency order with bounded retries, and summarised in a
//! [`report::TeardownReport`].
//!
//! ## Modules
//!
//! - [`aws`]: Service clients and the [`aws::CloudApi`] provider surface
//! - [`teardown`]: Group resolution, classification and the ordered sequencer
//! - [`wait`]: Fixed-interval polling and retry
//! - [`report`]: Per-resource outcomes
//! - [`config`]: Run configuration

pub mod aws;
pub mod config;
pub mod error;
pub mod report;
pub mod teardown;
pub mod wait;

pub use error::TeardownError;
pub use report::{TeardownOutcome, TeardownReport};
pub use teardown::{Teardown, TeardownPlan};
pub use wait::RetryPolicy;
