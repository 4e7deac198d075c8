//! groupsweep-common - Shared types without AWS SDK dependencies
//!
//! ## Modules
//!
//! - [`defaults`]: Retry ceilings and default region
//! - [`identifier`]: Resource-group member identifiers
//! - [`names`]: Names derived from a module name
//! - [`resource_kind`]: Managed resource kinds and teardown order

pub mod defaults;
pub mod identifier;
pub mod names;
pub mod resource_kind;

pub use identifier::ResourceIdentifier;
pub use names::GroupNames;
pub use resource_kind::ResourceKind;
