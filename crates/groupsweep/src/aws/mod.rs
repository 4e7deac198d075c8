//! AWS service clients and the provider surface used by the teardown

pub mod account;
pub mod context;
pub mod ec2;
pub mod error;
pub mod operations;
pub mod resource_groups;

pub use account::{AccountId, get_current_account_id};
pub use context::{AwsContext, FromAwsContext};
pub use ec2::{Ec2Client, ElasticAddress};
pub use error::{ErrorClass, ProviderError};
pub use operations::{AwsCloud, CloudApi};
pub use resource_groups::ResourceGroupsClient;

#[cfg(test)]
pub use operations::MockCloudApi;
