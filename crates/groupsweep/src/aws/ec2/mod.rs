//! EC2 resource removal
//!
//! Thin wrappers over the EC2 API. Every method returns the provider's error
//! as a [`ProviderError`](crate::aws::error::ProviderError) so the teardown
//! layer can classify it; none of them retries or waits.

mod address;
mod instance;
mod internet_gateway;
mod key_pair;
mod nat_gateway;
mod network;
mod types;

pub use types::ElasticAddress;

use crate::aws::context::{AwsContext, FromAwsContext};
use aws_sdk_ec2::Client;

/// EC2 client used by the teardown
pub struct Ec2Client {
    pub(crate) client: Client,
}

impl FromAwsContext for Ec2Client {
    fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.ec2_client(),
        }
    }
}
