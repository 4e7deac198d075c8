//! Names derived from a module name
//!
//! The provisioning step names everything it creates after the module, so
//! the teardown can find the group, key pair and elastic IPs without any
//! local state.
//!
//! | Resource | Name |
//! |----------|------|
//! | Resource group | `rg-<module>` |
//! | Key pair | `kp-<module>` |
//! | Elastic IP tag value | `eip-<module>` |

use serde::Serialize;

/// Prefix of the resource group name
pub const RESOURCE_GROUP_PREFIX: &str = "rg-";

/// Prefix of the key pair name
pub const KEY_PAIR_PREFIX: &str = "kp-";

/// Prefix of the tag value carried by the module's elastic IPs
pub const ELASTIC_IP_PREFIX: &str = "eip-";

/// All names derived from one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupNames {
    pub module: String,
    pub resource_group: String,
    pub key_pair: String,
    pub elastic_ip: String,
}

impl GroupNames {
    pub fn for_module(module: &str) -> Self {
        Self {
            module: module.to_string(),
            resource_group: format!("{RESOURCE_GROUP_PREFIX}{module}"),
            key_pair: format!("{KEY_PAIR_PREFIX}{module}"),
            elastic_ip: format!("{ELASTIC_IP_PREFIX}{module}"),
        }
    }
}
