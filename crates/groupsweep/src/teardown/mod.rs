//! Ordered teardown of a resource group
//!
//! [`Teardown`] resolves the group, classifies its members and removes them
//! kind by kind in [`ResourceKind::TEARDOWN_ORDER`], then removes the group
//! and the module's key pair. A failed resource is recorded and the run
//! continues; only failing to resolve the group aborts it.
//!
//! Elastic IPs are not taken from the group: they are found by scanning
//! every address in the region for a tag value equal to the module's EIP
//! name.

mod classify;
mod operations;
mod plan;
mod resolver;

pub use classify::{ClassifiedResources, classify};
pub use operations::find_tagged_addresses;
pub use plan::{PlannedCleanup, PlannedStep, TeardownPlan};
pub use resolver::{GroupMembership, resolve_group};

use crate::aws::CloudApi;
use crate::error::TeardownError;
use crate::report::{GroupCleanupTarget, TeardownOutcome, TeardownReport};
use crate::wait::RetryPolicy;
use groupsweep_common::{GroupNames, ResourceKind};
use tracing::{debug, info, warn};

/// Teardown of one module's resource group
pub struct Teardown<'a, C: CloudApi> {
    api: &'a C,
    names: GroupNames,
    policy: RetryPolicy,
}

impl<'a, C: CloudApi> Teardown<'a, C> {
    pub fn new(api: &'a C, names: GroupNames) -> Self {
        Self {
            api,
            names,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Remove every member of the group, then the group and key pair.
    pub async fn run(&self) -> Result<TeardownReport, TeardownError> {
        let mut report = TeardownReport::new(&self.names.module, &self.names.resource_group);

        let membership = resolve_group(self.api, &self.names.resource_group).await?;
        report.group_found = membership.exists;

        let classified = classify(membership.identifiers);
        report.dropped = classified.dropped().len();

        info!(
            group = %self.names.resource_group,
            members = classified.len(),
            dropped = report.dropped,
            "Starting teardown"
        );

        for kind in ResourceKind::TEARDOWN_ORDER {
            if kind.discovered_by_tag_scan() {
                if classified.count(kind) > 0 {
                    debug!(
                        kind = %kind,
                        count = classified.count(kind),
                        "Ignoring group members found by tag scan instead"
                    );
                }
                self.release_elastic_ips(&mut report).await;
                continue;
            }

            for identifier in classified.get(kind) {
                let resource_id = identifier.resource_id();
                let outcome = self.delete_member(kind, resource_id).await;
                log_outcome(kind.as_str(), resource_id, &outcome);
                report.record(kind, resource_id, Some(identifier.resource_arn()), outcome);
            }
        }

        let outcome =
            operations::delete_resource_group(self.api, &self.policy, &self.names.resource_group)
                .await;
        log_outcome("ResourceGroup", &self.names.resource_group, &outcome);
        report.record_group_cleanup(
            GroupCleanupTarget::ResourceGroup,
            &self.names.resource_group,
            outcome,
        );

        let outcome =
            operations::delete_key_pair(self.api, &self.policy, &self.names.key_pair).await;
        log_outcome("KeyPair", &self.names.key_pair, &outcome);
        report.record_group_cleanup(GroupCleanupTarget::KeyPair, &self.names.key_pair, outcome);

        report.finish();

        let summary = report.summary();
        info!(
            group = %self.names.resource_group,
            deleted = summary.deleted,
            not_found = summary.not_found,
            skipped = summary.skipped,
            failed = summary.failed,
            "Teardown complete"
        );

        Ok(report)
    }

    /// Work out what [`run`](Self::run) would remove without removing anything.
    pub async fn plan(&self) -> Result<TeardownPlan, TeardownError> {
        let membership = resolve_group(self.api, &self.names.resource_group).await?;
        let classified = classify(membership.identifiers);
        let mut steps = Vec::new();

        for kind in ResourceKind::TEARDOWN_ORDER {
            if kind.discovered_by_tag_scan() {
                match find_tagged_addresses(self.api, &self.names.elastic_ip).await {
                    Ok(addresses) => steps.extend(addresses.into_iter().map(|a| PlannedStep {
                        kind,
                        resource_id: a.allocation_id,
                        resource_arn: None,
                    })),
                    Err(e) => {
                        warn!(tag_value = %self.names.elastic_ip, error = %e, "Elastic IP scan failed")
                    }
                }
                continue;
            }

            steps.extend(classified.get(kind).map(|id| PlannedStep {
                kind,
                resource_id: id.resource_id().to_string(),
                resource_arn: Some(id.resource_arn().to_string()),
            }));
        }

        Ok(TeardownPlan {
            module: self.names.module.clone(),
            resource_group: self.names.resource_group.clone(),
            group_found: membership.exists,
            steps,
            group_cleanup: vec![
                PlannedCleanup {
                    target: GroupCleanupTarget::ResourceGroup,
                    name: self.names.resource_group.clone(),
                },
                PlannedCleanup {
                    target: GroupCleanupTarget::KeyPair,
                    name: self.names.key_pair.clone(),
                },
            ],
            dropped: classified.dropped().iter().cloned().collect(),
        })
    }

    async fn delete_member(&self, kind: ResourceKind, resource_id: &str) -> TeardownOutcome {
        let (api, policy) = (self.api, &self.policy);
        match kind {
            ResourceKind::Instance => operations::delete_instance(api, policy, resource_id).await,
            ResourceKind::SecurityGroup => {
                operations::delete_security_group(api, policy, resource_id).await
            }
            ResourceKind::NatGateway => {
                operations::delete_nat_gateway(api, policy, resource_id).await
            }
            ResourceKind::ElasticIp => operations::release_address(api, policy, resource_id).await,
            ResourceKind::InternetGateway => {
                operations::delete_internet_gateway(api, policy, resource_id).await
            }
            ResourceKind::Subnet => operations::delete_subnet(api, policy, resource_id).await,
            ResourceKind::RouteTable => {
                operations::delete_route_table(api, policy, resource_id).await
            }
            ResourceKind::Vpc => operations::delete_vpc(api, policy, resource_id).await,
        }
    }

    async fn release_elastic_ips(&self, report: &mut TeardownReport) {
        let kind = ResourceKind::ElasticIp;
        let addresses = match find_tagged_addresses(self.api, &self.names.elastic_ip).await {
            Ok(addresses) => addresses,
            Err(e) => {
                let outcome = TeardownOutcome::FailedFatal {
                    error: e.to_string(),
                };
                log_outcome(kind.as_str(), &self.names.elastic_ip, &outcome);
                report.record(kind, &self.names.elastic_ip, None, outcome);
                return;
            }
        };

        for address in addresses {
            let outcome = self.delete_member(kind, &address.allocation_id).await;
            log_outcome(kind.as_str(), &address.allocation_id, &outcome);
            report.record(kind, &address.allocation_id, None, outcome);
        }
    }
}

fn log_outcome(resource_type: &str, resource_id: &str, outcome: &TeardownOutcome) {
    match outcome {
        TeardownOutcome::Deleted => {
            info!(resource_type = %resource_type, resource_id = %resource_id, "Deleted")
        }
        TeardownOutcome::NotFound => {
            debug!(resource_type = %resource_type, resource_id = %resource_id, "Already deleted")
        }
        TeardownOutcome::SkippedAlreadyTerminal => {
            debug!(resource_type = %resource_type, resource_id = %resource_id, "Already terminal")
        }
        TeardownOutcome::FailedRetryable { attempts } => warn!(
            resource_type = %resource_type,
            resource_id = %resource_id,
            attempts,
            "Cleanup did not finish within the retry ceiling"
        ),
        TeardownOutcome::FailedFatal { error } => warn!(
            resource_type = %resource_type,
            resource_id = %resource_id,
            error = %error,
            "Cleanup failed"
        ),
    }
}
