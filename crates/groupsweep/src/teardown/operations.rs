//! Removal of one resource of each managed kind
//!
//! Each function issues the provider calls for one resource, including the
//! pre-steps (detach) and post-steps (wait for a terminal state), and folds
//! whatever happened into a [`TeardownOutcome`]. None of them returns an
//! error: a failed resource is recorded and the run moves on.

use crate::aws::error::{ErrorClass, NOT_ATTACHED_CODE, ProviderError, classify_dependent_delete};
use crate::aws::{CloudApi, ElasticAddress};
use crate::report::TeardownOutcome;
use crate::wait::{PollOutcome, RetryOutcome, RetryPolicy, poll_until_terminal, retry_transient};
use aws_sdk_ec2::types::{InstanceStateName, NatGatewayState};
use tracing::{debug, info, warn};

fn provider_class(error: &ProviderError) -> ErrorClass {
    error.class()
}

fn fatal(error: &ProviderError) -> TeardownOutcome {
    TeardownOutcome::FailedFatal {
        error: error.to_string(),
    }
}

impl From<RetryOutcome> for TeardownOutcome {
    fn from(outcome: RetryOutcome) -> Self {
        match outcome {
            RetryOutcome::Succeeded { .. } => TeardownOutcome::Deleted,
            RetryOutcome::NotFound { .. } => TeardownOutcome::NotFound,
            RetryOutcome::Exhausted { attempts, .. } => {
                TeardownOutcome::FailedRetryable { attempts }
            }
            RetryOutcome::Failed { error, .. } => fatal(&error),
        }
    }
}

/// Terminate an instance and wait until it reports `terminated`.
pub async fn delete_instance<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    instance_id: &str,
) -> TeardownOutcome {
    match api.describe_instance(instance_id).await {
        Ok(None) => return TeardownOutcome::NotFound,
        Ok(Some(InstanceStateName::Terminated)) => {
            debug!(instance_id = %instance_id, "Instance already terminated");
            return TeardownOutcome::SkippedAlreadyTerminal;
        }
        Ok(Some(_)) => {}
        Err(e) if e.is_not_found() => return TeardownOutcome::NotFound,
        Err(e) => return fatal(&e),
    }

    if let Err(e) = api.terminate_instance(instance_id).await {
        return if e.is_not_found() {
            TeardownOutcome::NotFound
        } else {
            fatal(&e)
        };
    }

    let poll = poll_until_terminal(
        policy,
        instance_id,
        || api.describe_instance(instance_id),
        |state| *state == InstanceStateName::Terminated,
        provider_class,
    )
    .await;

    match poll {
        PollOutcome::Reached { .. } | PollOutcome::Gone { .. } => TeardownOutcome::Deleted,
        PollOutcome::Exhausted { attempts, .. } => TeardownOutcome::FailedRetryable { attempts },
        PollOutcome::Failed { error, .. } => fatal(&error),
    }
}

/// Delete a NAT gateway and wait for the deletion to settle.
///
/// A gateway that is already missing is left alone: no delete, no wait.
pub async fn delete_nat_gateway<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    nat_gateway_id: &str,
) -> TeardownOutcome {
    match api.describe_nat_gateway(nat_gateway_id).await {
        Ok(None) => return TeardownOutcome::NotFound,
        Ok(Some(NatGatewayState::Deleted)) => {
            debug!(nat_gateway_id = %nat_gateway_id, "NAT gateway already deleted");
            return TeardownOutcome::SkippedAlreadyTerminal;
        }
        Ok(Some(_)) => {}
        Err(e) if e.is_not_found() => return TeardownOutcome::NotFound,
        Err(e) => return fatal(&e),
    }

    if let Err(e) = api.delete_nat_gateway(nat_gateway_id).await {
        return if e.is_not_found() {
            TeardownOutcome::NotFound
        } else {
            fatal(&e)
        };
    }

    let poll = poll_until_terminal(
        policy,
        nat_gateway_id,
        || api.describe_nat_gateway(nat_gateway_id),
        |state| matches!(state, NatGatewayState::Deleted | NatGatewayState::Failed),
        provider_class,
    )
    .await;

    match poll {
        PollOutcome::Reached { state, .. } => {
            debug!(nat_gateway_id = %nat_gateway_id, state = ?state, "NAT gateway settled");
            TeardownOutcome::Deleted
        }
        PollOutcome::Gone { .. } => TeardownOutcome::Deleted,
        PollOutcome::Exhausted { attempts, .. } => TeardownOutcome::FailedRetryable { attempts },
        PollOutcome::Failed { error, .. } => fatal(&error),
    }
}

/// Detach an internet gateway from every VPC it is attached to, then delete
/// it. Delete is never attempted after a failed detach.
pub async fn delete_internet_gateway<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    internet_gateway_id: &str,
) -> TeardownOutcome {
    let attachments = match api.describe_internet_gateway(internet_gateway_id).await {
        Ok(Some(vpcs)) => vpcs,
        Ok(None) => return TeardownOutcome::NotFound,
        Err(e) if e.is_not_found() => return TeardownOutcome::NotFound,
        Err(e) => return fatal(&e),
    };

    for vpc_id in &attachments {
        match api.detach_internet_gateway(internet_gateway_id, vpc_id).await {
            Ok(()) => {}
            Err(e) if e.code() == Some(NOT_ATTACHED_CODE) => {
                debug!(internet_gateway_id = %internet_gateway_id, vpc_id = %vpc_id, "Already detached");
            }
            Err(e) if e.is_not_found() => return TeardownOutcome::NotFound,
            Err(e) => {
                warn!(
                    internet_gateway_id = %internet_gateway_id,
                    vpc_id = %vpc_id,
                    error = %e,
                    "Detach failed, not deleting"
                );
                return fatal(&e);
            }
        }
    }

    retry_transient(
        policy,
        internet_gateway_id,
        || api.delete_internet_gateway(internet_gateway_id),
        classify_dependent_delete,
    )
    .await
    .into()
}

pub async fn delete_security_group<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    group_id: &str,
) -> TeardownOutcome {
    retry_transient(
        policy,
        group_id,
        || api.delete_security_group(group_id),
        classify_dependent_delete,
    )
    .await
    .into()
}

pub async fn delete_route_table<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    route_table_id: &str,
) -> TeardownOutcome {
    retry_transient(
        policy,
        route_table_id,
        || api.delete_route_table(route_table_id),
        classify_dependent_delete,
    )
    .await
    .into()
}

pub async fn delete_subnet<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    subnet_id: &str,
) -> TeardownOutcome {
    retry_transient(
        policy,
        subnet_id,
        || api.delete_subnet(subnet_id),
        classify_dependent_delete,
    )
    .await
    .into()
}

/// Delete a VPC. A delete still rejected after every attempt is recorded as
/// retryable rather than fatal. The group is removed afterwards, so a later
/// run will not find this VPC again; it needs manual removal.
pub async fn delete_vpc<C: CloudApi>(api: &C, policy: &RetryPolicy, vpc_id: &str) -> TeardownOutcome {
    let outcome = retry_transient(
        policy,
        vpc_id,
        || api.delete_vpc(vpc_id),
        classify_dependent_delete,
    )
    .await;

    match outcome {
        RetryOutcome::Failed { attempts, error } => {
            warn!(vpc_id = %vpc_id, error = %error, "Failed to delete VPC");
            TeardownOutcome::FailedRetryable { attempts }
        }
        other => other.into(),
    }
}

/// Addresses carrying `tag_value` under any tag key.
pub async fn find_tagged_addresses<C: CloudApi>(
    api: &C,
    tag_value: &str,
) -> Result<Vec<ElasticAddress>, ProviderError> {
    let addresses: Vec<ElasticAddress> = api
        .describe_addresses()
        .await?
        .into_iter()
        .filter(|address| address.has_tag_value(tag_value))
        .collect();

    debug!(tag_value = %tag_value, matched = addresses.len(), "Scanned elastic IPs");
    Ok(addresses)
}

/// Release an elastic IP, retrying while the provider reports `AuthFailure`
/// (or throttling) for an address whose NAT gateway is still letting go.
pub async fn release_address<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    allocation_id: &str,
) -> TeardownOutcome {
    retry_transient(
        policy,
        allocation_id,
        || api.release_address(allocation_id),
        provider_class,
    )
    .await
    .into()
}

/// Delete a key pair by name.
///
/// The provider accepts deletes for names that do not exist, so existence
/// is checked first to report `NotFound` accurately.
pub async fn delete_key_pair<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    key_name: &str,
) -> TeardownOutcome {
    match api.key_pair_exists(key_name).await {
        Ok(true) => {}
        Ok(false) => return TeardownOutcome::NotFound,
        Err(e) => return fatal(&e),
    }

    retry_transient(
        policy,
        key_name,
        || api.delete_key_pair(key_name),
        provider_class,
    )
    .await
    .into()
}

/// Delete the resource group itself. Members are not affected.
pub async fn delete_resource_group<C: CloudApi>(
    api: &C,
    policy: &RetryPolicy,
    group_name: &str,
) -> TeardownOutcome {
    let outcome: TeardownOutcome =
        retry_transient(policy, group_name, || api.delete_group(group_name), provider_class)
            .await
            .into();

    if outcome == TeardownOutcome::Deleted {
        info!(group = %group_name, "Resource group deleted");
    }
    outcome
}
