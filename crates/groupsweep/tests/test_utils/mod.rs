//! Shared test utilities for integration tests
//!
//! `FakeCloud` is an in-memory provider with just enough lifecycle to drive
//! the teardown end to end: instances and NAT gateways take one describe to
//! settle, deletes enforce the dependencies the real provider enforces, and
//! every call is logged so tests can check ordering.

#![allow(dead_code)]

use aws_sdk_ec2::types::{InstanceStateName, NatGatewayState};
use groupsweep::aws::{CloudApi, ElasticAddress, ProviderError};
use groupsweep_common::ResourceIdentifier;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

pub const REGION: &str = "eu-central-1";
pub const ACCOUNT: &str = "123456789012";

/// Build a group member identifier the way the grouping service reports it
pub fn member(type_segment: &str, arn_type: &str, id: &str) -> ResourceIdentifier {
    ResourceIdentifier::new(
        format!("AWS::EC2::{type_segment}"),
        format!("arn:aws:ec2:{REGION}:{ACCOUNT}:{arn_type}/{id}"),
    )
}

fn not_found(code: &str, id: &str) -> ProviderError {
    ProviderError::new(code, format!("The ID '{id}' does not exist"))
}

#[derive(Default)]
struct State {
    groups: BTreeMap<String, Vec<ResourceIdentifier>>,
    instances: BTreeMap<String, InstanceStateName>,
    nat_gateways: BTreeMap<String, NatGatewayState>,
    internet_gateways: BTreeMap<String, Vec<String>>,
    security_groups: BTreeSet<String>,
    route_tables: BTreeSet<String>,
    subnets: BTreeSet<String>,
    vpcs: BTreeSet<String>,
    addresses: Vec<ElasticAddress>,
    key_pairs: BTreeSet<String>,
    /// Injected errors for mutating calls, by resource ID or name
    failures: BTreeMap<String, ProviderError>,
}

impl State {
    fn injected(&self, id: &str) -> Result<(), ProviderError> {
        match self.failures.get(id) {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    fn instances_running(&self) -> bool {
        self.instances
            .values()
            .any(|s| *s != InstanceStateName::Terminated)
    }

    fn nat_gateways_active(&self) -> bool {
        self.nat_gateways
            .values()
            .any(|s| *s != NatGatewayState::Deleted)
    }
}

/// In-memory provider
#[derive(Default)]
pub struct FakeCloud {
    state: Mutex<State>,
    calls: Mutex<Vec<String>>,
}

impl FakeCloud {
    pub fn new() -> Self {
        Self::default()
    }

    /// The module's group with its members, plus the module's key pair
    pub fn with_group(self, group: &str, members: Vec<ResourceIdentifier>) -> Self {
        self.state
            .lock()
            .unwrap()
            .groups
            .insert(group.to_string(), members);
        self
    }

    pub fn with_instance(self, id: &str, state: InstanceStateName) -> Self {
        self.state
            .lock()
            .unwrap()
            .instances
            .insert(id.to_string(), state);
        self
    }

    pub fn with_nat_gateway(self, id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .nat_gateways
            .insert(id.to_string(), NatGatewayState::Available);
        self
    }

    pub fn with_internet_gateway(self, id: &str, attached_to: &[&str]) -> Self {
        self.state.lock().unwrap().internet_gateways.insert(
            id.to_string(),
            attached_to.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn with_security_group(self, id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .security_groups
            .insert(id.to_string());
        self
    }

    pub fn with_route_table(self, id: &str) -> Self {
        self.state.lock().unwrap().route_tables.insert(id.to_string());
        self
    }

    pub fn with_subnet(self, id: &str) -> Self {
        self.state.lock().unwrap().subnets.insert(id.to_string());
        self
    }

    pub fn with_vpc(self, id: &str) -> Self {
        self.state.lock().unwrap().vpcs.insert(id.to_string());
        self
    }

    pub fn with_address(self, address: ElasticAddress) -> Self {
        self.state.lock().unwrap().addresses.push(address);
        self
    }

    pub fn with_key_pair(self, name: &str) -> Self {
        self.state.lock().unwrap().key_pairs.insert(name.to_string());
        self
    }

    /// Make every mutating call on `id` fail with `code`
    pub fn failing(self, id: &str, code: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(id.to_string(), ProviderError::new(code, "injected failure"));
        self
    }

    /// Every call made so far, as `operation:target`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Index of the first call matching `operation:target`
    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| !c.starts_with("describe") && !c.starts_with("list") && !c.starts_with("key_pair_exists"))
            .collect()
    }

    pub fn instance_state(&self, id: &str) -> Option<InstanceStateName> {
        self.state.lock().unwrap().instances.get(id).cloned()
    }

    pub fn vpc_exists(&self, id: &str) -> bool {
        self.state.lock().unwrap().vpcs.contains(id)
    }

    pub fn remaining_addresses(&self) -> usize {
        self.state.lock().unwrap().addresses.len()
    }

    fn log(&self, operation: &str, target: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{operation}:{target}"));
    }
}

impl CloudApi for FakeCloud {
    async fn list_group_resources(
        &self,
        group_name: &str,
    ) -> Result<Vec<ResourceIdentifier>, ProviderError> {
        self.log("list_group_resources", group_name);
        self.state
            .lock()
            .unwrap()
            .groups
            .get(group_name)
            .cloned()
            .ok_or_else(|| ProviderError::new("NotFoundException", "Cannot find group"))
    }

    async fn delete_group(&self, group_name: &str) -> Result<(), ProviderError> {
        self.log("delete_group", group_name);
        let mut state = self.state.lock().unwrap();
        state.injected(group_name)?;
        state
            .groups
            .remove(group_name)
            .map(|_| ())
            .ok_or_else(|| ProviderError::new("NotFoundException", "Cannot find group"))
    }

    async fn describe_instance(
        &self,
        instance_id: &str,
    ) -> Result<Option<InstanceStateName>, ProviderError> {
        self.log("describe_instance", instance_id);
        let mut state = self.state.lock().unwrap();
        let current = state
            .instances
            .get_mut(instance_id)
            .ok_or_else(|| not_found("InvalidInstanceID.NotFound", instance_id))?;
        let observed = current.clone();
        if *current == InstanceStateName::ShuttingDown {
            *current = InstanceStateName::Terminated;
        }
        Ok(Some(observed))
    }

    async fn terminate_instance(&self, instance_id: &str) -> Result<(), ProviderError> {
        self.log("terminate_instance", instance_id);
        let mut state = self.state.lock().unwrap();
        state.injected(instance_id)?;
        let current = state
            .instances
            .get_mut(instance_id)
            .ok_or_else(|| not_found("InvalidInstanceID.NotFound", instance_id))?;
        if *current != InstanceStateName::Terminated {
            *current = InstanceStateName::ShuttingDown;
        }
        Ok(())
    }

    async fn describe_nat_gateway(
        &self,
        nat_gateway_id: &str,
    ) -> Result<Option<NatGatewayState>, ProviderError> {
        self.log("describe_nat_gateway", nat_gateway_id);
        let mut state = self.state.lock().unwrap();
        let current = state
            .nat_gateways
            .get_mut(nat_gateway_id)
            .ok_or_else(|| not_found("NatGatewayNotFound", nat_gateway_id))?;
        let observed = current.clone();
        if *current == NatGatewayState::Deleting {
            *current = NatGatewayState::Deleted;
        }
        Ok(Some(observed))
    }

    async fn delete_nat_gateway(&self, nat_gateway_id: &str) -> Result<(), ProviderError> {
        self.log("delete_nat_gateway", nat_gateway_id);
        let mut state = self.state.lock().unwrap();
        state.injected(nat_gateway_id)?;
        let current = state
            .nat_gateways
            .get_mut(nat_gateway_id)
            .ok_or_else(|| not_found("NatGatewayNotFound", nat_gateway_id))?;
        if *current != NatGatewayState::Deleted {
            *current = NatGatewayState::Deleting;
        }
        Ok(())
    }

    async fn describe_internet_gateway(
        &self,
        internet_gateway_id: &str,
    ) -> Result<Option<Vec<String>>, ProviderError> {
        self.log("describe_internet_gateway", internet_gateway_id);
        self.state
            .lock()
            .unwrap()
            .internet_gateways
            .get(internet_gateway_id)
            .cloned()
            .map(Some)
            .ok_or_else(|| not_found("InvalidInternetGatewayID.NotFound", internet_gateway_id))
    }

    async fn detach_internet_gateway(
        &self,
        internet_gateway_id: &str,
        vpc_id: &str,
    ) -> Result<(), ProviderError> {
        self.log("detach_internet_gateway", internet_gateway_id);
        let mut state = self.state.lock().unwrap();
        state.injected(internet_gateway_id)?;
        let attachments = state
            .internet_gateways
            .get_mut(internet_gateway_id)
            .ok_or_else(|| not_found("InvalidInternetGatewayID.NotFound", internet_gateway_id))?;
        let before = attachments.len();
        attachments.retain(|v| v != vpc_id);
        if attachments.len() == before {
            return Err(ProviderError::new("Gateway.NotAttached", "not attached"));
        }
        Ok(())
    }

    async fn delete_internet_gateway(
        &self,
        internet_gateway_id: &str,
    ) -> Result<(), ProviderError> {
        self.log("delete_internet_gateway", internet_gateway_id);
        let mut state = self.state.lock().unwrap();
        state.injected(internet_gateway_id)?;
        match state.internet_gateways.get(internet_gateway_id) {
            None => Err(not_found("InvalidInternetGatewayID.NotFound", internet_gateway_id)),
            Some(attachments) if !attachments.is_empty() => Err(ProviderError::new(
                "DependencyViolation",
                "The internetGateway has dependencies and cannot be deleted",
            )),
            Some(_) => {
                state.internet_gateways.remove(internet_gateway_id);
                Ok(())
            }
        }
    }

    async fn delete_security_group(&self, group_id: &str) -> Result<(), ProviderError> {
        self.log("delete_security_group", group_id);
        let mut state = self.state.lock().unwrap();
        state.injected(group_id)?;
        if !state.security_groups.contains(group_id) {
            return Err(not_found("InvalidGroup.NotFound", group_id));
        }
        if state.instances_running() {
            return Err(ProviderError::new(
                "DependencyViolation",
                "resource has a dependent object",
            ));
        }
        state.security_groups.remove(group_id);
        Ok(())
    }

    async fn delete_route_table(&self, route_table_id: &str) -> Result<(), ProviderError> {
        self.log("delete_route_table", route_table_id);
        let mut state = self.state.lock().unwrap();
        state.injected(route_table_id)?;
        if !state.route_tables.remove(route_table_id) {
            return Err(not_found("InvalidRouteTableID.NotFound", route_table_id));
        }
        Ok(())
    }

    async fn delete_subnet(&self, subnet_id: &str) -> Result<(), ProviderError> {
        self.log("delete_subnet", subnet_id);
        let mut state = self.state.lock().unwrap();
        state.injected(subnet_id)?;
        if !state.subnets.contains(subnet_id) {
            return Err(not_found("InvalidSubnetID.NotFound", subnet_id));
        }
        if state.instances_running() || state.nat_gateways_active() {
            return Err(ProviderError::new(
                "DependencyViolation",
                "The subnet has dependencies and cannot be deleted",
            ));
        }
        state.subnets.remove(subnet_id);
        Ok(())
    }

    async fn delete_vpc(&self, vpc_id: &str) -> Result<(), ProviderError> {
        self.log("delete_vpc", vpc_id);
        let mut state = self.state.lock().unwrap();
        state.injected(vpc_id)?;
        if !state.vpcs.contains(vpc_id) {
            return Err(not_found("InvalidVpcID.NotFound", vpc_id));
        }
        let attached_gateway = state
            .internet_gateways
            .values()
            .any(|vpcs| vpcs.iter().any(|v| v == vpc_id));
        if !state.subnets.is_empty() || !state.route_tables.is_empty() || attached_gateway {
            return Err(ProviderError::new(
                "DependencyViolation",
                "The vpc has dependencies and cannot be deleted",
            ));
        }
        state.vpcs.remove(vpc_id);
        Ok(())
    }

    async fn describe_addresses(&self) -> Result<Vec<ElasticAddress>, ProviderError> {
        self.log("describe_addresses", "*");
        Ok(self.state.lock().unwrap().addresses.clone())
    }

    async fn release_address(&self, allocation_id: &str) -> Result<(), ProviderError> {
        self.log("release_address", allocation_id);
        let mut state = self.state.lock().unwrap();
        state.injected(allocation_id)?;
        if state.nat_gateways_active() {
            return Err(ProviderError::new(
                "AuthFailure",
                "You do not have permission to access the specified resource",
            ));
        }
        let before = state.addresses.len();
        state.addresses.retain(|a| a.allocation_id != allocation_id);
        if state.addresses.len() == before {
            return Err(not_found("InvalidAllocationID.NotFound", allocation_id));
        }
        Ok(())
    }

    async fn key_pair_exists(&self, key_name: &str) -> Result<bool, ProviderError> {
        self.log("key_pair_exists", key_name);
        Ok(self.state.lock().unwrap().key_pairs.contains(key_name))
    }

    async fn delete_key_pair(&self, key_name: &str) -> Result<(), ProviderError> {
        self.log("delete_key_pair", key_name);
        let mut state = self.state.lock().unwrap();
        state.injected(key_name)?;
        state.key_pairs.remove(key_name);
        Ok(())
    }
}
