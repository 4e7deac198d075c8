//! Dry-run view of a teardown

use crate::report::GroupCleanupTarget;
use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use groupsweep_common::{ResourceIdentifier, ResourceKind};
use serde::Serialize;

/// One removal the teardown would attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    pub kind: ResourceKind,
    pub resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCleanup {
    pub target: GroupCleanupTarget,
    pub name: String,
}

/// Everything a teardown would touch, in the order it would touch it
#[derive(Debug, Clone, Serialize)]
pub struct TeardownPlan {
    pub module: String,
    pub resource_group: String,
    pub group_found: bool,
    pub steps: Vec<PlannedStep>,
    pub group_cleanup: Vec<PlannedCleanup>,
    /// Members that would be left alone
    pub dropped: Vec<ResourceIdentifier>,
}

impl TeardownPlan {
    pub fn steps_for(&self, kind: ResourceKind) -> impl Iterator<Item = &PlannedStep> {
        self.steps.iter().filter(move |s| s.kind == kind)
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("#"),
                Cell::new("Type"),
                Cell::new("ID"),
                Cell::new("ARN"),
            ]);

        let group_rows = self
            .group_cleanup
            .iter()
            .map(|c| (c.target.as_str(), c.name.as_str(), None));
        let rows = self
            .steps
            .iter()
            .map(|s| (s.kind.as_str(), s.resource_id.as_str(), s.resource_arn.as_deref()))
            .chain(group_rows);

        for (i, (kind, id, arn)) in rows.enumerate() {
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(kind),
                Cell::new(id),
                Cell::new(arn.unwrap_or("-")),
            ]);
        }

        table
    }

    /// Table of the members that would be skipped, if any
    pub fn dropped_table(&self) -> Option<Table> {
        if self.dropped.is_empty() {
            return None;
        }
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![Cell::new("Unmanaged type"), Cell::new("ARN")]);
        for id in &self.dropped {
            table.add_row(vec![Cell::new(id.resource_type()), Cell::new(id.resource_arn())]);
        }
        Some(table)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
