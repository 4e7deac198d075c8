//! Per-run teardown report

use crate::aws::AccountId;
use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use groupsweep_common::ResourceKind;
use serde::Serialize;
use std::fmt;

/// Result of removing one resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TeardownOutcome {
    /// The resource was removed by this run
    Deleted,
    /// The resource was already gone
    NotFound,
    /// The resource was already in a terminal state; nothing was issued
    SkippedAlreadyTerminal,
    /// Still present after the attempt ceiling; a later run may succeed
    FailedRetryable { attempts: u32 },
    /// The provider rejected the removal
    FailedFatal { error: String },
}

impl TeardownOutcome {
    /// Whether the resource no longer exists as far as the run can tell.
    pub fn is_clean(&self) -> bool {
        matches!(
            self,
            TeardownOutcome::Deleted
                | TeardownOutcome::NotFound
                | TeardownOutcome::SkippedAlreadyTerminal
        )
    }

    pub fn is_failure(&self) -> bool {
        !self.is_clean()
    }

    pub fn label(&self) -> &'static str {
        match self {
            TeardownOutcome::Deleted => "deleted",
            TeardownOutcome::NotFound => "not found",
            TeardownOutcome::SkippedAlreadyTerminal => "already terminal",
            TeardownOutcome::FailedRetryable { .. } => "failed (retryable)",
            TeardownOutcome::FailedFatal { .. } => "failed",
        }
    }

    fn color(&self) -> Color {
        match self {
            TeardownOutcome::Deleted => Color::Green,
            TeardownOutcome::NotFound | TeardownOutcome::SkippedAlreadyTerminal => Color::Grey,
            TeardownOutcome::FailedRetryable { .. } => Color::Yellow,
            TeardownOutcome::FailedFatal { .. } => Color::Red,
        }
    }

    fn detail(&self) -> String {
        match self {
            TeardownOutcome::FailedRetryable { attempts } => format!("{attempts} attempts"),
            TeardownOutcome::FailedFatal { error } => error.clone(),
            _ => String::new(),
        }
    }
}

impl fmt::Display for TeardownOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeardownOutcome::FailedRetryable { .. } | TeardownOutcome::FailedFatal { .. } => {
                write!(f, "{}: {}", self.label(), self.detail())
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// One group member and what happened to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub kind: ResourceKind,
    pub resource_id: String,
    /// Absent for elastic IPs, which are found by tag rather than membership
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_arn: Option<String>,
    #[serde(flatten)]
    pub outcome: TeardownOutcome,
}

/// Group-level objects removed after the members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupCleanupTarget {
    ResourceGroup,
    KeyPair,
}

impl GroupCleanupTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupCleanupTarget::ResourceGroup => "ResourceGroup",
            GroupCleanupTarget::KeyPair => "KeyPair",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCleanupEntry {
    pub target: GroupCleanupTarget,
    pub name: String,
    #[serde(flatten)]
    pub outcome: TeardownOutcome,
}

/// Outcome counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub deleted: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Every outcome of one teardown run
#[derive(Debug, Clone, Serialize)]
pub struct TeardownReport {
    pub module: String,
    pub resource_group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Whether the resource group existed when the run started
    pub group_found: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub entries: Vec<ReportEntry>,
    pub group_cleanup: Vec<GroupCleanupEntry>,
    /// Members skipped because their kind is not managed
    pub dropped: usize,
}

impl TeardownReport {
    pub fn new(module: &str, resource_group: &str) -> Self {
        Self {
            module: module.to_string(),
            resource_group: resource_group.to_string(),
            region: None,
            account_id: None,
            group_found: false,
            started_at: Utc::now(),
            finished_at: None,
            entries: Vec::new(),
            group_cleanup: Vec::new(),
            dropped: 0,
        }
    }

    /// Attach the session the run executed in
    pub fn with_session(mut self, region: &str, account_id: Option<AccountId>) -> Self {
        self.region = Some(region.to_string());
        self.account_id = account_id;
        self
    }

    pub fn record(
        &mut self,
        kind: ResourceKind,
        resource_id: &str,
        resource_arn: Option<&str>,
        outcome: TeardownOutcome,
    ) {
        self.entries.push(ReportEntry {
            kind,
            resource_id: resource_id.to_string(),
            resource_arn: resource_arn.map(str::to_string),
            outcome,
        });
    }

    pub fn record_group_cleanup(
        &mut self,
        target: GroupCleanupTarget,
        name: &str,
        outcome: TeardownOutcome,
    ) {
        self.group_cleanup.push(GroupCleanupEntry {
            target,
            name: name.to_string(),
            outcome,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    fn outcomes(&self) -> impl Iterator<Item = &TeardownOutcome> {
        self.entries
            .iter()
            .map(|e| &e.outcome)
            .chain(self.group_cleanup.iter().map(|e| &e.outcome))
    }

    /// True when every member and group-level object ended clean
    pub fn is_clean(&self) -> bool {
        self.outcomes().all(TeardownOutcome::is_clean)
    }

    /// Members that did not end clean
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.outcome.is_failure())
    }

    pub fn entries_for(&self, kind: ResourceKind) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }

    pub fn summary(&self) -> ReportSummary {
        self.outcomes()
            .fold(ReportSummary::default(), |mut summary, outcome| {
                match outcome {
                    TeardownOutcome::Deleted => summary.deleted += 1,
                    TeardownOutcome::NotFound => summary.not_found += 1,
                    TeardownOutcome::SkippedAlreadyTerminal => summary.skipped += 1,
                    TeardownOutcome::FailedRetryable { .. }
                    | TeardownOutcome::FailedFatal { .. } => summary.failed += 1,
                }
                summary
            })
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Type"),
                Cell::new("ID"),
                Cell::new("Outcome"),
                Cell::new("Detail"),
            ]);

        for entry in &self.entries {
            table.add_row(vec![
                Cell::new(entry.kind.as_str()),
                Cell::new(&entry.resource_id),
                Cell::new(entry.outcome.label()).fg(entry.outcome.color()),
                Cell::new(entry.outcome.detail()),
            ]);
        }
        for entry in &self.group_cleanup {
            table.add_row(vec![
                Cell::new(entry.target.as_str()),
                Cell::new(&entry.name),
                Cell::new(entry.outcome.label()).fg(entry.outcome.color()),
                Cell::new(entry.outcome.detail()),
            ]);
        }

        table
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
