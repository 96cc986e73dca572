//! Action types for license changes

use crate::model::{Inventory, LicenseKey, LicenseRecord};
use crate::reconcile::Diff;
use serde::Serialize;

/// Represents a planned change to the licenses of one key
#[derive(Debug, Clone, Serialize)]
pub struct Action {
    /// Unique identifier for the action
    pub id: String,

    /// Type of action to perform
    pub action_type: ActionType,

    /// (region, type) the action applies to
    #[serde(flatten)]
    pub key: LicenseKey,

    /// Number of licenses to create or delete
    pub quantity: u64,

    /// Licenses chosen for deletion (empty for creates)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub license_ids: Vec<String>,
}

/// Type of action to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Create new licenses
    Create,
    /// Delete existing licenses
    Delete,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Delete => write!(f, "delete"),
        }
    }
}

/// Plan containing all actions to be applied
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Target project
    pub project_id: String,

    /// List of actions to perform
    pub actions: Vec<Action>,
}

impl Plan {
    /// Turn a diff into concrete actions
    ///
    /// Creates come before deletes. The licenses to delete are picked from
    /// `inventory` with [`Inventory::select_for_deletion`].
    pub fn build(project_id: impl Into<String>, diff: &Diff, inventory: &Inventory) -> Self {
        let mut actions = Vec::new();

        for (key, quantity) in &diff.to_add {
            actions.push(Action {
                id: format!("create-{}", key),
                action_type: ActionType::Create,
                key: key.clone(),
                quantity: *quantity,
                license_ids: Vec::new(),
            });
        }

        for (key, quantity) in &diff.to_delete {
            let license_ids = inventory
                .select_for_deletion(key, *quantity)
                .into_iter()
                .map(|record| record.id.clone())
                .collect();
            actions.push(Action {
                id: format!("delete-{}", key),
                action_type: ActionType::Delete,
                key: key.clone(),
                quantity: *quantity,
                license_ids,
            });
        }

        Self {
            project_id: project_id.into(),
            actions,
        }
    }

    /// Get actions by type
    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    /// Summary of the plan
    pub fn summary(&self) -> PlanSummary {
        let total = |action_type: ActionType| -> u64 {
            self.actions_by_type(action_type)
                .iter()
                .map(|a| a.quantity)
                .sum()
        };
        PlanSummary {
            create: total(ActionType::Create),
            delete: total(ActionType::Delete),
        }
    }
}

/// Summary of planned license counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub create: u64,
    pub delete: u64,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to create, {} to delete", self.create, self.delete)
    }
}

/// Result of applying a plan
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyResult {
    /// Licenses returned by create calls
    pub created: Vec<LicenseRecord>,

    /// Ids of deleted licenses
    pub deleted: Vec<String>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ApplyResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_created(&mut self, records: Vec<LicenseRecord>) {
        self.created.extend(records);
    }

    pub fn add_deleted(&mut self, license_id: String) {
        self.deleted.push(license_id);
    }
}
