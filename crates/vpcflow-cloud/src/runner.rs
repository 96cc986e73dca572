//! Invocation dispatch
//!
//! Turns one [`Invocation`] into gateway calls and an [`Outcome`]. Every call
//! is awaited in sequence; a failure part way through a multi-key apply is
//! not rolled back.

use crate::action::{Action, ActionType, ApplyResult, Plan};
use crate::error::{LicenseError, Result};
use crate::gateway::LicenseGateway;
use crate::model::{
    Inventory, LicenseRecord, LicenseRequirement, desired_counts, validate_requirements,
};
use crate::reconcile::{Diff, Reconciler};
use serde::{Deserialize, Serialize};

/// Desired state of the targeted resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    #[default]
    Present,
    Absent,
}

/// Whether gateway mutations are allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Apply,
    /// Compute `changed` without mutating anything
    Check,
}

/// Parameters of a single run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invocation {
    pub state: State,
    pub list: bool,
    pub project_id: Option<String>,
    pub project_name: Option<String>,
    pub licenses: Option<Vec<LicenseRequirement>>,
    pub license_id: Option<String>,
    pub detailed: bool,
    pub force: bool,
}

impl Invocation {
    fn has_project(&self) -> bool {
        self.project_id.is_some() || self.project_name.is_some()
    }
}

/// Result of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct Outcome {
    pub changed: bool,

    /// Resulting (or queried) licenses
    pub licenses: Vec<LicenseRecord>,

    /// Reconciliation diff, present for desired-state runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<Diff>,

    /// What was actually done, present for applied desired-state runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<ApplyResult>,
}

impl Outcome {
    fn unchanged(licenses: Vec<LicenseRecord>) -> Self {
        Self {
            changed: false,
            licenses,
            ..Default::default()
        }
    }
}

/// Runs invocations against a gateway
pub struct LicenseRunner<'a, G: LicenseGateway + ?Sized> {
    gateway: &'a G,
}

impl<'a, G: LicenseGateway + ?Sized> LicenseRunner<'a, G> {
    pub fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, invocation: &Invocation, mode: Mode) -> Result<Outcome> {
        if let Some(licenses) = &invocation.licenses {
            validate_requirements(licenses)?;
        }
        tracing::debug!("Running {:?} against {}", mode, self.gateway.name());

        match invocation.state {
            State::Absent => match &invocation.license_id {
                Some(license_id) => self.delete(license_id, mode).await,
                None => Err(LicenseError::MissingParameters),
            },
            State::Present => {
                if let Some(licenses) = &invocation.licenses {
                    if invocation.has_project() {
                        return self.reconcile(invocation, licenses, mode).await;
                    }
                }

                if invocation.list {
                    let licenses = self.gateway.list_licenses(None, invocation.detailed).await?;
                    return Ok(Outcome::unchanged(licenses));
                }

                if let Some(license_id) = &invocation.license_id {
                    let license = self
                        .gateway
                        .show_license(license_id, invocation.detailed)
                        .await?;
                    return Ok(Outcome::unchanged(vec![license]));
                }

                Err(LicenseError::MissingParameters)
            }
        }
    }

    /// Delete one license by id; an absent license is not an error
    async fn delete(&self, license_id: &str, mode: Mode) -> Result<Outcome> {
        if mode == Mode::Check {
            let exists = match self.gateway.show_license(license_id, false).await {
                Ok(_) => true,
                Err(LicenseError::NotFound(_)) => false,
                Err(e) => return Err(e),
            };
            return Ok(Outcome {
                changed: exists,
                ..Default::default()
            });
        }

        match self.gateway.delete_license(license_id).await {
            Ok(()) => {
                tracing::info!("Deleted license {}", license_id);
                Ok(Outcome {
                    changed: true,
                    applied: Some(ApplyResult {
                        deleted: vec![license_id.to_string()],
                        ..Default::default()
                    }),
                    ..Default::default()
                })
            }
            Err(LicenseError::NotFound(_)) => {
                tracing::debug!("License {} already absent", license_id);
                Ok(Outcome::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn resolve_project(&self, invocation: &Invocation) -> Result<String> {
        if let Some(project_id) = &invocation.project_id {
            return Ok(project_id.clone());
        }
        match &invocation.project_name {
            Some(name) => self.gateway.resolve_project_by_name(name).await,
            None => Err(LicenseError::MissingParameters),
        }
    }

    async fn inventory(&self, project_id: &str, detailed: bool) -> Result<Inventory> {
        let records = self.gateway.list_licenses(Some(project_id), detailed).await?;
        let inventory = Inventory::for_project(project_id, records);
        tracing::debug!("Project {} holds {} license(s)", project_id, inventory.len());
        Ok(inventory)
    }

    async fn reconcile(
        &self,
        invocation: &Invocation,
        licenses: &[LicenseRequirement],
        mode: Mode,
    ) -> Result<Outcome> {
        let desired = desired_counts(licenses)?;
        let project_id = self.resolve_project(invocation).await?;
        let inventory = self.inventory(&project_id, invocation.detailed).await?;

        let diff = Reconciler::new(invocation.force).reconcile(&inventory, &desired)?;
        let changed = !diff.is_empty();

        if mode == Mode::Check || !changed {
            let licenses = inventory
                .keys()
                .flat_map(|key| inventory.records(key).iter().cloned())
                .collect();
            return Ok(Outcome {
                changed,
                licenses,
                diff: Some(diff),
                applied: None,
            });
        }

        let plan = Plan::build(&project_id, &diff, &inventory);
        tracing::info!("Applying plan for project {}: {}", project_id, plan.summary());
        let applied = self.apply(&plan).await?;

        let licenses = self
            .gateway
            .list_licenses(Some(&project_id), invocation.detailed)
            .await?;

        Ok(Outcome {
            changed,
            licenses,
            diff: Some(diff),
            applied: Some(applied),
        })
    }

    /// Apply actions in order, stopping at the first failure
    async fn apply(&self, plan: &Plan) -> Result<ApplyResult> {
        let mut result = ApplyResult::new();
        let start = std::time::Instant::now();

        for action in &plan.actions {
            if let Err(e) = self.apply_action(&plan.project_id, action, &mut result).await {
                let created: Vec<&str> = result.created.iter().map(|r| r.id.as_str()).collect();
                tracing::warn!(
                    "Stopped at {} after creating [{}] and deleting [{}]: {}",
                    action.id,
                    created.join(", "),
                    result.deleted.join(", "),
                    e
                );
                return Err(e);
            }
        }

        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    async fn apply_action(
        &self,
        project_id: &str,
        action: &Action,
        result: &mut ApplyResult,
    ) -> Result<()> {
        match action.action_type {
            ActionType::Create => {
                tracing::info!("Creating {} license(s) of {}", action.quantity, action.key);
                let created = self
                    .gateway
                    .create_licenses(
                        project_id,
                        &action.key.region,
                        &action.key.license_type,
                        action.quantity,
                    )
                    .await?;
                result.add_created(created);
            }
            ActionType::Delete => {
                for license_id in &action.license_ids {
                    tracing::info!("Deleting license {} ({})", license_id, action.key);
                    self.gateway.delete_license(license_id).await?;
                    result.add_deleted(license_id.clone());
                }
            }
        }
        Ok(())
    }
}
