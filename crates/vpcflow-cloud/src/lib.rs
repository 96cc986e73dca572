//! vpcflow license management
//!
//! This crate holds the provider-independent half of vpcflow: the license
//! model, the desired-vs-actual reconciler, plan/apply types, the gateway
//! abstraction and the runner that ties them together.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  vpcflow CLI                     │
//! │          (apply / list / show / delete)          │
//! └─────────────────┬───────────────────────────────┘
//!                   │ Invocation
//! ┌─────────────────▼───────────────────────────────┐
//! │                vpcflow-cloud                     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │   LicenseRunner ─► Reconciler ─► Plan    │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │        trait LicenseGateway { ... }       │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼───────┐
//!           │   selectel    │
//!           │   gateway     │
//!           └───────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vpcflow_cloud::{Invocation, LicenseRequirement, LicenseRunner, Mode};
//!
//! let invocation = Invocation {
//!     project_name: Some("staging".to_string()),
//!     licenses: Some(vec![LicenseRequirement::new("ru-1", "license_windows_2016_standard", 2)]),
//!     ..Default::default()
//! };
//!
//! let outcome = LicenseRunner::new(&gateway)
//!     .execute(&invocation, Mode::Check)
//!     .await?;
//! println!("changed: {}", outcome.changed);
//! ```

pub mod action;
pub mod error;
pub mod gateway;
pub mod model;
pub mod reconcile;
pub mod runner;

// Re-exports
pub use action::{Action, ActionType, ApplyResult, Plan, PlanSummary};
pub use error::{LicenseError, Result};
pub use gateway::LicenseGateway;
pub use model::{
    Inventory, LicenseCounts, LicenseKey, LicenseRecord, LicenseRequirement, LicenseStatus,
    ServerRef, desired_counts, validate_requirements,
};
pub use reconcile::{Diff, Reconciler};
pub use runner::{Invocation, LicenseRunner, Mode, Outcome, State};
