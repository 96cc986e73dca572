//! Desired-vs-actual reconciliation
//!
//! Pure computation: given the actual [`Inventory`] of a project and the
//! desired counts, work out how many licenses to create and delete per
//! (region, type) key. Nothing here talks to the provider.

use crate::error::{LicenseError, Result};
use crate::model::{Inventory, LicenseCounts, LicenseKey, serialize_counts};
use serde::Serialize;
use std::collections::BTreeSet;

/// Quantities to create and delete per key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diff {
    #[serde(serialize_with = "serialize_counts")]
    pub to_add: LicenseCounts,

    #[serde(serialize_with = "serialize_counts")]
    pub to_delete: LicenseCounts,
}

impl Diff {
    /// An empty diff means the project already matches the desired state
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_delete.is_empty()
    }

    pub fn total_to_add(&self) -> u64 {
        self.to_add.values().sum()
    }

    pub fn total_to_delete(&self) -> u64 {
        self.to_delete.values().sum()
    }
}

/// Computes a [`Diff`] honouring the force-delete flag
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    force: bool,
}

impl Reconciler {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    /// Diff `actual` against `desired` over the union of their keys
    ///
    /// A missing key counts as zero. If any key needs deletions while holding
    /// ACTIVE licenses and `force` is off, the whole reconciliation fails with
    /// [`LicenseError::ActiveResourceConflict`] for the first such key.
    pub fn reconcile(&self, actual: &Inventory, desired: &LicenseCounts) -> Result<Diff> {
        let keys: BTreeSet<&LicenseKey> = actual.keys().chain(desired.keys()).collect();
        let mut diff = Diff::default();

        for key in keys {
            let have = actual.count(key);
            let want = desired.get(key).copied().unwrap_or(0);

            if want > have {
                diff.to_add.insert(key.clone(), want - have);
            } else if want < have {
                let active = actual.active_count(key);
                if active > 0 {
                    if !self.force {
                        return Err(LicenseError::ActiveResourceConflict {
                            key: key.clone(),
                            active,
                        });
                    }
                    tracing::warn!(
                        "Deleting from {} despite {} ACTIVE license(s) (force)",
                        key,
                        active
                    );
                }
                diff.to_delete.insert(key.clone(), have - want);
            }
        }

        tracing::debug!(
            "Reconciled {} key(s): {} to add, {} to delete",
            diff.to_add.len() + diff.to_delete.len(),
            diff.total_to_add(),
            diff.total_to_delete()
        );
        Ok(diff)
    }
}
