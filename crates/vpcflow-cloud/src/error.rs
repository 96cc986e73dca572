//! License management error types

use crate::model::LicenseKey;
use thiserror::Error;

/// Errors surfaced by a license management invocation
#[derive(Error, Debug)]
pub enum LicenseError {
    #[error("Invalid quantity {quantity} for {key}: quantity must be a non-negative integer")]
    InvalidQuantity { key: LicenseKey, quantity: i64 },

    #[error("Total quantity for {key} is too large")]
    QuantityOverflow { key: LicenseKey },

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error(
        "{active} ACTIVE license(s) for {key} would be deleted. Set 'force' to delete ACTIVE licenses"
    )]
    ActiveResourceConflict { key: LicenseKey, active: usize },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("License not found: {0}")]
    NotFound(String),

    #[error("No params for 'licenses' operations.")]
    MissingParameters,
}

pub type Result<T> = std::result::Result<T, LicenseError>;
