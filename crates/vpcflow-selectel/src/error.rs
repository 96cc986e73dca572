//! Selectel gateway error types

use thiserror::Error;
use vpcflow_cloud::LicenseError;

#[derive(Error, Debug)]
pub enum SelectelError {
    #[error("No token given")]
    MissingToken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Selectel API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SelectelError>;

impl From<SelectelError> for LicenseError {
    fn from(err: SelectelError) -> Self {
        match err {
            SelectelError::NotFound(id) => LicenseError::NotFound(id),
            other => LicenseError::Provider(other.to_string()),
        }
    }
}
