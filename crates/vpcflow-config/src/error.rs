use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No token given. Pass --token or set the SEL_TOKEN environment variable")]
    MissingToken,

    #[error(
        "Licenses file not found. Looked for:\n\
        - VPCFLOW_LICENSES_PATH environment variable\n\
        - current directory: licenses.local.yaml, licenses.yaml, licenses.json\n\
        - ./.vpcflow/ directory\n\
        - ~/.config/vpcflow/licenses.yaml"
    )]
    LicensesFileNotFound,

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
