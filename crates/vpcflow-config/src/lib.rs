pub mod credentials;
pub mod error;

pub use credentials::Credentials;
pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use vpcflow_cloud::Invocation;

pub const LICENSES_PATH_ENV: &str = "VPCFLOW_LICENSES_PATH";

const CANDIDATES: [&str; 3] = ["licenses.local.yaml", "licenses.yaml", "licenses.json"];

/// Contents of a licenses file: an invocation plus an optional token
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LicensesFile {
    #[serde(flatten)]
    pub invocation: Invocation,

    #[serde(default)]
    pub token: Option<String>,
}

/// vpcflow's global configuration directory (`~/.config/vpcflow`)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vpcflow"))
}

/// Find the project's licenses file
///
/// Search order:
/// 1. `VPCFLOW_LICENSES_PATH` (direct path)
/// 2. current directory: licenses.local.yaml, licenses.yaml, licenses.json
/// 3. `./.vpcflow/` with the same names
/// 4. `~/.config/vpcflow/licenses.yaml`
pub fn find_licenses_file() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(LICENSES_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Ok(path);
        }
        tracing::warn!(
            "{} points to a missing file: {}",
            LICENSES_PATH_ENV,
            path.display()
        );
    }

    let current_dir = std::env::current_dir()?;
    for dir in [current_dir.clone(), current_dir.join(".vpcflow")] {
        for filename in &CANDIDATES {
            let path = dir.join(filename);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    if let Some(config_dir) = get_config_dir() {
        let global = config_dir.join("licenses.yaml");
        if global.exists() {
            return Ok(global);
        }
    }

    Err(ConfigError::LicensesFileNotFound)
}

/// Load a licenses file (YAML, which also accepts JSON)
pub fn load_licenses_file(path: &Path) -> Result<LicensesFile> {
    let content = std::fs::read_to_string(path)?;
    let file: LicensesFile = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "Loaded {} with {} license requirement(s)",
        path.display(),
        file.invocation.licenses.as_ref().map_or(0, Vec::len)
    );
    Ok(file)
}
