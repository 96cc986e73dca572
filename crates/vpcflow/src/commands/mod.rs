pub mod apply;
pub mod delete;
pub mod list;
pub mod run;
pub mod show;

use std::path::{Path, PathBuf};
use vpcflow_cloud::{Invocation, Mode};
use vpcflow_config::LicensesFile;

/// A parsed command, ready to run against the gateway
pub struct Prepared {
    pub invocation: Invocation,
    pub mode: Mode,
    /// Token from the licenses file, if it carried one
    pub token: Option<String>,
}

impl Prepared {
    pub fn new(invocation: Invocation, check: bool) -> Self {
        Self {
            invocation,
            mode: if check { Mode::Check } else { Mode::Apply },
            token: None,
        }
    }
}

/// 指定されたファイル、なければ自動検出したファイルを読み込む
pub fn load_file(file: Option<PathBuf>) -> anyhow::Result<(PathBuf, LicensesFile)> {
    let path = match file {
        Some(path) => path,
        None => vpcflow_config::find_licenses_file()?,
    };
    let loaded = load(&path)?;
    Ok((path, loaded))
}

fn load(path: &Path) -> anyhow::Result<LicensesFile> {
    tracing::info!("Loading {}", path.display());
    Ok(vpcflow_config::load_licenses_file(path)?)
}
