use super::{Prepared, load_file};
use std::path::PathBuf;
use vpcflow_cloud::{Invocation, State};

/// ライセンスファイルの licenses / project / force だけを使って差分適用する
pub fn prepare(
    file: Option<PathBuf>,
    project_id: Option<String>,
    project_name: Option<String>,
    force: bool,
    check: bool,
) -> anyhow::Result<Prepared> {
    let (path, loaded) = load_file(file)?;
    let from_file = loaded.invocation;

    if from_file.licenses.is_none() {
        anyhow::bail!("{} に licenses が定義されていません", path.display());
    }

    // CLI で指定されたプロジェクトがファイルより優先
    let (project_id, project_name) = if project_id.is_some() || project_name.is_some() {
        (project_id, project_name)
    } else {
        (from_file.project_id, from_file.project_name)
    };

    let invocation = Invocation {
        state: State::Present,
        project_id,
        project_name,
        licenses: from_file.licenses,
        force: force || from_file.force,
        detailed: from_file.detailed,
        ..Default::default()
    };

    let mut prepared = Prepared::new(invocation, check);
    prepared.token = loaded.token;
    Ok(prepared)
}
