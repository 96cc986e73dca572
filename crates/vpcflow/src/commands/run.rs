use super::{Prepared, load_file};
use std::path::PathBuf;

/// ファイルの内容をそのまま Invocation として実行する
pub fn prepare(file: Option<PathBuf>, check: bool) -> anyhow::Result<Prepared> {
    let (_, loaded) = load_file(file)?;

    let mut prepared = Prepared::new(loaded.invocation, check);
    prepared.token = loaded.token;
    Ok(prepared)
}
