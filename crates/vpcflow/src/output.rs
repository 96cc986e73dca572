use crate::OutputFormat;
use crate::commands::Prepared;
use colored::Colorize;
use vpcflow_cloud::{Diff, LicenseRecord, Mode, Outcome};

/// 実行結果を出力
pub fn print_outcome(
    format: OutputFormat,
    prepared: &Prepared,
    outcome: &Outcome,
) -> anyhow::Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if prepared.mode == Mode::Check {
        println!("{}", "【チェックモード】変更は行いません".yellow());
    }

    if let Some(diff) = &outcome.diff {
        print_diff(diff);
    }

    if let Some(applied) = &outcome.applied {
        println!();
        println!(
            "{} 作成 {} 件 / 削除 {} 件 ({}ms)",
            "✓".green(),
            applied.created.len(),
            applied.deleted.len(),
            applied.duration_ms
        );
        for license_id in &applied.deleted {
            println!("  - {} を削除しました", license_id.cyan());
        }
    }

    if !outcome.licenses.is_empty() {
        println!();
        print_licenses(&outcome.licenses, prepared.invocation.detailed);
    }

    println!();
    if outcome.changed {
        let label = match prepared.mode {
            Mode::Check => "変更あり",
            Mode::Apply => "変更しました",
        };
        println!("{}", label.yellow().bold());
    } else {
        println!("{}", "変更なし".green());
    }
    Ok(())
}

fn print_diff(diff: &Diff) {
    if diff.is_empty() {
        println!("{}", "宣言と現在の状態は一致しています".dimmed());
        return;
    }

    println!("{}", "差分:".bold());
    for (key, quantity) in &diff.to_add {
        println!("  {} {} × {}", "+".green(), key.to_string().cyan(), quantity);
    }
    for (key, quantity) in &diff.to_delete {
        println!("  {} {} × {}", "-".red(), key.to_string().cyan(), quantity);
    }
}

fn print_licenses(licenses: &[LicenseRecord], detailed: bool) {
    println!(
        "{}",
        format!(
            "{:<12} {:<36} {:<8} {:<36} {:<10}",
            "ID", "PROJECT", "REGION", "TYPE", "STATUS"
        )
        .bold()
    );
    println!("{}", "─".repeat(106).dimmed());

    for license in licenses {
        let status = license.status.to_string();
        let status_colored = if license.status.is_active() {
            status.green()
        } else {
            status.yellow()
        };
        println!(
            "{:<12} {:<36} {:<8} {:<36} {:<10}",
            license.id, license.project_id, license.region, license.license_type, status_colored
        );

        if detailed {
            for server in &license.servers {
                println!(
                    "  └ {} {} {}",
                    server.id.dimmed(),
                    server.name.as_deref().unwrap_or("N/A"),
                    server.status.as_deref().unwrap_or("")
                );
            }
        }
    }
}

/// エラーを出力
///
/// JSON 形式では `{"failed": true, "msg": ...}` を stdout に出す
pub fn print_error(format: OutputFormat, error: &anyhow::Error) {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "failed": true,
                "msg": format!("{:#}", error),
            });
            println!("{}", body);
        }
        OutputFormat::Text => {
            eprintln!("{} {:#}", "Error:".red().bold(), error);
        }
    }
}
