mod commands;
mod output;

use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::Prepared;
use std::path::PathBuf;
use std::time::Duration;
use vpcflow_cloud::LicenseRunner;
use vpcflow_config::Credentials;
use vpcflow_selectel::{SelectelClient, SelectelGateway};

#[derive(Parser)]
#[command(name = "vpcflow")]
#[command(about = "Selectel VPC のライセンスを宣言的に管理する", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Selectel API トークン（未指定時はライセンスファイル、SEL_TOKEN 環境変数の順に参照）
    #[arg(long, global = true)]
    token: Option<String>,

    /// API のベースURL
    #[arg(long, global = true, env = "SEL_URL")]
    url: Option<String>,

    /// HTTP リクエストのタイムアウト（秒）
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// 出力形式
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// ログを詳細に出力（-v: info, -vv: debug）
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// ライセンスファイルの状態にプロジェクトを合わせる
    Apply {
        /// ライセンスファイル（省略時は licenses.yaml などを自動検出）
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// プロジェクトID
        #[arg(long, conflicts_with = "project_name")]
        project_id: Option<String>,
        /// プロジェクト名（IDに解決される）
        #[arg(long)]
        project_name: Option<String>,
        /// ACTIVE なライセンスの削除を許可
        #[arg(long)]
        force: bool,
        /// 変更せずに差分のみ表示
        #[arg(long)]
        check: bool,
    },
    /// ライセンスの一覧を表示
    List {
        /// 割り当て先サーバーも表示
        #[arg(short, long)]
        detailed: bool,
    },
    /// ライセンスの詳細を表示
    Show {
        /// ライセンスID
        license_id: String,
        /// 割り当て先サーバーも表示
        #[arg(short, long)]
        detailed: bool,
    },
    /// ライセンスを削除
    Delete {
        /// ライセンスID
        license_id: String,
        /// 削除せずに変更の有無のみ表示
        #[arg(long)]
        check: bool,
    },
    /// パラメータファイルをそのまま実行（state / list / license_id などを含む）
    Run {
        /// パラメータファイル（省略時は licenses.yaml などを自動検出）
        file: Option<PathBuf>,
        /// 変更せずに結果のみ表示
        #[arg(long)]
        check: bool,
    },
    /// バージョン情報を表示
    Version,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // stdout は結果出力に使うので、ログは stderr に出す
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if matches!(cli.command, Commands::Version) {
        println!("vpcflow {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let format = cli.global.format;
    if let Err(e) = run(cli).await {
        output::print_error(format, &e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let prepared: Prepared = match cli.command {
        Commands::Apply {
            file,
            project_id,
            project_name,
            force,
            check,
        } => commands::apply::prepare(file, project_id, project_name, force, check)?,
        Commands::List { detailed } => commands::list::prepare(detailed),
        Commands::Show {
            license_id,
            detailed,
        } => commands::show::prepare(license_id, detailed),
        Commands::Delete { license_id, check } => commands::delete::prepare(license_id, check),
        Commands::Run { file, check } => commands::run::prepare(file, check)?,
        Commands::Version => unreachable!("Version is handled before credentials"),
    };

    let credentials = Credentials::resolve(
        cli.global.token.or(prepared.token.clone()),
        cli.global.url,
    )?;
    let client = SelectelClient::new(
        &credentials.base_url,
        &credentials.token,
        Duration::from_secs(cli.global.timeout),
    )?;
    let gateway = SelectelGateway::new(client);

    let outcome = LicenseRunner::new(&gateway)
        .execute(&prepared.invocation, prepared.mode)
        .await?;

    output::print_outcome(cli.global.format, &prepared, &outcome)
}
