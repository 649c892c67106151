use anyhow::{Context, Result};
use clap::Parser;
use colored::control as color_control;
use std::env;
use std::path::PathBuf;
use std::process;
use svcdb::cli::commands::clean::{CleanCommand, CleanCommandHandler};
use svcdb::cli::commands::exists::{ExistsCommand, ExistsCommandHandler};
use svcdb::cli::commands::list::{ListCommand, ListCommandHandler};
use svcdb::cli::commands::validate::{ValidateCommand, ValidateCommandHandler};
use svcdb::cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    // CLIをパースして実行
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // 非同期ランタイムを作成して実行
    let runtime = tokio::runtime::Runtime::new()
        .context("Failed to create Tokio runtime")
        .unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        });

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// ログ出力を初期化する
///
/// RUST_LOG が設定されていればそれを優先し、なければ --verbose で debug、既定は info。
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// コマンドを実行する
async fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    // プロジェクトのルートパスを取得
    let project_path = env::current_dir()?;

    // --config フラグの処理（絶対パスに変換）
    let config_path: Option<PathBuf> = cli.config.map(|p| {
        if p.is_absolute() {
            p
        } else {
            project_path.join(p)
        }
    });

    match cli.command {
        Commands::Validate => {
            let handler = ValidateCommandHandler::new();
            let command = ValidateCommand {
                project_path,
                config_path,
                services_file: cli.services,
            };
            handler.execute(&command)
        }

        Commands::List => {
            let handler = ListCommandHandler::new();
            let command = ListCommand {
                project_path,
                config_path,
                services_file: cli.services,
            };
            handler.execute(&command)
        }

        Commands::Exists {
            service,
            table,
            column,
            value,
        } => {
            let handler = ExistsCommandHandler::new();
            let command = ExistsCommand {
                project_path,
                config_path,
                services_file: cli.services,
                service,
                table,
                column,
                value,
            };
            handler.execute(&command).await
        }

        Commands::Clean { service } => {
            let handler = CleanCommandHandler::new();
            let command = CleanCommand {
                project_path,
                config_path,
                services_file: cli.services,
                ddl_dir: cli.ddl_dir,
                service,
            };
            handler.execute(&command).await
        }
    }
}
