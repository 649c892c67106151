// cleanコマンドハンドラー
//
// サービスのデータベースを drop → create の順に作り直します。
// サービス名を省略した場合は全サービスを宣言順に処理します。

use crate::adapters::database::CleanReport;
use crate::cli::command_context::CommandContext;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// cleanコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct CleanCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 設定ファイルのパス
    pub config_path: Option<PathBuf>,
    /// サービス定義ファイルのパス
    pub services_file: Option<PathBuf>,
    /// DDLディレクトリのパス
    pub ddl_dir: Option<PathBuf>,
    /// 対象サービス（省略時は全サービス）
    pub service: Option<String>,
}

/// cleanコマンドハンドラー
#[derive(Debug, Clone)]
pub struct CleanCommandHandler {}

impl CleanCommandHandler {
    /// 新しいCleanCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// cleanコマンドを実行
    pub async fn execute(&self, command: &CleanCommand) -> Result<String> {
        let context =
            CommandContext::load(command.project_path.clone(), command.config_path.as_deref())?
                .with_overrides(command.services_file.clone(), command.ddl_dir.clone());

        let provisioner = context.provisioner()?;

        let reports = match &command.service {
            Some(service) => vec![provisioner
                .clean(service)
                .await
                .with_context(|| format!("Failed to clean service {}", service))?],
            None => provisioner
                .clean_all()
                .await
                .with_context(|| "Failed to clean service databases")?,
        };

        Ok(self.format_reports(&reports))
    }

    /// クリーン結果をフォーマット
    pub fn format_reports(&self, reports: &[CleanReport]) -> String {
        if reports.is_empty() {
            return "No services defined.".to_string();
        }

        let mut output = String::new();

        for report in reports {
            output.push_str(&format!(
                "{} Cleaned {} ({} drop, {} create statement(s))\n",
                "✓".green(),
                report.service.bold(),
                report.drop_executed,
                report.create_executed
            ));

            for failure in &report.drop_failures {
                output.push_str(&format!(
                    "  {} {}\n    {}\n",
                    "⚠ Drop statement failed:".yellow(),
                    failure.statement,
                    failure.error
                ));
            }
        }

        output.truncate(output.trim_end().len());
        output
    }
}

impl Default for CleanCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
