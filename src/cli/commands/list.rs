// listコマンドハンドラー
//
// 設定済みのサービスと、それぞれが参照する環境変数の設定状況を表示します。
// 環境変数の値（URL・パスワード）は表示しません。

use crate::cli::command_context::CommandContext;
use crate::core::registry::ServiceRegistry;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// listコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ListCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 設定ファイルのパス
    pub config_path: Option<PathBuf>,
    /// サービス定義ファイルのパス
    pub services_file: Option<PathBuf>,
}

/// listコマンドハンドラー
#[derive(Debug, Clone)]
pub struct ListCommandHandler {}

impl ListCommandHandler {
    /// 新しいListCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// listコマンドを実行
    pub fn execute(&self, command: &ListCommand) -> Result<String> {
        let context =
            CommandContext::load(command.project_path.clone(), command.config_path.as_deref())?
                .with_overrides(command.services_file.clone(), None);

        let registry = context.load_registry()?;

        Ok(self.format_services(&registry))
    }

    fn format_services(&self, registry: &ServiceRegistry) -> String {
        if registry.is_empty() {
            return "No services defined.".to_string();
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", "=== Services ===".bold()));

        for entry in registry.entries() {
            output.push_str(&format!("\n{}\n", entry.name().bold()));
            for (label, variable) in [
                ("url", entry.url_variable()),
                ("user", entry.user_variable()),
                ("password", entry.password_variable()),
            ] {
                output.push_str(&format!(
                    "  {:<9}{:<32}{}\n",
                    label,
                    variable,
                    Self::variable_status(variable)
                ));
            }
        }

        output
    }

    fn variable_status(variable: &str) -> String {
        if std::env::var_os(variable).is_some() {
            "set".green().to_string()
        } else {
            "not set".yellow().to_string()
        }
    }
}

impl Default for ListCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
