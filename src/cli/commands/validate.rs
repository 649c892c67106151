// validateコマンドハンドラー
//
// サービス定義ファイルの検証機能を実装します。
// - スキーマ検証
// - 各フィールドの必須・空白・環境変数名の検証
// - 検証結果のサマリー表示

use crate::cli::command_context::CommandContext;
use crate::core::registry::ServiceRegistry;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

/// validateコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ValidateCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 設定ファイルのパス（指定されない場合はプロジェクトルートから探す）
    pub config_path: Option<PathBuf>,
    /// サービス定義ファイルのパス（指定されない場合は設定ファイルから取得）
    pub services_file: Option<PathBuf>,
}

/// validateコマンドハンドラー
#[derive(Debug, Clone)]
pub struct ValidateCommandHandler {}

impl ValidateCommandHandler {
    /// 新しいValidateCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// validateコマンドを実行
    ///
    /// # Returns
    ///
    /// 成功時は検証結果のサマリー、失敗時は最初の検証エラー
    pub fn execute(&self, command: &ValidateCommand) -> Result<String> {
        let context =
            CommandContext::load(command.project_path.clone(), command.config_path.as_deref())?
                .with_overrides(command.services_file.clone(), None);

        let registry = context.load_registry()?;

        Ok(self.format_validation_result(&registry))
    }

    /// 検証結果をフォーマット
    fn format_validation_result(&self, registry: &ServiceRegistry) -> String {
        let mut output = String::new();

        output.push_str("=== Services Validation Results ===\n\n");

        for entry in registry.entries() {
            output.push_str(&format!("  {} {}\n", "✓".green(), entry.name()));
        }

        output.push_str("\n=== Result ===\n");
        output.push_str(&format!(
            "{} {} service(s) defined. No errors found.\n",
            "✓ Validation complete.".green(),
            registry.len()
        ));

        output
    }
}

impl Default for ValidateCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn command(temp_dir: &TempDir) -> ValidateCommand {
        ValidateCommand {
            project_path: temp_dir.path().to_path_buf(),
            config_path: None,
            services_file: None,
        }
    }

    #[test]
    fn test_new_handler() {
        let handler = ValidateCommandHandler::new();
        assert!(format!("{:?}", handler).contains("ValidateCommandHandler"));
    }

    #[test]
    fn test_validate_valid_file() {
        colored::control::set_override(false);
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("services.yaml"),
            r#"services:
  - name: orders
    db-url-env: ORDERS_DB_URL
    db-user-env: ORDERS_DB_USER
    db-password-env: ORDERS_DB_PASSWORD
"#,
        )
        .unwrap();

        let output = ValidateCommandHandler::new()
            .execute(&command(&temp_dir))
            .unwrap();

        assert!(output.contains("orders"));
        assert!(output.contains("1 service(s) defined"));
    }

    #[test]
    fn test_validate_reports_field_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("services.yaml"),
            r#"services:
  - name: orders
    db-url-env: "1_BAD"
    db-user-env: ORDERS_DB_USER
    db-password-env: ORDERS_DB_PASSWORD
"#,
        )
        .unwrap();

        let error = ValidateCommandHandler::new()
            .execute(&command(&temp_dir))
            .unwrap_err();

        let message = format!("{:#}", error);
        assert!(message.contains("db-url-env"));
        assert!(message.contains("1_BAD"));
    }

    #[test]
    fn test_validate_missing_services_file() {
        let temp_dir = TempDir::new().unwrap();

        let error = ValidateCommandHandler::new()
            .execute(&command(&temp_dir))
            .unwrap_err();

        assert!(error.to_string().contains("Services file not found"));
    }
}
