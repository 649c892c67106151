// existsコマンドハンドラー
//
// サービスのデータベースに指定した行が存在するかどうかを確認します。

use crate::adapters::database::ColumnValue;
use crate::cli::command_context::CommandContext;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// existsコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct ExistsCommand {
    /// プロジェクトのルートパス
    pub project_path: PathBuf,
    /// 設定ファイルのパス
    pub config_path: Option<PathBuf>,
    /// サービス定義ファイルのパス
    pub services_file: Option<PathBuf>,
    /// サービス名
    pub service: String,
    /// テーブル名
    pub table: String,
    /// カラム名
    pub column: String,
    /// 比較する値（整数として解釈できれば整数）
    pub value: String,
}

/// existsコマンドハンドラー
#[derive(Debug, Clone)]
pub struct ExistsCommandHandler {}

impl ExistsCommandHandler {
    /// 新しいExistsCommandHandlerを作成
    pub fn new() -> Self {
        Self {}
    }

    /// existsコマンドを実行
    ///
    /// # Returns
    ///
    /// 行が存在すれば "true"、存在しなければ "false"
    pub async fn execute(&self, command: &ExistsCommand) -> Result<String> {
        let context =
            CommandContext::load(command.project_path.clone(), command.config_path.as_deref())?
                .with_overrides(command.services_file.clone(), None);

        let provisioner = context.provisioner()?;
        let found = provisioner
            .exists(
                &command.service,
                &command.table,
                &command.column,
                ColumnValue::parse(&command.value),
            )
            .await
            .with_context(|| format!("Existence check for service {} failed", command.service))?;

        Ok(found.to_string())
    }
}

impl Default for ExistsCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
