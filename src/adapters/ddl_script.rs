// DDLスクリプトローダー
//
// `<action>-<service>-db.ddl` という命名規約で、固定のリソースルートから
// DDLスクリプトを読み込みます。1行を1文として順序を保って返し、内容は解釈しません。

use crate::core::error::ProvisionError;
use crate::core::naming::DDL_SUFFIX;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// DDLアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DdlAction {
    Drop,
    Create,
}

impl std::fmt::Display for DdlAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DdlAction::Drop => write!(f, "drop"),
            DdlAction::Create => write!(f, "create"),
        }
    }
}

/// DDLスクリプトローダー
#[derive(Debug, Clone)]
pub struct DdlScriptLoader {
    root: PathBuf,
}

impl DdlScriptLoader {
    /// リソースルートを指定してローダーを作成
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// リソースルート
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// リソース名を生成（例: `drop-orders-db.ddl`）
    pub fn resource_name(action: DdlAction, service: &str) -> String {
        format!("{}-{}{}", action, service, DDL_SUFFIX)
    }

    /// スクリプトを読み込み、行の並びをそのまま返す
    ///
    /// # Errors
    ///
    /// - リソースが存在しない場合、またはリソース名がルート直下のファイル名にならない場合は ScriptNotFound
    /// - 読み込みに失敗した場合は ScriptRead
    pub fn load(&self, action: DdlAction, service: &str) -> Result<Vec<String>, ProvisionError> {
        let resource = Self::resource_name(action, service);
        if !Self::is_plain_file_name(&resource) {
            return Err(ProvisionError::ScriptNotFound {
                resource,
                root: self.root.clone(),
            });
        }
        let path = self.root.join(&resource);

        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProvisionError::ScriptNotFound {
                resource: resource.clone(),
                root: self.root.clone(),
            },
            _ => ProvisionError::ScriptRead {
                resource: resource.clone(),
                cause: e.to_string(),
            },
        })?;

        Ok(content.lines().map(str::to_string).collect())
    }

    // 区切り文字を含む名前はルートの外を指しうる
    fn is_plain_file_name(resource: &str) -> bool {
        !resource.contains(['/', '\\'])
            && matches!(
                Path::new(resource).components().collect::<Vec<_>>().as_slice(),
                [Component::Normal(_)]
            )
    }
}
