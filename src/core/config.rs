// 設定ファイル管理
//
// ツール設定ファイル（YAML形式）とデータベース方言を扱います。
// サービス定義ファイルとDDLリソースディレクトリの場所を保持します。

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// データベース方言
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    PostgreSQL,
    MySQL,
    SQLite,
}

impl Dialect {
    /// URLスキームから方言を判定
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Dialect::PostgreSQL),
            "mysql" | "mariadb" => Some(Dialect::MySQL),
            "sqlite" => Some(Dialect::SQLite),
            _ => None,
        }
    }

    /// バインドパラメータのプレースホルダー（1始まり）
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::PostgreSQL => format!("${}", index),
            Dialect::MySQL | Dialect::SQLite => "?".to_string(),
        }
    }

    /// 接続URLに認証情報を埋め込む方言かどうか
    pub fn uses_credentials(&self) -> bool {
        !matches!(self, Dialect::SQLite)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::PostgreSQL => write!(f, "postgresql"),
            Dialect::MySQL => write!(f, "mysql"),
            Dialect::SQLite => write!(f, "sqlite"),
        }
    }
}

/// ツール設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionerConfig {
    /// サービス定義ファイル
    #[serde(default = "default_services_file")]
    pub services_file: PathBuf,

    /// DDLリソースディレクトリ
    #[serde(default = "default_ddl_dir")]
    pub ddl_dir: PathBuf,
}

fn default_services_file() -> PathBuf {
    PathBuf::from(crate::core::naming::SERVICES_FILE)
}

fn default_ddl_dir() -> PathBuf {
    PathBuf::from(crate::core::naming::DDL_DIR)
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            services_file: default_services_file(),
            ddl_dir: default_ddl_dir(),
        }
    }
}

impl ProvisionerConfig {
    /// デフォルトの設定ファイルパス
    pub const DEFAULT_CONFIG_PATH: &'static str = crate::core::naming::CONFIG_FILE;

    /// 設定の妥当性を検証
    pub fn validate(&self) -> Result<()> {
        if self.services_file.as_os_str().is_empty() {
            return Err(anyhow!("services_file is not specified"));
        }

        if self.ddl_dir.as_os_str().is_empty() {
            return Err(anyhow!("ddl_dir is not specified"));
        }

        Ok(())
    }

    /// 相対パスをプロジェクトルート基準の絶対パスに解決
    pub fn resolve_paths(&self, project_path: &Path) -> Self {
        Self {
            services_file: project_path.join(&self.services_file),
            ddl_dir: project_path.join(&self.ddl_dir),
        }
    }
}

/// std::str::FromStrトレイトの実装
impl FromStr for ProvisionerConfig {
    type Err = anyhow::Error;

    fn from_str(yaml: &str) -> Result<Self, Self::Err> {
        serde_saphyr::from_str(yaml).with_context(|| "Failed to parse config file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_display() {
        assert_eq!(Dialect::PostgreSQL.to_string(), "postgresql");
        assert_eq!(Dialect::MySQL.to_string(), "mysql");
        assert_eq!(Dialect::SQLite.to_string(), "sqlite");
    }

    #[test]
    fn test_dialect_from_scheme() {
        assert_eq!(Dialect::from_scheme("postgres"), Some(Dialect::PostgreSQL));
        assert_eq!(Dialect::from_scheme("PostgreSQL"), Some(Dialect::PostgreSQL));
        assert_eq!(Dialect::from_scheme("mysql"), Some(Dialect::MySQL));
        assert_eq!(Dialect::from_scheme("mariadb"), Some(Dialect::MySQL));
        assert_eq!(Dialect::from_scheme("sqlite"), Some(Dialect::SQLite));
        assert_eq!(Dialect::from_scheme("oracle"), None);
    }

    #[test]
    fn test_dialect_placeholder() {
        assert_eq!(Dialect::PostgreSQL.placeholder(1), "$1");
        assert_eq!(Dialect::MySQL.placeholder(1), "?");
        assert_eq!(Dialect::SQLite.placeholder(2), "?");
    }

    #[test]
    fn test_default_config() {
        let config = ProvisionerConfig::default();

        assert_eq!(config.services_file, Path::new("services.yaml"));
        assert_eq!(config.ddl_dir, Path::new("ddl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_yaml_uses_defaults_for_missing_keys() {
        let config: ProvisionerConfig = "ddl_dir: sql/ddl\n".parse().unwrap();

        assert_eq!(config.services_file, Path::new("services.yaml"));
        assert_eq!(config.ddl_dir, Path::new("sql/ddl"));
    }

    #[test]
    fn test_resolve_paths() {
        let config = ProvisionerConfig::default().resolve_paths(Path::new("/project"));

        assert_eq!(config.services_file, Path::new("/project/services.yaml"));
        assert_eq!(config.ddl_dir, Path::new("/project/ddl"));
    }
}
