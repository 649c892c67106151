// コマンド共通コンテキスト
//
// 設定ファイル読み込みやパス解決の重複をCLI層で集約する。

use crate::core::config::ProvisionerConfig;
use crate::core::env_name::EnvNameValidator;
use crate::core::registry::ServiceRegistry;
use crate::services::config_loader::{ConfigLoader, ServicesLoader};
use crate::services::provisioner::Provisioner;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// CLIコマンド共通の実行コンテキスト
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub project_path: PathBuf,
    pub config: ProvisionerConfig,
}

impl CommandContext {
    /// プロジェクトルートから設定を読み込んでコンテキストを作成
    ///
    /// `config_path` を指定した場合はそのファイルが存在しなければエラー、
    /// 省略した場合はプロジェクトルートの設定ファイル（なければ既定値）を使います。
    pub fn load(project_path: PathBuf, config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(anyhow!("Config file not found: {:?}", path));
                }
                ConfigLoader::from_file(path).with_context(|| "Failed to read config file")?
            }
            None => ConfigLoader::load_or_default(&project_path)
                .with_context(|| "Failed to read config file")?,
        };

        Ok(Self {
            project_path,
            config,
        })
    }

    /// コマンドラインの指定で設定を上書き
    pub fn with_overrides(mut self, services: Option<PathBuf>, ddl_dir: Option<PathBuf>) -> Self {
        if let Some(services) = services {
            self.config.services_file = services;
        }
        if let Some(ddl_dir) = ddl_dir {
            self.config.ddl_dir = ddl_dir;
        }
        self
    }

    /// プロジェクトルート基準に解決した設定
    pub fn resolved_config(&self) -> ProvisionerConfig {
        self.config.resolve_paths(&self.project_path)
    }

    /// サービス定義ファイルの絶対パス
    pub fn services_file(&self) -> PathBuf {
        self.project_path.join(&self.config.services_file)
    }

    /// サービス定義ファイルが存在することを確認して返す
    pub fn require_services_file(&self) -> Result<PathBuf> {
        let path = self.services_file();
        if !path.exists() {
            return Err(anyhow!("Services file not found: {:?}", path));
        }
        Ok(path)
    }

    /// サービスレジストリを読み込む
    pub fn load_registry(&self) -> Result<ServiceRegistry> {
        let path = self.require_services_file()?;
        let registry = ServicesLoader::new(EnvNameValidator::for_current_os())?
            .load_file(&path)
            .with_context(|| format!("Invalid services file: {:?}", path))?;
        Ok(registry)
    }

    /// プロビジョナーを作成
    pub fn provisioner(&self) -> Result<Provisioner> {
        let path = self.require_services_file()?;
        let provisioner =
            Provisioner::from_config(&self.resolved_config(), EnvNameValidator::for_current_os())
                .with_context(|| format!("Invalid services file: {:?}", path))?;
        Ok(provisioner)
    }
}
