// 設定ファイル読み込みサービス
//
// core の純粋性を保つため、ファイルI/Oと文書の解析はこのサービスに集約する。
// サービス定義ファイルは スキーマ検証 → レコードへの変換 → フィールド検証 の順に処理します。

use crate::core::config::ProvisionerConfig;
use crate::core::env_name::EnvNameValidator;
use crate::core::error::ProvisionError;
use crate::core::registry::{ServiceRegistry, ServicesDocument};
use crate::services::config_schema::ConfigSchemaValidator;
use anyhow::{Context, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// サービス定義ファイル読み込みサービス
#[derive(Debug)]
pub struct ServicesLoader {
    schema: ConfigSchemaValidator,
    env_names: EnvNameValidator,
}

impl ServicesLoader {
    /// 指定した環境変数名バリデーターでローダーを作成
    pub fn new(env_names: EnvNameValidator) -> Result<Self, ProvisionError> {
        Ok(Self {
            schema: ConfigSchemaValidator::new()?,
            env_names,
        })
    }

    /// サービス定義文書からレジストリを構築
    ///
    /// # Errors
    ///
    /// - 文書がスキーマに違反する場合は SchemaValidation
    /// - いずれかのエントリーがフィールド検証に失敗した場合は Deserialization
    ///   （最初の不正なエントリーで停止）
    pub fn load(&self, text: &str) -> Result<ServiceRegistry, ProvisionError> {
        let value = self.schema.validate_text(text)?;

        // スキーマ検証済みなので型の不一致はここでは起きない
        let document: ServicesDocument =
            serde_json::from_value(value).map_err(|e| ProvisionError::SchemaValidation {
                errors: vec![format!("Failed to map services document: {}", e)],
            })?;

        let registry = ServiceRegistry::from_records(&document.services, &self.env_names)?;
        debug!(
            services = registry.len(),
            os = %self.env_names.os(),
            "Loaded service registry"
        );

        Ok(registry)
    }

    /// サービス定義ファイルからレジストリを構築
    pub fn load_file(&self, path: &Path) -> Result<ServiceRegistry, ProvisionError> {
        let text = std::fs::read_to_string(path).map_err(|e| ProvisionError::ConfigRead {
            path: path.to_path_buf(),
            cause: e.to_string(),
        })?;

        self.load(&text)
    }
}

/// 実行中のOS用のバリデーターで読み込む
impl FromStr for ServiceRegistry {
    type Err = ProvisionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        ServicesLoader::new(EnvNameValidator::for_current_os())?.load(text)
    }
}

/// ツール設定ファイル読み込みサービス
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// YAMLファイルから設定を読み込む
    pub fn from_file(path: &Path) -> Result<ProvisionerConfig> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: ProvisionerConfig = content.parse()?;
        config.validate()?;
        Ok(config)
    }

    /// プロジェクトルートの設定ファイルを読み込む（存在しなければ既定値）
    pub fn load_or_default(project_path: &Path) -> Result<ProvisionerConfig> {
        let path = project_path.join(ProvisionerConfig::DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::from_file(&path)
        } else {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(ProvisionerConfig::default())
        }
    }
}
