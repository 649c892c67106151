// プロビジョナーサービス
//
// サービスレジストリ、DDLスクリプトローダー、データベースセッションを束ね、
// 外部から呼び出される操作（exists / clean / clean_all）を提供します。

use crate::adapters::database::{CleanReport, ColumnValue, DatabaseSession, SessionTracker};
use crate::adapters::ddl_script::DdlScriptLoader;
use crate::core::config::ProvisionerConfig;
use crate::core::env_name::EnvNameValidator;
use crate::core::error::ProvisionError;
use crate::core::registry::ServiceRegistry;
use crate::services::config_loader::ServicesLoader;
use tracing::info;

/// プロビジョナー
///
/// レジストリは構築時に一度だけ検証済みです。
#[derive(Debug, Clone)]
pub struct Provisioner {
    registry: ServiceRegistry,
    scripts: DdlScriptLoader,
    sessions: SessionTracker,
}

impl Provisioner {
    /// 検証済みのレジストリとスクリプトローダーからプロビジョナーを作成
    pub fn new(registry: ServiceRegistry, scripts: DdlScriptLoader) -> Self {
        Self {
            registry,
            scripts,
            sessions: SessionTracker::new(),
        }
    }

    /// ツール設定に従ってサービス定義ファイルを読み込み、プロビジョナーを作成
    ///
    /// 設定のパスは解決済み（絶対パスまたはカレントディレクトリ基準）であること。
    pub fn from_config(
        config: &ProvisionerConfig,
        env_names: EnvNameValidator,
    ) -> Result<Self, ProvisionError> {
        let registry = ServicesLoader::new(env_names)?.load_file(&config.services_file)?;
        Ok(Self::new(registry, DdlScriptLoader::new(&config.ddl_dir)))
    }

    /// サービスレジストリ
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// DDLスクリプトローダー
    pub fn scripts(&self) -> &DdlScriptLoader {
        &self.scripts
    }

    /// 現在開いているセッション数
    pub fn active_sessions(&self) -> usize {
        self.sessions.active()
    }

    /// サービスのセッションを作成
    pub fn session(&self, service: &str) -> Result<DatabaseSession<'_>, ProvisionError> {
        let entry = self.registry.find(service)?;
        Ok(DatabaseSession::with_tracker(entry, self.sessions.clone()))
    }

    /// サービスのデータベースに `column = value` の行が存在するかどうか
    pub async fn exists(
        &self,
        service: &str,
        table: &str,
        column: &str,
        value: impl Into<ColumnValue>,
    ) -> Result<bool, ProvisionError> {
        self.session(service)?.exists(table, column, value).await
    }

    /// 1サービスのデータベースを削除して再作成
    pub async fn clean(&self, service: &str) -> Result<CleanReport, ProvisionError> {
        self.session(service)?.clean(&self.scripts).await
    }

    /// 全サービスのデータベースを宣言順に削除して再作成
    ///
    /// いずれかのサービスで失敗した時点で中断し、残りのサービスは処理しません。
    pub async fn clean_all(&self) -> Result<Vec<CleanReport>, ProvisionError> {
        let mut reports = Vec::with_capacity(self.registry.len());

        for entry in self.registry.entries() {
            let session = DatabaseSession::with_tracker(entry, self.sessions.clone());
            reports.push(session.clean(&self.scripts).await?);
        }

        info!(services = reports.len(), "Cleaned all service databases");
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env_name::OsFamily;
    use crate::core::service::ServiceRecord;

    fn provisioner() -> Provisioner {
        let records = vec![
            ServiceRecord::new("a", "A_URL", "A_USER", "A_PASS"),
            ServiceRecord::new("b", "B_URL", "B_USER", "B_PASS"),
        ];
        let registry =
            ServiceRegistry::from_records(&records, &EnvNameValidator::new(OsFamily::Posix))
                .unwrap();
        Provisioner::new(registry, DdlScriptLoader::new("ddl"))
    }

    #[test]
    fn test_session_for_known_service() {
        let provisioner = provisioner();

        let session = provisioner.session("b").unwrap();
        assert_eq!(session.entry().name(), "b");
        assert_eq!(provisioner.active_sessions(), 0);
    }

    #[test]
    fn test_session_for_unknown_service() {
        let error = provisioner().session("unknown-service").unwrap_err();
        assert!(error.is_service_not_found());
    }

    #[tokio::test]
    async fn test_clean_unknown_service() {
        let error = provisioner().clean("unknown-service").await.unwrap_err();
        assert!(error.is_service_not_found());
    }

    #[tokio::test]
    async fn test_exists_unknown_service() {
        let error = provisioner()
            .exists("unknown-service", "orders", "id", 1)
            .await
            .unwrap_err();
        assert!(error.is_service_not_found());
    }
}
