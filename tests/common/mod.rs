// 統合テスト共通ヘルパー
//
// 一時ディレクトリにサービス定義ファイルとDDLスクリプトを作成し、
// SQLiteデータベースを指す環境変数を設定します。

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use svcdb::adapters::ddl_script::DdlScriptLoader;
use svcdb::core::env_name::{EnvNameValidator, OsFamily};
use svcdb::services::config_loader::ServicesLoader;
use svcdb::services::provisioner::Provisioner;
use tempfile::TempDir;

/// テスト用プロジェクト
pub struct TestProject {
    pub temp_dir: TempDir,
    prefix: String,
    services: Vec<String>,
}

impl TestProject {
    /// 環境変数名の接頭辞を指定して作成（テスト間で衝突しないようにする）
    pub fn new(prefix: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("ddl")).unwrap();
        Self {
            temp_dir,
            prefix: prefix.to_string(),
            services: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn ddl_dir(&self) -> PathBuf {
        self.path().join("ddl")
    }

    /// サービスのデータベースファイル
    pub fn database_file(&self, service: &str) -> PathBuf {
        self.path().join(format!("{}.db", service))
    }

    /// サービスが参照する環境変数名
    pub fn variable(&self, service: &str, kind: &str) -> String {
        format!(
            "{}_{}_DB_{}",
            self.prefix,
            service.to_uppercase().replace('-', "_"),
            kind
        )
    }

    /// サービスを追加し、SQLiteデータベースを指す環境変数を設定
    pub fn add_service(&mut self, service: &str) -> &mut Self {
        let url = format!("sqlite://{}?mode=rwc", self.database_file(service).display());
        std::env::set_var(self.variable(service, "URL"), url);
        std::env::set_var(self.variable(service, "USER"), "svcdb_test");
        std::env::set_var(self.variable(service, "PASSWORD"), "unused");
        self.services.push(service.to_string());
        self
    }

    /// サービスを追加するが環境変数は設定しない
    pub fn add_service_without_env(&mut self, service: &str) -> &mut Self {
        for kind in ["URL", "USER", "PASSWORD"] {
            std::env::remove_var(self.variable(service, kind));
        }
        self.services.push(service.to_string());
        self
    }

    /// DDLスクリプトを書き込む
    pub fn write_script(&self, action: &str, service: &str, lines: &[&str]) {
        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(
            self.ddl_dir().join(format!("{}-{}-db.ddl", action, service)),
            content,
        )
        .unwrap();
    }

    /// サービス定義ファイルの内容
    pub fn services_yaml(&self) -> String {
        let mut yaml = String::from("services:\n");
        for service in &self.services {
            yaml.push_str(&format!(
                "  - name: {}\n    db-url-env: {}\n    db-user-env: {}\n    db-password-env: {}\n",
                service,
                self.variable(service, "URL"),
                self.variable(service, "USER"),
                self.variable(service, "PASSWORD"),
            ));
        }
        yaml
    }

    /// サービス定義ファイルを書き込む
    pub fn write_services_file(&self) -> PathBuf {
        let path = self.path().join("services.yaml");
        fs::write(&path, self.services_yaml()).unwrap();
        path
    }

    /// プロビジョナーを作成
    pub fn provisioner(&self) -> Provisioner {
        let registry = ServicesLoader::new(EnvNameValidator::new(OsFamily::Posix))
            .unwrap()
            .load(&self.services_yaml())
            .unwrap();
        Provisioner::new(registry, DdlScriptLoader::new(self.ddl_dir()))
    }

    /// 環境変数を片付ける
    pub fn clear_env(&self) {
        for service in &self.services {
            for kind in ["URL", "USER", "PASSWORD"] {
                std::env::remove_var(self.variable(service, kind));
            }
        }
    }
}

impl Drop for TestProject {
    fn drop(&mut self) {
        self.clear_env();
    }
}
