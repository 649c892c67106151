// サービスレジストリ
//
// 1つのサービス定義ファイルから構築された ServiceEntry の集合を表現します。
// 構築後は読み取り専用で、スレッド間で共有できます。

use crate::core::env_name::EnvNameValidator;
use crate::core::error::ProvisionError;
use crate::core::service::{ServiceEntry, ServiceRecord};
use serde::{Deserialize, Serialize};

/// サービス定義ファイルのルート
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesDocument {
    /// 宣言順のサービスレコード
    #[serde(default)]
    pub services: Vec<ServiceRecord>,
}

/// サービスレジストリ
///
/// エントリーは設定ファイルでの宣言順を保持します。
/// サービス名の一意性はここでは強制せず、検索時は最初に一致したものを返します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRegistry {
    entries: Vec<ServiceEntry>,
}

impl ServiceRegistry {
    /// レコードを順に検証してレジストリを構築
    ///
    /// 最初に見つかった不正なレコードで失敗し、検証エラーを原因として保持します。
    pub fn from_records(
        records: &[ServiceRecord],
        env_names: &EnvNameValidator,
    ) -> Result<Self, ProvisionError> {
        let entries = records
            .iter()
            .map(|record| {
                record
                    .validate(env_names)
                    .map_err(|source| ProvisionError::Deserialization { source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// 宣言順のエントリー
    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    /// サービス名でエントリーを検索
    pub fn find(&self, service: &str) -> Result<&ServiceEntry, ProvisionError> {
        self.entries
            .iter()
            .find(|entry| entry.name() == service)
            .ok_or_else(|| ProvisionError::ServiceNotFound {
                service: service.to_string(),
            })
    }

    /// エントリー数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// エントリーが空かどうか
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
