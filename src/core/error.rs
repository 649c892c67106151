// エラー型定義
//
// プロビジョナー全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、フィールド検証エラー (ValidationError) と
// 操作エラー (ProvisionError) を定義します。
//
// どのメッセージにもパスワードの値を含めてはいけません。

use std::path::PathBuf;
use thiserror::Error;

/// フィールド検証エラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// 設定ファイルにフィールドが存在しない
    Missing,
    /// 空文字列
    Empty,
    /// 空白文字のみ
    Blank,
    /// 先頭または末尾に空白文字がある
    Whitespace,
    /// 環境変数名として不正
    InvalidEnvironmentName,
}

/// フィールド検証エラー
///
/// サービス定義の1フィールドが不正であることを表現します。
/// メッセージにはフィールド名と（存在すれば）元の値を含めます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    /// 設定ファイル上のフィールド名（例: `db-url-env`）
    pub field: String,
    /// 所属するサービス名（name フィールド自体の検証時は None）
    pub service: Option<String>,
    /// 検証対象の値
    pub value: Option<String>,
    /// エラーの種類
    pub kind: FieldErrorKind,
}

impl ValidationError {
    /// 新しい検証エラーを作成
    pub fn new(
        field: impl Into<String>,
        service: Option<&str>,
        value: Option<&str>,
        kind: FieldErrorKind,
    ) -> Self {
        Self {
            field: field.into(),
            service: service.map(str::to_string),
            value: value.map(str::to_string),
            kind,
        }
    }

    /// フィールド欠落エラーかどうか
    pub fn is_missing(&self) -> bool {
        self.kind == FieldErrorKind::Missing
    }

    /// 空文字列エラーかどうか
    pub fn is_empty(&self) -> bool {
        self.kind == FieldErrorKind::Empty
    }

    /// 空白のみエラーかどうか
    pub fn is_blank(&self) -> bool {
        self.kind == FieldErrorKind::Blank
    }

    /// 前後空白エラーかどうか
    pub fn is_whitespace(&self) -> bool {
        self.kind == FieldErrorKind::Whitespace
    }

    /// 環境変数名エラーかどうか
    pub fn is_invalid_environment_name(&self) -> bool {
        self.kind == FieldErrorKind::InvalidEnvironmentName
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subject = match &self.service {
            Some(service) => format!("The {} field of service '{}'", self.field, service),
            None => format!("The {} field", self.field),
        };

        let value = self.value.as_deref().unwrap_or_default();

        match self.kind {
            FieldErrorKind::Missing => write!(f, "{} is missing from the configuration", subject),
            FieldErrorKind::Empty => write!(f, "{} is empty", subject),
            FieldErrorKind::Blank => write!(f, "{} is blank", subject),
            FieldErrorKind::Whitespace => write!(
                f,
                "{} has leading or trailing whitespace [{}]",
                subject, value
            ),
            FieldErrorKind::InvalidEnvironmentName => write!(
                f,
                "{} is not a valid environment variable name [{}]",
                subject, value
            ),
        }
    }
}

/// プロビジョニングエラー
///
/// 設定の読み込みからDDL実行までに発生するエラーを表現します。
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// Services file could not be read
    #[error("Failed to read services file: {} (cause: {cause})", .path.display())]
    ConfigRead {
        /// ファイルパス
        path: PathBuf,
        /// エラー原因
        cause: String,
    },

    /// Structural defect in the services document
    #[error("Services document failed schema validation: {}", .errors.join("; "))]
    SchemaValidation {
        /// スキーマ違反のリスト
        errors: Vec<String>,
    },

    /// A service entry failed field validation while being built
    #[error("Failed to build the service registry: {source}")]
    Deserialization {
        /// 原因となった検証エラー
        #[source]
        source: ValidationError,
    },

    /// Lookup miss
    #[error("The database for service \"{service}\" is not defined")]
    ServiceNotFound {
        /// 検索したサービス名
        service: String,
    },

    /// A credential variable is not set
    #[error("The {variable} environment variable is not set")]
    EnvironmentVariableMissing {
        /// 環境変数名
        variable: String,
    },

    /// No backend driver for the URL scheme
    #[error("Unable to load a database driver for URL scheme '{scheme}'")]
    DriverLoad {
        /// URLスキーム
        scheme: String,
    },

    /// Backend connection error
    #[error("Failed to connect to the {service} database at \"{url}\" with the username \"{user}\"")]
    ConnectionFailure {
        /// サービス名
        service: String,
        /// 接続先URL（環境変数の値そのもの）
        url: String,
        /// 接続ユーザー
        user: String,
        /// 原因
        #[source]
        source: sqlx::Error,
    },

    /// Read query failed
    #[error("SQL statement [{sql}] failed")]
    QueryError {
        /// 失敗したSQL
        sql: String,
        /// 原因
        #[source]
        source: sqlx::Error,
    },

    /// DDL resource does not exist
    #[error("DDL script {resource} was not found in {}", .root.display())]
    ScriptNotFound {
        /// リソース名（例: `drop-orders-db.ddl`）
        resource: String,
        /// リソースルート
        root: PathBuf,
    },

    /// DDL resource exists but could not be read
    #[error("Failed to read DDL script {resource} (cause: {cause})")]
    ScriptRead {
        /// リソース名
        resource: String,
        /// エラー原因
        cause: String,
    },

    /// Create-phase statement failed
    #[error("Create statement [{statement}] for service {service} failed")]
    DdlExecution {
        /// サービス名
        service: String,
        /// 失敗したSQL文
        statement: String,
        /// 原因
        #[source]
        source: sqlx::Error,
    },
}

impl ProvisionError {
    /// スキーマ検証エラーかどうか
    pub fn is_schema_validation(&self) -> bool {
        matches!(self, ProvisionError::SchemaValidation { .. })
    }

    /// フィールド検証による構築失敗かどうか
    pub fn is_deserialization(&self) -> bool {
        matches!(self, ProvisionError::Deserialization { .. })
    }

    /// サービス未定義エラーかどうか
    pub fn is_service_not_found(&self) -> bool {
        matches!(self, ProvisionError::ServiceNotFound { .. })
    }

    /// 環境変数未設定エラーかどうか
    pub fn is_environment_variable_missing(&self) -> bool {
        matches!(self, ProvisionError::EnvironmentVariableMissing { .. })
    }

    /// ドライバー読み込みエラーかどうか
    pub fn is_driver_load(&self) -> bool {
        matches!(self, ProvisionError::DriverLoad { .. })
    }

    /// 接続エラーかどうか
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, ProvisionError::ConnectionFailure { .. })
    }

    /// クエリエラーかどうか
    pub fn is_query_error(&self) -> bool {
        matches!(self, ProvisionError::QueryError { .. })
    }

    /// DDLスクリプト未検出エラーかどうか
    pub fn is_script_not_found(&self) -> bool {
        matches!(self, ProvisionError::ScriptNotFound { .. })
    }

    /// DDL実行エラーかどうか
    pub fn is_ddl_execution(&self) -> bool {
        matches!(self, ProvisionError::DdlExecution { .. })
    }

    /// 構築失敗の原因となった検証エラーを取得
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            ProvisionError::Deserialization { source } => Some(source),
            _ => None,
        }
    }
}
