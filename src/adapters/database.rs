// データベースセッションアダプター
//
// 1サービス分のデータベース接続を所有し、存在確認とクリーン（drop → create）を行います。
// 接続は open() が返す Session ハンドルだけが所有し、close() で必ず解放します。
// close() を経ずにハンドルが破棄された場合も、Drop で接続は解放されます。
//
// 文は1つずつ順番に実行し、並行実行はしません。

use crate::adapters::connection_string::{build_connection_string, detect_dialect, redact_password};
use crate::adapters::ddl_script::{DdlAction, DdlScriptLoader};
use crate::adapters::sql_quote::render_identifier;
use crate::core::config::Dialect;
use crate::core::error::ProvisionError;
use crate::core::service::ServiceEntry;
use sqlx::{AnyConnection, Connection};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 存在確認クエリで比較する値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnValue {
    Integer(i64),
    Text(String),
}

impl ColumnValue {
    /// 整数として解釈できれば整数、そうでなければ文字列
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i64>()
            .map(ColumnValue::Integer)
            .unwrap_or_else(|_| ColumnValue::Text(raw.to_string()))
    }
}

impl From<i64> for ColumnValue {
    fn from(value: i64) -> Self {
        ColumnValue::Integer(value)
    }
}

impl From<i32> for ColumnValue {
    fn from(value: i32) -> Self {
        ColumnValue::Integer(i64::from(value))
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(value: String) -> Self {
        ColumnValue::Text(value)
    }
}

impl std::fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnValue::Integer(value) => write!(f, "{}", value),
            ColumnValue::Text(value) => write!(f, "'{}'", value),
        }
    }
}

/// 開いているセッション数のカウンター
///
/// クローン間で同じカウントを共有します。
#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    active: Arc<AtomicUsize>,
}

impl SessionTracker {
    /// 新しいカウンターを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 現在開いているセッション数
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    fn lease(&self) -> SessionLease {
        self.active.fetch_add(1, Ordering::SeqCst);
        SessionLease {
            tracker: self.clone(),
        }
    }
}

/// セッションの生存期間中だけカウントを保持する
#[derive(Debug)]
struct SessionLease {
    tracker: SessionTracker,
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        self.tracker.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// drop フェーズで失敗した文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementFailure {
    /// 失敗したSQL文
    pub statement: String,
    /// バックエンドのエラーメッセージ
    pub error: String,
}

/// クリーン結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanReport {
    /// サービス名
    pub service: String,
    /// 成功した drop 文の数
    pub drop_executed: usize,
    /// 失敗して読み飛ばした drop 文
    pub drop_failures: Vec<StatementFailure>,
    /// 成功した create 文の数
    pub create_executed: usize,
}

impl CleanReport {
    fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
            drop_executed: 0,
            drop_failures: Vec::new(),
            create_executed: 0,
        }
    }

    /// drop フェーズで警告が出たかどうか
    pub fn has_warnings(&self) -> bool {
        !self.drop_failures.is_empty()
    }
}

/// スクリプトの1行を実行用の文に整形
///
/// 末尾の空白と `;` を取り除きます。空行は文として扱いません。
pub fn normalize_statement(line: &str) -> Option<&str> {
    let statement = line.trim_end().trim_end_matches(';').trim_end();
    if statement.trim().is_empty() {
        None
    } else {
        Some(statement)
    }
}

/// 開いているデータベースセッション
///
/// 1つの接続を所有します。文の実行には `&mut self` が必要なため、
/// 同じセッションを複数の呼び出し元から同時に使うことはできません。
pub struct Session {
    service: String,
    dialect: Dialect,
    connection: AnyConnection,
    lease: SessionLease,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("service", &self.service)
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// サービス名
    pub fn service(&self) -> &str {
        &self.service
    }

    /// 接続先の方言
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// 文を1つ実行
    pub async fn execute(&mut self, statement: &str) -> Result<(), sqlx::Error> {
        sqlx::query(statement)
            .execute(&mut self.connection)
            .await
            .map(|_| ())
    }

    /// `column = value` の行が1行以上あるかどうか
    pub async fn query_exists(
        &mut self,
        table: &str,
        column: &str,
        value: &ColumnValue,
    ) -> Result<bool, ProvisionError> {
        let column = render_identifier(self.dialect, column);
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = {}",
            column,
            render_identifier(self.dialect, table),
            column,
            self.dialect.placeholder(1)
        );

        let query = sqlx::query(&sql);
        let query = match value {
            ColumnValue::Integer(value) => query.bind(*value),
            ColumnValue::Text(value) => query.bind(value.as_str()),
        };

        let row = query
            .fetch_optional(&mut self.connection)
            .await
            .map_err(|source| ProvisionError::QueryError {
                sql: sql.clone(),
                source,
            })?;

        debug!(service = %self.service, sql = %sql, value = %value, found = row.is_some(), "Existence query");
        Ok(row.is_some())
    }

    /// drop スクリプト、create スクリプトの順に実行
    ///
    /// drop の失敗は警告として記録して続行し、create の失敗は即座に中断します。
    pub async fn run_clean(
        &mut self,
        drop_script: &[String],
        create_script: &[String],
    ) -> Result<CleanReport, ProvisionError> {
        let mut report = CleanReport::new(&self.service);

        for statement in drop_script.iter().filter_map(|line| normalize_statement(line)) {
            match self.execute(statement).await {
                Ok(()) => report.drop_executed += 1,
                Err(e) => {
                    warn!(
                        service = %self.service,
                        statement = %statement,
                        error = %e,
                        "Drop statement failed, continuing"
                    );
                    report.drop_failures.push(StatementFailure {
                        statement: statement.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        for statement in create_script.iter().filter_map(|line| normalize_statement(line)) {
            self.execute(statement)
                .await
                .map_err(|source| ProvisionError::DdlExecution {
                    service: self.service.clone(),
                    statement: statement.to_string(),
                    source,
                })?;
            report.create_executed += 1;
        }

        Ok(report)
    }

    /// 接続を解放
    ///
    /// 解放の失敗は警告としてログに出すだけで、呼び出し元には返しません。
    pub async fn close(self) {
        let Session {
            service,
            connection,
            lease,
            ..
        } = self;

        if let Err(e) = connection.close().await {
            warn!(service = %service, error = %e, "Closing the database connection failed");
        }

        drop(lease);
        debug!(service = %service, "Database session closed");
    }
}

/// サービス単位のデータベースセッション
///
/// ServiceEntry を借用し、操作ごとに Session を開いて必ず閉じます。
#[derive(Debug, Clone)]
pub struct DatabaseSession<'a> {
    entry: &'a ServiceEntry,
    tracker: SessionTracker,
}

impl<'a> DatabaseSession<'a> {
    /// 新しいDatabaseSessionを作成
    pub fn new(entry: &'a ServiceEntry) -> Self {
        Self::with_tracker(entry, SessionTracker::new())
    }

    /// セッション数カウンターを共有してDatabaseSessionを作成
    pub fn with_tracker(entry: &'a ServiceEntry, tracker: SessionTracker) -> Self {
        Self { entry, tracker }
    }

    /// 対象のサービス定義
    pub fn entry(&self) -> &ServiceEntry {
        self.entry
    }

    /// 現在開いているセッション数
    pub fn active_sessions(&self) -> usize {
        self.tracker.active()
    }

    /// 接続を開く
    ///
    /// 環境変数はこの時点で読み込みます。
    ///
    /// # Errors
    ///
    /// - URL・ユーザー・パスワードのいずれかの環境変数が未設定の場合
    /// - URLスキームに対応するドライバーがない場合
    /// - 接続に失敗した場合（URLとユーザーを含み、パスワードは含まない）
    pub async fn open(&self) -> Result<Session, ProvisionError> {
        let service = self.entry.name();
        let url = self.entry.resolve_url()?;
        let user = self.entry.resolve_user()?;
        let password = self.entry.resolve_password()?;

        let dialect = detect_dialect(&url)?;
        sqlx::any::install_default_drivers();

        let connection_string = build_connection_string(dialect, &url, &user, &password);
        let connection = AnyConnection::connect(&connection_string)
            .await
            .map_err(|source| ProvisionError::ConnectionFailure {
                service: service.to_string(),
                url: redact_password(&url),
                user: user.clone(),
                source,
            })?;

        debug!(service = %service, dialect = %dialect, user = %user, "Database session opened");

        Ok(Session {
            service: service.to_string(),
            dialect,
            connection,
            lease: self.tracker.lease(),
        })
    }

    /// `table` に `column = value` の行が存在するかどうか
    ///
    /// 接続を開き、クエリを実行し、結果にかかわらず接続を閉じてから返します。
    pub async fn exists(
        &self,
        table: &str,
        column: &str,
        value: impl Into<ColumnValue>,
    ) -> Result<bool, ProvisionError> {
        let value = value.into();
        let mut session = self.open().await?;
        let result = session.query_exists(table, column, &value).await;
        session.close().await;
        result
    }

    /// データベースを削除して再作成
    ///
    /// drop と create の両スクリプトを読み込んでから接続を開き、
    /// 結果にかかわらず接続を閉じてから返します。
    pub async fn clean(&self, scripts: &DdlScriptLoader) -> Result<CleanReport, ProvisionError> {
        let service = self.entry.name();
        let drop_script = scripts.load(DdlAction::Drop, service)?;
        let create_script = scripts.load(DdlAction::Create, service)?;

        let mut session = self.open().await?;
        let result = session.run_clean(&drop_script, &create_script).await;
        session.close().await;

        let report = result?;
        info!(
            service = %service,
            dropped = report.drop_executed,
            drop_warnings = report.drop_failures.len(),
            created = report.create_executed,
            "Successfully cleaned {}", service
        );

        Ok(report)
    }
}
