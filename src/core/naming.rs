// 命名ポリシー
//
// バイナリ名と関連パスの単一ソースを提供します。

/// 既定のツール設定ファイル名
pub const CONFIG_FILE: &str = ".svcdb.yaml";

/// 既定のサービス定義ファイル名
pub const SERVICES_FILE: &str = "services.yaml";

/// 既定のDDLリソースディレクトリ
pub const DDL_DIR: &str = "ddl";

/// DDLスクリプトのファイル名サフィックス
pub const DDL_SUFFIX: &str = "-db.ddl";

/// バイナリ名
pub const BINARY_NAME: &str = "svcdb";
