// サービス定義
//
// 1サービス分のデータベース接続情報（サービス名と3つの環境変数名）を表現します。
// 設定ファイルからはまず素のレコード (ServiceRecord) として読み込み、
// 明示的な validate() を通過したものだけが ServiceEntry になります。

use crate::core::env_name::EnvNameValidator;
use crate::core::error::{FieldErrorKind, ProvisionError, ValidationError};
use serde::{Deserialize, Serialize};

/// サービス名フィールド
pub const NAME_FIELD: &str = "name";

/// 接続URLを保持する環境変数名フィールド
pub const URL_ENV_FIELD: &str = "db-url-env";

/// 接続ユーザーを保持する環境変数名フィールド
pub const USER_ENV_FIELD: &str = "db-user-env";

/// パスワードを保持する環境変数名フィールド
pub const PASSWORD_ENV_FIELD: &str = "db-password-env";

/// 設定ファイルから読み込んだままのサービスレコード
///
/// 各フィールドは未検証で、欠落も表現できるよう Option で保持します。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(rename = "db-url-env", default)]
    pub url_variable: Option<String>,

    #[serde(rename = "db-user-env", default)]
    pub user_variable: Option<String>,

    #[serde(rename = "db-password-env", default)]
    pub password_variable: Option<String>,
}

impl ServiceRecord {
    /// 全フィールドを指定してレコードを作成
    pub fn new(name: &str, url_variable: &str, user_variable: &str, password_variable: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            url_variable: Some(url_variable.to_string()),
            user_variable: Some(user_variable.to_string()),
            password_variable: Some(password_variable.to_string()),
        }
    }

    /// レコードを検証して ServiceEntry を構築
    ///
    /// name → db-url-env → db-user-env → db-password-env の順に検証し、
    /// 最初に見つかったエラーを返します。
    pub fn validate(&self, env_names: &EnvNameValidator) -> Result<ServiceEntry, ValidationError> {
        let name = check_field(NAME_FIELD, None, self.name.as_deref())?;
        let service = Some(name);

        let url_variable =
            check_environment_name(URL_ENV_FIELD, service, self.url_variable.as_deref(), env_names)?;
        let user_variable = check_environment_name(
            USER_ENV_FIELD,
            service,
            self.user_variable.as_deref(),
            env_names,
        )?;
        let password_variable = check_environment_name(
            PASSWORD_ENV_FIELD,
            service,
            self.password_variable.as_deref(),
            env_names,
        )?;

        Ok(ServiceEntry {
            name: name.to_string(),
            url_variable: url_variable.to_string(),
            user_variable: user_variable.to_string(),
            password_variable: password_variable.to_string(),
        })
    }
}

/// 検証済みのサービス定義
///
/// 4つのフィールドがすべて有効であることが保証されます。
/// 構築後は変更されません。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    name: String,
    url_variable: String,
    user_variable: String,
    password_variable: String,
}

impl ServiceEntry {
    /// サービス名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 接続URLを保持する環境変数名
    pub fn url_variable(&self) -> &str {
        &self.url_variable
    }

    /// 接続ユーザーを保持する環境変数名
    pub fn user_variable(&self) -> &str {
        &self.user_variable
    }

    /// パスワードを保持する環境変数名
    pub fn password_variable(&self) -> &str {
        &self.password_variable
    }

    /// 現在のプロセス環境から接続URLを取得
    pub fn resolve_url(&self) -> Result<String, ProvisionError> {
        resolve_variable(&self.url_variable)
    }

    /// 現在のプロセス環境から接続ユーザーを取得
    pub fn resolve_user(&self) -> Result<String, ProvisionError> {
        resolve_variable(&self.user_variable)
    }

    /// 現在のプロセス環境からパスワードを取得
    pub fn resolve_password(&self) -> Result<String, ProvisionError> {
        resolve_variable(&self.password_variable)
    }
}

/// 環境変数の値を取得する（キャッシュしない）
fn resolve_variable(variable: &str) -> Result<String, ProvisionError> {
    std::env::var(variable).map_err(|_| ProvisionError::EnvironmentVariableMissing {
        variable: variable.to_string(),
    })
}

/// フィールドが存在し、空でも空白のみでもなく、前後に空白がないことを検証
///
/// 欠落 → 空 → 空白のみ → 前後空白 の優先順位で判定します。
pub fn check_field<'a>(
    field: &str,
    service: Option<&str>,
    value: Option<&'a str>,
) -> Result<&'a str, ValidationError> {
    let value = match value {
        Some(value) => value,
        None => {
            return Err(ValidationError::new(field, service, None, FieldErrorKind::Missing));
        }
    };

    let kind = if value.is_empty() {
        Some(FieldErrorKind::Empty)
    } else if value.trim().is_empty() {
        Some(FieldErrorKind::Blank)
    } else if value.trim() != value {
        Some(FieldErrorKind::Whitespace)
    } else {
        None
    };

    match kind {
        Some(kind) => Err(ValidationError::new(field, service, Some(value), kind)),
        None => Ok(value),
    }
}

/// check_field に加えて環境変数名として有効であることを検証
pub fn check_environment_name<'a>(
    field: &str,
    service: Option<&str>,
    value: Option<&'a str>,
    env_names: &EnvNameValidator,
) -> Result<&'a str, ValidationError> {
    let value = check_field(field, service, value)?;

    if !env_names.is_valid(value) {
        return Err(ValidationError::new(
            field,
            service,
            Some(value),
            FieldErrorKind::InvalidEnvironmentName,
        ));
    }

    Ok(value)
}
