// 接続文字列ビルダー
//
// 環境変数から取得したURL・ユーザー・パスワードから、SQLxに渡す接続文字列を生成する。
// JDBC形式の `jdbc:` プレフィックスは取り除く。

use crate::core::config::Dialect;
use crate::core::error::ProvisionError;

const JDBC_PREFIX: &str = "jdbc:";
const PASSWORD_PARAMETER: &str = "password";

/// 接続先URLのスキームを取得
pub fn scheme(url: &str) -> Option<&str> {
    let url = url.strip_prefix(JDBC_PREFIX).unwrap_or(url);
    url.split_once(':').map(|(scheme, _)| scheme)
}

/// URLスキームから方言を判定
///
/// 対応するドライバーがないスキームは DriverLoad エラーになる。
pub fn detect_dialect(url: &str) -> Result<Dialect, ProvisionError> {
    let scheme = scheme(url).unwrap_or_default();
    Dialect::from_scheme(scheme).ok_or_else(|| ProvisionError::DriverLoad {
        scheme: scheme.to_string(),
    })
}

/// 接続文字列を生成
///
/// PostgreSQL / MySQL ではURLのユーザー情報を指定の認証情報で置き換える。
/// SQLite は認証情報を使わないため、URLをそのまま使用する。
pub fn build_connection_string(dialect: Dialect, url: &str, user: &str, password: &str) -> String {
    let url = url.strip_prefix(JDBC_PREFIX).unwrap_or(url);

    if !dialect.uses_credentials() {
        return url.to_string();
    }

    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    // ユーザー情報はホスト部分（最初の '/' まで）にのみ含まれる
    let (authority, path) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };
    let host = authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority);

    let auth = if password.is_empty() {
        urlencoding::encode(user).into_owned()
    } else {
        format!(
            "{}:{}",
            urlencoding::encode(user),
            urlencoding::encode(password)
        )
    };

    format!("{}://{}@{}{}", scheme, auth, host, path)
}

/// エラーメッセージ用にURL中のパスワードを伏せる
///
/// `user:password@` のユーザー情報と、`password=` クエリパラメータの両方を伏せる。
pub fn redact_password(url: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };

    let mut redacted = redact_user_info(base);
    if let Some(query) = query {
        redacted.push('?');
        redacted.push_str(&redact_query(query));
    }
    redacted
}

fn redact_user_info(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };

    let (authority, path) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };

    match authority.rsplit_once('@') {
        Some((user_info, host)) => match user_info.split_once(':') {
            Some((user, _)) => format!("{}://{}:***@{}{}", scheme, user, host, path),
            None => url.to_string(),
        },
        None => url.to_string(),
    }
}

fn redact_query(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if key.eq_ignore_ascii_case(PASSWORD_PARAMETER) => {
                format!("{}=***", key)
            }
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}
