// 環境変数名バリデーター
//
// ホストOSで有効な環境変数名かどうかを判定します。
// OS種別はプロセス起動時に一度だけ判定し、バリデーターに値として渡します。

use regex::Regex;

/// Windows: 大文字またはアンダースコアで始まり、大文字・数字・アンダースコアが1文字以上続く
const WINDOWS_PATTERN: &str = r"^[A-Z_][A-Z0-9_]+$";

/// POSIX (Linux / macOS): 英字の大文字小文字を区別しない以外はWindowsと同じ
const POSIX_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]+$";

/// OSファミリー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Windows,
    Posix,
}

impl OsFamily {
    /// ビルド対象のOSファミリーを判定
    pub fn detect() -> Self {
        if cfg!(windows) {
            OsFamily::Windows
        } else {
            OsFamily::Posix
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            OsFamily::Windows => WINDOWS_PATTERN,
            OsFamily::Posix => POSIX_PATTERN,
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsFamily::Windows => write!(f, "windows"),
            OsFamily::Posix => write!(f, "posix"),
        }
    }
}

/// 環境変数名バリデーター
#[derive(Debug, Clone)]
pub struct EnvNameValidator {
    os: OsFamily,
    pattern: Regex,
}

impl EnvNameValidator {
    /// 指定したOSファミリー用のバリデーターを作成
    pub fn new(os: OsFamily) -> Self {
        // パターンは定数なのでコンパイルは失敗しない
        let pattern = Regex::new(os.pattern()).expect("environment variable pattern is valid");
        Self { os, pattern }
    }

    /// 実行中のOS用のバリデーターを作成
    pub fn for_current_os() -> Self {
        Self::new(OsFamily::detect())
    }

    /// 対象のOSファミリー
    pub fn os(&self) -> OsFamily {
        self.os
    }

    /// 環境変数名として有効かどうか
    pub fn is_valid(&self, candidate: &str) -> bool {
        self.pattern.is_match(candidate)
    }
}

impl Default for EnvNameValidator {
    fn default() -> Self {
        Self::for_current_os()
    }
}
