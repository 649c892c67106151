// コマンドハンドラー層
// 各CLIコマンドの実装

pub mod clean;
pub mod exists;
pub mod list;
pub mod validate;
