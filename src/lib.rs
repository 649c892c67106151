// svcdbライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（ユーザー入力の受付とコマンドルーティング）
// - core: コアドメインロジック（サービス定義の検証、レジストリ、エラー型）
// - adapters: データベースとDDLリソースへのアクセスを抽象化
// - services: 設定の読み込みとプロビジョニング操作

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;
