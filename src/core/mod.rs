// Core Domain
// サービス定義の検証と構築、エラー型、ツール設定の純粋なドメインロジック

pub mod config;
pub mod env_name;
pub mod error;
pub mod naming;
pub mod registry;
pub mod service;
