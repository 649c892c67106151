// Services
// 設定ファイルの読み込みと検証、プロビジョニング操作の組み立て

pub mod config_loader;
pub mod config_schema;
pub mod provisioner;
