// Adapters
// データベースとDDLリソースへのアクセスを抽象化

pub mod connection_string;
pub mod database;
pub mod ddl_script;
pub mod sql_quote;
