// SQL識別子クォートユーティリティ
//
// 各データベース方言用の識別子クォート関数を提供します。

use crate::core::config::Dialect;

/// 方言に応じて識別子をクォート
///
/// 識別子内のクォート文字は二重にエスケープします。
///
/// # Examples
/// ```
/// use svcdb::adapters::sql_quote::quote_identifier;
/// use svcdb::core::config::Dialect;
/// assert_eq!(quote_identifier(Dialect::PostgreSQL, "orders"), r#""orders""#);
/// assert_eq!(quote_identifier(Dialect::MySQL, "order`s"), "`order``s`");
/// ```
pub fn quote_identifier(dialect: Dialect, name: &str) -> String {
    match dialect {
        Dialect::PostgreSQL | Dialect::SQLite => format!("\"{}\"", name.replace('"', "\"\"")),
        Dialect::MySQL => format!("`{}`", name.replace('`', "``")),
    }
}

/// クエリに埋め込む識別子を整形
///
/// `.` で区切った各部分のうち、英数字と `_` だけの通常の識別子はそのまま残し、
/// 大文字小文字の扱いはデータベースに任せます。それ以外の部分だけをクォートします。
///
/// # Examples
/// ```
/// use svcdb::adapters::sql_quote::render_identifier;
/// use svcdb::core::config::Dialect;
/// assert_eq!(render_identifier(Dialect::PostgreSQL, "public.Orders"), "public.Orders");
/// assert_eq!(render_identifier(Dialect::MySQL, "shop.order lines"), "shop.`order lines`");
/// ```
pub fn render_identifier(dialect: Dialect, name: &str) -> String {
    name.split('.')
        .map(|part| {
            if is_plain_identifier(part) {
                part.to_string()
            } else {
                quote_identifier(dialect, part)
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn is_plain_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_identifier_postgres() {
        assert_eq!(quote_identifier(Dialect::PostgreSQL, "orders"), r#""orders""#);
        assert_eq!(
            quote_identifier(Dialect::PostgreSQL, r#"order"s"#),
            r#""order""s""#
        );
    }

    #[test]
    fn test_quote_identifier_mysql() {
        assert_eq!(quote_identifier(Dialect::MySQL, "orders"), "`orders`");
    }

    #[test]
    fn test_quote_identifier_sqlite() {
        assert_eq!(quote_identifier(Dialect::SQLite, "orders"), r#""orders""#);
    }

    #[test]
    fn test_render_identifier_plain_names_pass_through() {
        assert_eq!(render_identifier(Dialect::PostgreSQL, "orders"), "orders");
        assert_eq!(render_identifier(Dialect::PostgreSQL, "Orders"), "Orders");
        assert_eq!(render_identifier(Dialect::SQLite, "_tmp1"), "_tmp1");
    }

    #[test]
    fn test_render_identifier_schema_qualified() {
        assert_eq!(render_identifier(Dialect::PostgreSQL, "public.orders"), "public.orders");
        assert_eq!(render_identifier(Dialect::SQLite, "main.orders"), "main.orders");
    }

    #[test]
    fn test_render_identifier_quotes_unusual_parts() {
        assert_eq!(
            render_identifier(Dialect::PostgreSQL, "public.order lines"),
            r#"public."order lines""#
        );
        assert_eq!(
            render_identifier(Dialect::SQLite, r#"x"; DROP TABLE orders; --"#),
            r#""x""; DROP TABLE orders; --""#
        );
        assert_eq!(render_identifier(Dialect::MySQL, "1st"), "`1st`");
        assert_eq!(render_identifier(Dialect::MySQL, "shop."), "shop.``");
    }
}
