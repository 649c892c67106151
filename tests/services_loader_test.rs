/// サービス定義ファイル読み込みのテスト
///
/// スキーマ検証、フィールド検証、OSごとの環境変数名規則を確認します。

#[cfg(test)]
mod services_loader_tests {
    use std::fs;
    use svcdb::core::env_name::{EnvNameValidator, OsFamily};
    use svcdb::core::error::ProvisionError;
    use svcdb::core::registry::ServiceRegistry;
    use svcdb::services::config_loader::ServicesLoader;
    use tempfile::TempDir;

    fn loader(os: OsFamily) -> ServicesLoader {
        ServicesLoader::new(EnvNameValidator::new(os)).unwrap()
    }

    fn service_yaml(name: &str, url: &str, user: &str, password: &str) -> String {
        format!(
            "services:\n  - name: \"{}\"\n    db-url-env: \"{}\"\n    db-user-env: \"{}\"\n    db-password-env: \"{}\"\n",
            name, url, user, password
        )
    }

    fn field_error(error: &ProvisionError) -> &svcdb::core::error::ValidationError {
        error
            .validation_error()
            .unwrap_or_else(|| panic!("expected a field validation error, got {}", error))
    }

    #[test]
    fn test_load_two_services_in_order() {
        let yaml = r#"
services:
  - name: orders
    db-url-env: ORDERS_DB_URL
    db-user-env: ORDERS_DB_USER
    db-password-env: ORDERS_DB_PASSWORD
  - name: billing
    db-url-env: BILLING_DB_URL
    db-user-env: BILLING_DB_USER
    db-password-env: BILLING_DB_PASSWORD
"#;

        let registry = loader(OsFamily::Posix).load(yaml).unwrap();

        let names: Vec<&str> = registry.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["orders", "billing"]);

        let billing = registry.find("billing").unwrap();
        assert_eq!(billing.url_variable(), "BILLING_DB_URL");
        assert_eq!(billing.user_variable(), "BILLING_DB_USER");
        assert_eq!(billing.password_variable(), "BILLING_DB_PASSWORD");
    }

    #[test]
    fn test_unknown_service() {
        let registry = loader(OsFamily::Posix)
            .load(&service_yaml("orders", "A_URL", "A_USER", "A_PASS"))
            .unwrap();

        let error = registry.find("unknown-service").unwrap_err();
        assert!(error.is_service_not_found());
        assert!(error.to_string().contains("unknown-service"));
    }

    #[test]
    fn test_lowercase_variable_depends_on_os() {
        let yaml = service_yaml("orders", "orders_db_url", "ORDERS_DB_USER", "ORDERS_DB_PASSWORD");

        assert!(loader(OsFamily::Posix).load(&yaml).is_ok());

        let error = loader(OsFamily::Windows).load(&yaml).unwrap_err();
        assert!(error.is_deserialization());
        let field = field_error(&error);
        assert!(field.is_invalid_environment_name());
        assert_eq!(field.field, "db-url-env");
        assert!(error.to_string().contains("orders_db_url"));
    }

    #[test]
    fn test_single_character_variable_is_rejected() {
        let yaml = service_yaml("orders", "A", "ORDERS_DB_USER", "ORDERS_DB_PASSWORD");

        let error = loader(OsFamily::Posix).load(&yaml).unwrap_err();
        assert!(field_error(&error).is_invalid_environment_name());
    }

    #[test]
    fn test_blank_and_whitespace_fields() {
        let blank = service_yaml("   ", "A_URL", "A_USER", "A_PASS");
        let error = loader(OsFamily::Posix).load(&blank).unwrap_err();
        let field = field_error(&error);
        assert!(field.is_blank());
        assert_eq!(field.field, "name");

        let empty = service_yaml("orders", "A_URL", "", "A_PASS");
        let error = loader(OsFamily::Posix).load(&empty).unwrap_err();
        let field = field_error(&error);
        assert!(field.is_empty());
        assert_eq!(field.field, "db-user-env");

        let padded = service_yaml("orders", "A_URL", "A_USER", " A_PASS");
        let error = loader(OsFamily::Posix).load(&padded).unwrap_err();
        let field = field_error(&error);
        assert!(field.is_whitespace());
        assert_eq!(field.field, "db-password-env");
    }

    #[test]
    fn test_first_invalid_entry_stops_loading() {
        let yaml = r#"
services:
  - name: orders
    db-url-env: "bad name"
    db-user-env: ORDERS_DB_USER
    db-password-env: ORDERS_DB_PASSWORD
  - name: billing
    db-url-env: BILLING_DB_URL
    db-user-env: ""
    db-password-env: BILLING_DB_PASSWORD
"#;

        let error = loader(OsFamily::Posix).load(yaml).unwrap_err();
        let field = field_error(&error);
        assert_eq!(field.service.as_deref(), Some("orders"));
        assert!(field.is_invalid_environment_name());
    }

    #[test]
    fn test_missing_field_fails_schema_validation() {
        let yaml = r#"
services:
  - name: orders
    db-url-env: ORDERS_DB_URL
    db-user-env: ORDERS_DB_USER
"#;

        let error = loader(OsFamily::Posix).load(yaml).unwrap_err();
        assert!(error.is_schema_validation());
        assert!(error.to_string().contains("db-password-env"));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("services.yaml");
        fs::write(&path, service_yaml("orders", "A_URL", "A_USER", "A_PASS")).unwrap();

        let registry = loader(OsFamily::Posix).load_file(&path).unwrap();
        assert_eq!(registry.len(), 1);

        let error = loader(OsFamily::Posix)
            .load_file(&temp_dir.path().join("missing.yaml"))
            .unwrap_err();
        assert!(matches!(error, ProvisionError::ConfigRead { .. }));
    }

    #[test]
    fn test_from_str_uses_current_os() {
        let registry: ServiceRegistry = service_yaml("orders", "A_URL", "A_USER", "A_PASS")
            .parse()
            .unwrap();
        assert_eq!(registry.entries()[0].name(), "orders");
    }
}
