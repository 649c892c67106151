// サービス定義スキーマバリデーター
//
// ドメインオブジェクトを構築する前に、サービス定義ファイルの構造を
// 埋め込みのJSON Schemaで検証します。
// YAMLとして不正な文書、必須キーの欠落、未知のキー、重複キー、型違いを検出します。

use crate::core::error::ProvisionError;
use jsonschema::Validator;
use serde_json::Value;

/// 埋め込みのサービス定義スキーマ
pub const SERVICES_SCHEMA: &str = include_str!("../../schema/services.schema.json");

/// サービス定義スキーマバリデーター
///
/// スキーマは生成時に一度だけコンパイルします。
pub struct ConfigSchemaValidator {
    validator: Validator,
}

impl std::fmt::Debug for ConfigSchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSchemaValidator").finish_non_exhaustive()
    }
}

impl ConfigSchemaValidator {
    /// 埋め込みスキーマからバリデーターを作成
    pub fn new() -> Result<Self, ProvisionError> {
        let schema: Value =
            serde_json::from_str(SERVICES_SCHEMA).map_err(|e| ProvisionError::SchemaValidation {
                errors: vec![format!("Embedded services schema is not valid JSON: {}", e)],
            })?;

        let validator =
            jsonschema::validator_for(&schema).map_err(|e| ProvisionError::SchemaValidation {
                errors: vec![format!("Embedded services schema failed to compile: {}", e)],
            })?;

        Ok(Self { validator })
    }

    /// YAML文書を解析し、スキーマに適合することを検証
    ///
    /// # Returns
    ///
    /// 検証済みの文書（汎用の値表現）
    ///
    /// # Errors
    ///
    /// - YAMLとして解析できない場合（重複キーを含む）
    /// - スキーマに違反する場合（違反はすべて収集して返す）
    pub fn validate_text(&self, text: &str) -> Result<Value, ProvisionError> {
        let document: Value =
            serde_saphyr::from_str(text).map_err(|e| ProvisionError::SchemaValidation {
                errors: vec![format!("Malformed services document: {}", e)],
            })?;

        self.validate_value(&document)?;
        Ok(document)
    }

    /// 解析済みの文書がスキーマに適合することを検証
    pub fn validate_value(&self, document: &Value) -> Result<(), ProvisionError> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(document)
            .map(|error| error.to_string())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProvisionError::SchemaValidation { errors })
        }
    }
}
