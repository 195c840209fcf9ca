//! JSON Schema Meta-Schema Linter
//!
//! Checks that a JSON document is a well-formed JSON Schema (Draft 2020-12
//! subset). It does not validate instance data; it validates the schema
//! itself: keyword value kinds, value constraints, and every nested schema
//! position, all in one pass.
//!
//! ## Features
//!
//! - **Complete Reports**: All problems are collected; nothing stops at the first one
//! - **JSON Pointer Paths**: Each diagnostic points at the node that caused it
//! - **Permissive by Default**: Unknown keywords are accepted unless denied in config
//! - **Depth Guard**: Adversarially deep documents are reported, not overflowed
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//!
//! let result = metaschema_lint::validate(&json!({
//!     "type": "object",
//!     "properties": { "age": { "minimum": "zero" } }
//! }));
//!
//! assert!(!result.valid);
//! assert_eq!(result.diagnostics[0].path.to_pointer(), "/properties/age/minimum");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! loader ──► SchemaValidator::validate
//!                 │
//!                 ▼
//!            walker (schema positions) ◄──┐
//!                 │                       │ nested schemas
//!                 ▼                       │
//!            rules table ──► checkers ────┘
//!                 │
//!                 ▼
//!            Diagnostics ──► ValidationResult
//! ```

mod checkers;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod loader;
pub mod path;
pub mod rules;
pub mod walker;

pub use config::{OutputFormat, ValidatorConfig};
pub use diagnostic::{Diagnostic, DiagnosticCode, Diagnostics, ValidationResult};
pub use error::{Result, SchemaError};
pub use loader::{FileOutcome, FileReport};
pub use path::{PathSegment, SchemaPath};
pub use rules::{lookup_rule, JsonKind, KeywordRule};
pub use walker::{SchemaValidator, UnknownKeywordPolicy, ValidatorOptions};

use serde::Serialize;

/// Validate a schema document with default options
pub fn validate(schema: &serde_json::Value) -> ValidationResult {
    SchemaValidator::default().validate(schema)
}

/// Validate any serializable value as a schema document.
///
/// Fails with [`SchemaError::InvalidInput`] when `schema` has no JSON
/// representation, such as a map keyed by tuples. That is a caller bug, not a
/// problem with the schema, so it is not reported as a diagnostic.
pub fn validate_serializable<T: Serialize + ?Sized>(schema: &T) -> Result<ValidationResult> {
    let value =
        serde_json::to_value(schema).map_err(|e| SchemaError::InvalidInput(e.to_string()))?;
    Ok(validate(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_validate_serializable_map() {
        let mut schema = BTreeMap::new();
        schema.insert("type", "bogus");
        let result = validate_serializable(&schema).unwrap();
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].path.to_pointer(), "/type");
    }

    #[test]
    fn test_non_string_keys_are_a_contract_violation() {
        let mut schema = BTreeMap::new();
        schema.insert((1, 2), true);
        let err = validate_serializable(&schema).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidInput(_)));
    }

    #[test]
    fn test_idempotent() {
        let schema = json!({
            "type": ["string", "string"],
            "properties": { "a": { "pattern": "(" } },
            "enum": []
        });
        assert_eq!(validate(&schema), validate(&schema));
    }

    #[test]
    fn test_validator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaValidator>();

        let validator = std::sync::Arc::new(SchemaValidator::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let validator = validator.clone();
                std::thread::spawn(move || validator.validate(&json!({ "minLength": -i })).valid)
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false, false, false]);
    }
}
