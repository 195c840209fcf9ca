//! Schema walker
//!
//! Depth-first traversal of a schema document. Every schema position, the
//! root included, is checked against the same keyword table.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::checkers;
use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics, ValidationResult};
use crate::path::SchemaPath;
use crate::rules::{lookup_rule, JsonKind};

/// Default limit on nested schema positions
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// What to do with keywords that have no rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeywordPolicy {
    /// Accept silently; JSON Schema allows extension and future keywords
    #[default]
    Allow,
    /// Report each one as a diagnostic
    Deny,
}

/// Knobs for a validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Schema positions nested deeper than this are reported, not walked
    pub max_depth: usize,
    pub unknown_keywords: UnknownKeywordPolicy,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            unknown_keywords: UnknownKeywordPolicy::Allow,
        }
    }
}

/// Meta-schema conformance checker
///
/// Holds only read-only options, so one instance can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    options: ValidatorOptions,
}

impl SchemaValidator {
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Walk `schema` and collect every shape violation in it
    pub fn validate(&self, schema: &Value) -> ValidationResult {
        let mut pass = Pass {
            options: &self.options,
            diagnostics: Diagnostics::new(),
        };
        pass.walk(schema, &SchemaPath::root(), 0);

        let result = pass.diagnostics.finish();
        debug!(
            valid = result.valid,
            diagnostics = result.diagnostics.len(),
            "schema validation finished"
        );
        result
    }
}

/// State of one validation call
pub(crate) struct Pass<'a> {
    options: &'a ValidatorOptions,
    pub(crate) diagnostics: Diagnostics,
}

impl Pass<'_> {
    /// Check the schema at `path`; `depth` counts enclosing schema positions
    pub(crate) fn walk(&mut self, node: &Value, path: &SchemaPath, depth: usize) {
        if depth > self.options.max_depth {
            warn!(path = %path, max_depth = self.options.max_depth, "schema nesting too deep");
            self.diagnostics.push(Diagnostic::new(
                path.clone(),
                DiagnosticCode::DepthExceeded,
                format!(
                    "schema nesting exceeds the maximum depth of {}",
                    self.options.max_depth
                ),
            ));
            return;
        }

        let map = match node {
            // true/false schemas have no keywords
            Value::Bool(_) => return,
            Value::Object(map) => map,
            other => {
                self.diagnostics.not_a_schema(path, JsonKind::of(other));
                return;
            }
        };

        for (keyword, value) in map {
            let keyword_path = path.key(keyword.as_str());
            match lookup_rule(keyword) {
                Some(rule) => {
                    trace!(keyword = %keyword, path = %keyword_path, "checking keyword");
                    checkers::check_keyword(self, rule, value, &keyword_path, depth);
                }
                None => self.unknown_keyword(keyword, &keyword_path),
            }
        }
    }

    fn unknown_keyword(&mut self, keyword: &str, path: &SchemaPath) {
        match self.options.unknown_keywords {
            UnknownKeywordPolicy::Allow => {
                trace!(keyword = %keyword, path = %path, "ignoring unknown keyword");
            }
            UnknownKeywordPolicy::Deny => self.diagnostics.push(
                Diagnostic::new(
                    path.clone(),
                    DiagnosticCode::UnknownKeyword,
                    format!("unknown keyword '{}'", keyword),
                )
                .with_keyword(keyword),
            ),
        }
    }
}
