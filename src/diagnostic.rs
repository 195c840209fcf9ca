//! Diagnostics
//!
//! Collects path-tagged shape violations during a validation pass.
//! Nothing here aborts the pass: every problem in the document is reported.

use serde::Serialize;
use std::fmt;

use crate::path::SchemaPath;
use crate::rules::JsonKind;

// =============================================================================
// Diagnostic Codes
// =============================================================================

/// Diagnostic code for categorizing violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    /// A schema position holds something other than an object or boolean
    NotASchema,
    /// A keyword value (or an entry inside it) has the wrong JSON kind
    WrongKind,
    /// An array that must have at least one entry is empty
    EmptyArray,
    /// A uniqueness-constrained array repeats an entry
    DuplicateEntry,
    /// A `type` string is not one of the seven JSON Schema type names
    UnknownTypeName,
    /// A count keyword is negative
    NegativeValue,
    /// `multipleOf` is zero or negative
    NonPositiveValue,
    /// A regular expression does not compile
    InvalidPattern,
    /// Keyword outside the rule table, reported only in deny mode
    UnknownKeyword,
    /// Nesting went past the configured depth limit
    DepthExceeded,
    /// A `propertyNames` schema declares a type that excludes strings
    NonStringPropertyNames,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotASchema => "E001",
            Self::WrongKind => "E002",
            Self::EmptyArray => "E003",
            Self::DuplicateEntry => "E004",
            Self::UnknownTypeName => "E005",
            Self::NegativeValue => "E006",
            Self::NonPositiveValue => "E007",
            Self::InvalidPattern => "E008",
            Self::UnknownKeyword => "E009",
            Self::DepthExceeded => "E010",
            Self::NonStringPropertyNames => "E011",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A single shape or constraint violation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// JSON Pointer to the offending node
    ///
    /// A bad `patternProperties` key has no pointer of its own, so its path
    /// is the schema stored under that key and the message names the key.
    pub path: SchemaPath,
    /// Human-readable message
    pub message: String,
    /// Keyword being checked, if the violation belongs to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub code: DiagnosticCode,
}

impl Diagnostic {
    pub fn new(path: SchemaPath, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            keyword: None,
            code,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_pointer()
        };
        write!(f, "[{}] {}: {}", self.code, path, self.message)
    }
}

// =============================================================================
// Diagnostics Collection
// =============================================================================

/// Append-only collector owned by one validation pass
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic item
    pub fn push(&mut self, item: Diagnostic) {
        self.items.push(item);
    }

    /// Report a value whose JSON kind is not accepted by `keyword`
    pub fn wrong_kind(
        &mut self,
        path: &SchemaPath,
        keyword: &str,
        expected: &[JsonKind],
        actual: JsonKind,
    ) {
        self.push(
            Diagnostic::new(
                path.clone(),
                DiagnosticCode::WrongKind,
                format!(
                    "{} must be {}, found {}",
                    keyword,
                    JsonKind::describe_all(expected),
                    actual
                ),
            )
            .with_keyword(keyword),
        );
    }

    /// Report a violated secondary constraint on a keyword value
    pub fn constraint(
        &mut self,
        path: &SchemaPath,
        keyword: &str,
        code: DiagnosticCode,
        message: impl Into<String>,
    ) {
        self.push(Diagnostic::new(path.clone(), code, message).with_keyword(keyword));
    }

    /// Report a schema position that is neither an object nor a boolean
    pub fn not_a_schema(&mut self, path: &SchemaPath, actual: JsonKind) {
        self.push(Diagnostic::new(
            path.clone(),
            DiagnosticCode::NotASchema,
            format!("schema must be an object or boolean, found {}", actual),
        ));
    }

    pub fn all(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Close the pass and produce its result
    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            valid: self.items.is_empty(),
            diagnostics: self.items,
        }
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Outcome of validating one schema document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Diagnostics attached to one JSON Pointer
    pub fn at<'a>(&'a self, pointer: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |d| d.path.to_pointer() == pointer)
    }

    /// Format all diagnostics for display
    pub fn format_all(&self) -> String {
        let mut output = String::new();
        for item in &self.diagnostics {
            output.push_str(&format!("{}\n", item));
        }
        if !self.valid {
            output.push_str(&format!("\n{} problem(s)\n", self.diagnostics.len()));
        }
        output
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_all())
    }
}
