//! Keyword rule table
//!
//! One entry per supported Draft 2020-12 keyword: which JSON kinds its value
//! may take, which extra constraint applies, and where nested schemas live
//! inside the value. The table is static data and is never mutated.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// JSON kind of a value, with integral numbers reported as `Integer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonKind {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    Integer,
    String,
}

/// The seven names accepted by the `type` keyword
pub const TYPE_NAMES: [&str; 7] = [
    "null", "boolean", "object", "array", "number", "string", "integer",
];

impl JsonKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
            Value::String(_) => Self::String,
            Value::Number(n) => {
                let integral = n.is_i64()
                    || n.is_u64()
                    || n.as_f64().map(|f| f.is_finite() && f.fract() == 0.0).unwrap_or(false);
                if integral {
                    Self::Integer
                } else {
                    Self::Number
                }
            }
        }
    }

    /// Whether a value of kind `actual` satisfies this expected kind
    pub fn accepts(&self, actual: JsonKind) -> bool {
        *self == actual || (*self == Self::Number && actual == Self::Integer)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
        }
    }

    fn with_article(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Object | Self::Array | Self::Integer => format!("an {}", self.name()),
            _ => format!("a {}", self.name()),
        }
    }

    /// "a boolean or an object"
    pub fn describe_all(kinds: &[JsonKind]) -> String {
        if kinds == ANY {
            return "any JSON value".to_string();
        }
        kinds
            .iter()
            .map(|k| k.with_article())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Secondary constraint applied once the value kind is right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Type name or non-empty array of unique type names
    TypeNames,
    /// Array must have at least one entry
    NonEmpty,
    /// Array of strings without repeats
    UniqueStrings,
    /// Number strictly greater than zero
    Positive,
    /// Integer zero or greater
    NonNegative,
    /// String compiles as a regular expression
    Regex,
    /// Every object key compiles as a regular expression
    RegexKeys,
    /// Object whose values are arrays of unique strings
    DependentRequired,
    /// Schema whose `type`, when present, admits strings
    StringSchema,
}

/// Where nested schema positions sit inside a keyword value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nested {
    None,
    /// The value itself is a schema
    Schema,
    /// Every value of the object is a schema
    EachValue,
    /// Every element of the array is a schema
    EachElement,
}

/// Static description of one keyword
#[derive(Debug)]
pub struct KeywordRule {
    pub keyword: &'static str,
    pub kinds: &'static [JsonKind],
    pub constraint: Option<Constraint>,
    pub nested: Nested,
}

const ANY: &[JsonKind] = &[
    JsonKind::Null,
    JsonKind::Boolean,
    JsonKind::Object,
    JsonKind::Array,
    JsonKind::Number,
    JsonKind::String,
];
const SCHEMA: &[JsonKind] = &[JsonKind::Boolean, JsonKind::Object];
const OBJECT: &[JsonKind] = &[JsonKind::Object];
const ARRAY: &[JsonKind] = &[JsonKind::Array];
const NUMBER: &[JsonKind] = &[JsonKind::Number];
const INTEGER: &[JsonKind] = &[JsonKind::Integer];
const STRING: &[JsonKind] = &[JsonKind::String];
const BOOLEAN: &[JsonKind] = &[JsonKind::Boolean];

const fn rule(
    keyword: &'static str,
    kinds: &'static [JsonKind],
    constraint: Option<Constraint>,
    nested: Nested,
) -> KeywordRule {
    KeywordRule {
        keyword,
        kinds,
        constraint,
        nested,
    }
}

/// Every keyword with a shape rule; anything else is unknown
pub static KEYWORD_RULES: &[KeywordRule] = &[
    // Validation: any type
    rule("type", &[JsonKind::String, JsonKind::Array], Some(Constraint::TypeNames), Nested::None),
    rule("enum", ARRAY, Some(Constraint::NonEmpty), Nested::None),
    rule("const", ANY, None, Nested::None),
    // Applicators: objects
    rule("properties", OBJECT, None, Nested::EachValue),
    rule("patternProperties", OBJECT, Some(Constraint::RegexKeys), Nested::EachValue),
    rule("additionalProperties", SCHEMA, None, Nested::Schema),
    rule("propertyNames", SCHEMA, Some(Constraint::StringSchema), Nested::Schema),
    rule("dependentSchemas", OBJECT, None, Nested::EachValue),
    rule("unevaluatedProperties", SCHEMA, None, Nested::Schema),
    // Applicators: arrays
    rule("prefixItems", ARRAY, Some(Constraint::NonEmpty), Nested::EachElement),
    rule("items", SCHEMA, None, Nested::Schema),
    rule("contains", SCHEMA, None, Nested::Schema),
    rule("unevaluatedItems", SCHEMA, None, Nested::Schema),
    // Applicators: in place
    rule("allOf", ARRAY, Some(Constraint::NonEmpty), Nested::EachElement),
    rule("anyOf", ARRAY, Some(Constraint::NonEmpty), Nested::EachElement),
    rule("oneOf", ARRAY, Some(Constraint::NonEmpty), Nested::EachElement),
    rule("not", SCHEMA, None, Nested::Schema),
    rule("if", SCHEMA, None, Nested::Schema),
    rule("then", SCHEMA, None, Nested::Schema),
    rule("else", SCHEMA, None, Nested::Schema),
    // Core
    rule("$defs", OBJECT, None, Nested::EachValue),
    rule("definitions", OBJECT, None, Nested::EachValue),
    rule("$schema", STRING, None, Nested::None),
    rule("$id", STRING, None, Nested::None),
    rule("$ref", STRING, None, Nested::None),
    rule("$anchor", STRING, None, Nested::None),
    rule("$dynamicRef", STRING, None, Nested::None),
    rule("$dynamicAnchor", STRING, None, Nested::None),
    rule("$comment", STRING, None, Nested::None),
    // Validation: numeric
    rule("minimum", NUMBER, None, Nested::None),
    rule("maximum", NUMBER, None, Nested::None),
    rule("exclusiveMinimum", NUMBER, None, Nested::None),
    rule("exclusiveMaximum", NUMBER, None, Nested::None),
    rule("multipleOf", NUMBER, Some(Constraint::Positive), Nested::None),
    // Validation: counts
    rule("minLength", INTEGER, Some(Constraint::NonNegative), Nested::None),
    rule("maxLength", INTEGER, Some(Constraint::NonNegative), Nested::None),
    rule("minItems", INTEGER, Some(Constraint::NonNegative), Nested::None),
    rule("maxItems", INTEGER, Some(Constraint::NonNegative), Nested::None),
    rule("minContains", INTEGER, Some(Constraint::NonNegative), Nested::None),
    rule("maxContains", INTEGER, Some(Constraint::NonNegative), Nested::None),
    rule("minProperties", INTEGER, Some(Constraint::NonNegative), Nested::None),
    rule("maxProperties", INTEGER, Some(Constraint::NonNegative), Nested::None),
    // Validation: strings, arrays, objects
    rule("pattern", STRING, Some(Constraint::Regex), Nested::None),
    rule("uniqueItems", BOOLEAN, None, Nested::None),
    rule("required", ARRAY, Some(Constraint::UniqueStrings), Nested::None),
    rule("dependentRequired", OBJECT, Some(Constraint::DependentRequired), Nested::None),
    // Format and content
    rule("format", STRING, None, Nested::None),
    rule("contentEncoding", STRING, None, Nested::None),
    rule("contentMediaType", STRING, None, Nested::None),
    rule("contentSchema", SCHEMA, None, Nested::Schema),
    // Meta-data
    rule("title", STRING, None, Nested::None),
    rule("description", STRING, None, Nested::None),
    rule("default", ANY, None, Nested::None),
    rule("deprecated", BOOLEAN, None, Nested::None),
    rule("readOnly", BOOLEAN, None, Nested::None),
    rule("writeOnly", BOOLEAN, None, Nested::None),
    rule("examples", ARRAY, None, Nested::None),
];

fn index() -> &'static HashMap<&'static str, &'static KeywordRule> {
    static INDEX: OnceLock<HashMap<&'static str, &'static KeywordRule>> = OnceLock::new();
    INDEX.get_or_init(|| KEYWORD_RULES.iter().map(|r| (r.keyword, r)).collect())
}

/// Look up the rule for a keyword, `None` if the keyword is unknown
pub fn lookup_rule(keyword: &str) -> Option<&'static KeywordRule> {
    index().get(keyword).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_keywords_are_unique() {
        let mut seen = HashSet::new();
        for rule in KEYWORD_RULES {
            assert!(seen.insert(rule.keyword), "duplicate rule for {}", rule.keyword);
        }
    }

    #[test]
    fn test_lookup() {
        let rule = lookup_rule("minLength").unwrap();
        assert_eq!(rule.kinds, INTEGER);
        assert_eq!(rule.constraint, Some(Constraint::NonNegative));
        assert!(lookup_rule("x-custom").is_none());
        assert!(lookup_rule("MINLENGTH").is_none());
    }

    #[test]
    fn test_nested_positions() {
        assert_eq!(lookup_rule("properties").unwrap().nested, Nested::EachValue);
        assert_eq!(lookup_rule("anyOf").unwrap().nested, Nested::EachElement);
        assert_eq!(lookup_rule("not").unwrap().nested, Nested::Schema);
        let names = lookup_rule("propertyNames").unwrap();
        assert_eq!(names.nested, Nested::Schema);
        assert_eq!(names.constraint, Some(Constraint::StringSchema));
        assert_eq!(lookup_rule("required").unwrap().nested, Nested::None);
    }

    #[test]
    fn test_kind_of() {
        assert_eq!(JsonKind::of(&json!(null)), JsonKind::Null);
        assert_eq!(JsonKind::of(&json!(3)), JsonKind::Integer);
        assert_eq!(JsonKind::of(&json!(-3)), JsonKind::Integer);
        assert_eq!(JsonKind::of(&json!(3.0)), JsonKind::Integer);
        assert_eq!(JsonKind::of(&json!(3.5)), JsonKind::Number);
        assert_eq!(JsonKind::of(&json!("3")), JsonKind::String);
    }

    #[test]
    fn test_number_accepts_integer() {
        assert!(JsonKind::Number.accepts(JsonKind::Integer));
        assert!(!JsonKind::Integer.accepts(JsonKind::Number));
        assert!(ANY.iter().any(|k| k.accepts(JsonKind::Integer)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(JsonKind::describe_all(SCHEMA), "a boolean or an object");
        assert_eq!(JsonKind::describe_all(INTEGER), "an integer");
        assert_eq!(JsonKind::describe_all(ANY), "any JSON value");
    }
}
