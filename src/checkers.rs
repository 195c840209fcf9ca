//! Keyword checkers
//!
//! Each checker looks at one keyword value. A wrong value kind produces a
//! single diagnostic and stops there; otherwise the keyword's constraint is
//! checked and every nested schema position is handed back to the walker.

use serde_json::{Map, Value};
use std::collections::HashSet;

use crate::diagnostic::{DiagnosticCode, Diagnostics};
use crate::path::SchemaPath;
use crate::rules::{Constraint, JsonKind, KeywordRule, Nested, TYPE_NAMES};
use crate::walker::Pass;

/// Check `value` against `rule` and walk any schemas nested in it.
///
/// `depth` is the depth of the schema object that owns the keyword.
pub(crate) fn check_keyword(
    pass: &mut Pass<'_>,
    rule: &KeywordRule,
    value: &Value,
    path: &SchemaPath,
    depth: usize,
) {
    let actual = JsonKind::of(value);
    if !rule.kinds.iter().any(|kind| kind.accepts(actual)) {
        pass.diagnostics.wrong_kind(path, rule.keyword, rule.kinds, actual);
        return;
    }

    if let Some(constraint) = rule.constraint {
        check_constraint(constraint, rule.keyword, value, path, &mut pass.diagnostics);
    }

    match (rule.nested, value) {
        (Nested::None, _) => {}
        (Nested::Schema, schema) => pass.walk(schema, path, depth + 1),
        (Nested::EachValue, Value::Object(map)) => {
            for (key, schema) in map {
                pass.walk(schema, &path.key(key.as_str()), depth + 1);
            }
        }
        (Nested::EachElement, Value::Array(items)) => {
            for (index, schema) in items.iter().enumerate() {
                pass.walk(schema, &path.index(index), depth + 1);
            }
        }
        // kind check above guarantees the container matches
        _ => {}
    }
}

fn check_constraint(
    constraint: Constraint,
    keyword: &str,
    value: &Value,
    path: &SchemaPath,
    diags: &mut Diagnostics,
) {
    match constraint {
        Constraint::TypeNames => check_type(keyword, value, path, diags),
        Constraint::NonEmpty => {
            if value.as_array().map(|a| a.is_empty()).unwrap_or(false) {
                diags.constraint(
                    path,
                    keyword,
                    DiagnosticCode::EmptyArray,
                    format!("{} must not be empty", keyword),
                );
            }
        }
        Constraint::UniqueStrings => {
            if let Some(items) = value.as_array() {
                check_unique_strings(keyword, items, path, diags);
            }
        }
        Constraint::Positive => {
            if value.as_f64().map(|n| n <= 0.0).unwrap_or(false) {
                diags.constraint(
                    path,
                    keyword,
                    DiagnosticCode::NonPositiveValue,
                    format!("{} must be greater than 0, found {}", keyword, value),
                );
            }
        }
        Constraint::NonNegative => {
            if value.as_f64().map(|n| n < 0.0).unwrap_or(false) {
                diags.constraint(
                    path,
                    keyword,
                    DiagnosticCode::NegativeValue,
                    format!("{} must be a non-negative integer, found {}", keyword, value),
                );
            }
        }
        Constraint::Regex => {
            if let Some(pattern) = value.as_str() {
                check_regex(keyword, &format!("pattern '{}'", pattern), pattern, path, diags);
            }
        }
        Constraint::RegexKeys => {
            if let Some(map) = value.as_object() {
                // no pointer addresses a key, so the path lands on its value schema
                for key in map.keys() {
                    let subject = format!("property-name pattern '{}'", key);
                    check_regex(keyword, &subject, key, &path.key(key.as_str()), diags);
                }
            }
        }
        Constraint::DependentRequired => {
            if let Some(map) = value.as_object() {
                check_dependent_required(keyword, map, path, diags);
            }
        }
        Constraint::StringSchema => {
            if let Some(declared) = value.get("type") {
                check_string_schema(keyword, declared, &path.key("type"), diags);
            }
        }
    }
}

fn check_type(keyword: &str, value: &Value, path: &SchemaPath, diags: &mut Diagnostics) {
    match value {
        Value::String(name) => check_type_name(keyword, name, path, diags),
        Value::Array(items) => {
            if items.is_empty() {
                diags.constraint(
                    path,
                    keyword,
                    DiagnosticCode::EmptyArray,
                    format!("{} array must not be empty", keyword),
                );
            }
            let mut seen = HashSet::new();
            for (index, item) in items.iter().enumerate() {
                let item_path = path.index(index);
                let Some(name) = item.as_str() else {
                    entry_wrong_kind(keyword, item, &item_path, diags);
                    continue;
                };
                check_type_name(keyword, name, &item_path, diags);
                if !seen.insert(name) {
                    duplicate(keyword, name, &item_path, diags);
                }
            }
        }
        _ => {}
    }
}

fn check_type_name(keyword: &str, name: &str, path: &SchemaPath, diags: &mut Diagnostics) {
    if !TYPE_NAMES.contains(&name) {
        diags.constraint(
            path,
            keyword,
            DiagnosticCode::UnknownTypeName,
            format!("unknown type name '{}'. Must be one of: {:?}", name, TYPE_NAMES),
        );
    }
}

fn check_unique_strings(
    keyword: &str,
    items: &[Value],
    path: &SchemaPath,
    diags: &mut Diagnostics,
) {
    let mut seen = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        let item_path = path.index(index);
        match item.as_str() {
            Some(name) => {
                if !seen.insert(name) {
                    duplicate(keyword, name, &item_path, diags);
                }
            }
            None => entry_wrong_kind(keyword, item, &item_path, diags),
        }
    }
}

fn check_dependent_required(
    keyword: &str,
    map: &Map<String, Value>,
    path: &SchemaPath,
    diags: &mut Diagnostics,
) {
    for (property, dependencies) in map {
        let entry_path = path.key(property.as_str());
        match dependencies.as_array() {
            Some(items) => check_unique_strings(keyword, items, &entry_path, diags),
            None => diags.constraint(
                &entry_path,
                keyword,
                DiagnosticCode::WrongKind,
                format!(
                    "{} values must be arrays of property names, found {}",
                    keyword,
                    JsonKind::of(dependencies)
                ),
            ),
        }
    }
}

/// Property names are always strings, so a `type` that rules them out can
/// never match. Malformed `type` values are left to the nested walk.
fn check_string_schema(
    keyword: &str,
    declared: &Value,
    path: &SchemaPath,
    diags: &mut Diagnostics,
) {
    let names: Vec<&str> = match declared {
        Value::String(name) => vec![name.as_str()],
        Value::Array(items) => match items.iter().map(Value::as_str).collect::<Option<_>>() {
            Some(names) => names,
            None => return,
        },
        _ => return,
    };
    if names.is_empty() || names.iter().any(|name| !TYPE_NAMES.contains(name)) {
        return;
    }
    if !names.contains(&"string") {
        diags.constraint(
            path,
            keyword,
            DiagnosticCode::NonStringPropertyNames,
            format!("{} must accept strings, but type is {}", keyword, declared),
        );
    }
}

/// Schema patterns are ECMA-262; `regex` covers most of them and
/// `fancy_regex` takes lookaround and backreferences.
fn check_regex(
    keyword: &str,
    subject: &str,
    pattern: &str,
    path: &SchemaPath,
    diags: &mut Diagnostics,
) {
    if regex::Regex::new(pattern).is_ok() {
        return;
    }
    if let Err(err) = fancy_regex::Regex::new(pattern) {
        let rendered = err.to_string();
        let reason = rendered
            .lines()
            .last()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .to_string();
        diags.constraint(
            path,
            keyword,
            DiagnosticCode::InvalidPattern,
            format!("{} is not a valid regular expression: {}", subject, reason),
        );
    }
}

fn entry_wrong_kind(keyword: &str, item: &Value, path: &SchemaPath, diags: &mut Diagnostics) {
    diags.constraint(
        path,
        keyword,
        DiagnosticCode::WrongKind,
        format!("{} entries must be strings, found {}", keyword, JsonKind::of(item)),
    );
}

fn duplicate(keyword: &str, name: &str, path: &SchemaPath, diags: &mut Diagnostics) {
    diags.constraint(
        path,
        keyword,
        DiagnosticCode::DuplicateEntry,
        format!("duplicate {} entry '{}'", keyword, name),
    );
}
