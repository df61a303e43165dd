//! YAML bodies
//!
//! One key per line. Nested objects get one level of two-space indentation;
//! anything deeper, and every array, is written in flow style. Strings are
//! quoted only when a YAML reader could misread them.

use super::json_text;
use crate::error::SerializeError;
use serde_json::{Map, Value};

/// Characters that change meaning somewhere in a plain YAML scalar, plus
/// parentheses, which could close an AsciiDoc annotation line.
const SIGNIFICANT: &[char] = &[
    ':', '#', '[', ']', '{', '}', '(', ')', '|', '>', '!', '&', '*', '?', '\'', '"', '\n', '\r',
    '\t',
];

/// Leading characters reserved as YAML indicators.
const LEADING_INDICATORS: &[char] = &['-', '@', '`', '%', ',', '.', '+', '~'];

/// Plain scalars that YAML resolves to something other than a string.
const RESERVED: &[&str] = &[
    "true", "false", "null", "yes", "no", "on", "off", "y", "n",
];

pub(super) fn render(body: &Map<String, Value>) -> Result<String, SerializeError> {
    let mut lines = Vec::with_capacity(body.len());
    for (key, value) in body {
        let key = scalar_str(key)?;
        match value {
            Value::Object(nested) if !nested.is_empty() => {
                lines.push(format!("{key}:"));
                for (inner_key, inner) in nested {
                    lines.push(format!("  {}: {}", scalar_str(inner_key)?, inline(inner)?));
                }
            }
            other => lines.push(format!("{key}: {}", inline(other)?)),
        }
    }
    Ok(lines.join("\n"))
}

fn inline(value: &Value) -> Result<String, SerializeError> {
    match value {
        Value::String(s) => scalar_str(s),
        Value::Object(_) | Value::Array(_) => flow(value),
        other => Ok(other.to_string()),
    }
}

fn scalar_str(s: &str) -> Result<String, SerializeError> {
    if needs_quotes(s) {
        json_text(s)
    } else {
        Ok(s.to_string())
    }
}

/// Flow-style collection with explicit `": "` separators; every string is
/// double-quoted.
fn flow(value: &Value) -> Result<String, SerializeError> {
    Ok(match value {
        Value::Object(map) => {
            let entries = map
                .iter()
                .map(|(k, v)| Ok(format!("{}: {}", json_text(k)?, flow(v)?)))
                .collect::<Result<Vec<_>, SerializeError>>()?;
            format!("{{{}}}", entries.join(", "))
        }
        Value::Array(items) => {
            let items = items.iter().map(flow).collect::<Result<Vec<_>, _>>()?;
            format!("[{}]", items.join(", "))
        }
        Value::String(s) => json_text(s)?,
        other => other.to_string(),
    })
}

fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s.trim() != s {
        return true;
    }
    if s.contains(SIGNIFICANT) || s.starts_with(LEADING_INDICATORS) {
        return true;
    }
    if s.starts_with(|c: char| c.is_ascii_digit()) {
        return true;
    }
    RESERVED.contains(&s.to_ascii_lowercase().as_str())
}
