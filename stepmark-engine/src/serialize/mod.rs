//! Step serializer
//!
//! Renders steps and test boundaries into comment-wrapped annotations.
//!
//! A step whose only instruction is a primitive (`{"goTo": "https://…"}`) is
//! written in its compact single-key form and loses its metadata. Anything
//! else is written in full, minus internal bookkeeping keys. Bodies are JSON,
//! YAML or XML attributes; [`crate::reader`] reads all three back.

pub(crate) mod xml;
mod yaml;

use crate::error::SerializeError;
use crate::format::{CommentSyntax, TokenPair};
use crate::step::{is_internal_key, Step, TestMeta, METADATA_KEYS};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Body syntax of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    #[default]
    Json,
    Yaml,
    Xml,
}

impl Syntax {
    pub const ALL: &'static [&'static str] = &["json", "yaml", "xml"];

    pub fn as_str(self) -> &'static str {
        match self {
            Syntax::Json => "json",
            Syntax::Yaml => "yaml",
            Syntax::Xml => "xml",
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Syntax {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Syntax::Json),
            "yaml" | "yml" => Ok(Syntax::Yaml),
            "xml" => Ok(Syntax::Xml),
            other => Err(format!(
                "unknown syntax '{other}' (expected one of: {})",
                Syntax::ALL.join(", ")
            )),
        }
    }
}

/// The object actually written for a step: the compact form when possible,
/// otherwise the full step without internal keys.
pub fn step_form(step: &Step) -> Map<String, Value> {
    let instructions: Vec<(&String, &Value)> = step
        .body()
        .iter()
        .filter(|(k, _)| !is_internal_key(k) && !METADATA_KEYS.contains(&k.as_str()))
        .collect();

    if let [(key, value)] = instructions.as_slice() {
        if is_primitive(value) {
            let mut compact = Map::new();
            compact.insert((*key).clone(), (*value).clone());
            return compact;
        }
    }

    step.body()
        .iter()
        .filter(|(k, _)| !is_internal_key(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Render an object in the chosen body syntax, without comment tokens.
pub fn render_body(body: &Map<String, Value>, syntax: Syntax) -> Result<String, SerializeError> {
    match syntax {
        Syntax::Json => json_text(body),
        Syntax::Yaml => yaml::render(body),
        Syntax::Xml => xml::render(body),
    }
}

/// JSON text that cannot close any supported comment early. `>` and the
/// `/` of `*/` only occur inside strings, where their `\u` escapes read back
/// unchanged.
pub(crate) fn json_text<T: Serialize + ?Sized>(value: &T) -> Result<String, SerializeError> {
    Ok(serde_json::to_string(value)?
        .replace('>', "\\u003e")
        .replace("*/", "*\\u002f"))
}

/// Render a step as a complete annotation.
pub fn serialize_step(
    step: &Step,
    syntax: Syntax,
    comment: &CommentSyntax,
) -> Result<String, SerializeError> {
    let body = render_body(&step_form(step), syntax)?;
    Ok(wrap(&comment.step, &body, comment.continuation))
}

/// Render the marker that opens a test.
pub fn serialize_test_start(
    meta: &TestMeta,
    syntax: Syntax,
    comment: &CommentSyntax,
) -> Result<String, SerializeError> {
    let body = render_body(&meta.to_map(), syntax)?;
    Ok(wrap(&comment.test, &body, comment.continuation))
}

/// Render the marker that closes a test.
pub fn serialize_test_end(comment: &CommentSyntax) -> String {
    format!("{}{}", comment.test_end.open, comment.test_end.close)
}

/// Wrap a body in comment tokens.
///
/// Single-line bodies are wrapped inline. Multi-line bodies get the tokens on
/// their own lines, with `continuation` before every line after the first.
pub fn wrap(tokens: &TokenPair, body: &str, continuation: &str) -> String {
    if !body.contains('\n') {
        return format!("{}{}{}", tokens.open, body, tokens.close);
    }

    let mut out = String::from(tokens.open.trim_end());
    for line in body.lines() {
        out.push('\n');
        out.push_str(continuation);
        out.push_str(line);
    }
    out.push('\n');
    out.push_str(continuation);
    out.push_str(tokens.close.trim_start());
    out
}

fn is_primitive(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}
