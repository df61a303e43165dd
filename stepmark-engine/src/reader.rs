//! Annotation reader
//!
//! The inverse of [`crate::serialize`]: finds annotations in a document,
//! detects which body syntax each one uses, and parses the body back into a
//! JSON object.

use crate::format::{CommentSyntax, TokenPair};
use crate::scanner::LineIndex;
use crate::serialize::xml::unescape;
use crate::serialize::Syntax;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

static XML_LEAD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][\w$.:-]*=").expect("static regex"));

static XML_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_$][\w$.:-]*)=(?:"([^"]*)"|'([^']*)'|([^\s"']+))"#)
        .expect("static regex")
});

/// A body that could not be parsed in its detected syntax.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML body: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("annotation body is not an object")]
    NotAnObject,
}

/// Which annotation a comment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    Step,
    Test,
    TestEnd,
}

/// An annotation found in a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    /// 1-based line of the opening token.
    pub line: usize,
    pub start: usize,
    pub end: usize,
    /// Raw body with continuation prefixes removed.
    pub raw: String,
}

impl Annotation {
    pub fn parse(&self) -> Result<Map<String, Value>, ReadError> {
        match self.kind {
            AnnotationKind::TestEnd => Ok(Map::new()),
            _ => parse_body(&self.raw),
        }
    }
}

/// Guess the syntax of an annotation body.
pub fn detect_syntax(body: &str) -> Syntax {
    let trimmed = body.trim_start();
    if trimmed.starts_with('{') {
        Syntax::Json
    } else if XML_LEAD.is_match(trimmed) {
        Syntax::Xml
    } else {
        Syntax::Yaml
    }
}

/// Parse an annotation body of any supported syntax.
pub fn parse_body(body: &str) -> Result<Map<String, Value>, ReadError> {
    let value: Value = match detect_syntax(body) {
        Syntax::Json => serde_json::from_str(body)?,
        Syntax::Yaml => serde_yaml::from_str(body)?,
        Syntax::Xml => return Ok(parse_xml_attributes(body)),
    };
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ReadError::NotAnObject),
    }
}

fn parse_xml_attributes(body: &str) -> Map<String, Value> {
    let mut map = Map::new();
    for caps in XML_ATTR.captures_iter(body) {
        let key = caps[1].to_string();
        let value = if let Some(text) = caps.get(2) {
            Value::String(unescape(text.as_str()))
        } else if let Some(json) = caps.get(3) {
            let json = unescape(json.as_str());
            serde_json::from_str(&json).unwrap_or(Value::String(json))
        } else {
            let bare = caps.get(4).map_or("", |m| m.as_str());
            serde_json::from_str(bare).unwrap_or_else(|_| Value::String(bare.to_string()))
        };
        map.insert(key, value);
    }
    map
}

/// Find every step, test and test-end annotation in `text`, in document order.
pub fn read_annotations(text: &str, comment: &CommentSyntax) -> Vec<Annotation> {
    let lines = LineIndex::new(text);
    let mut found = Vec::new();

    for (kind, tokens) in [
        (AnnotationKind::TestEnd, &comment.test_end),
        (AnnotationKind::Test, &comment.test),
        (AnnotationKind::Step, &comment.step),
    ] {
        let regex = match annotation_regex(tokens) {
            Ok(regex) => regex,
            Err(err) => {
                tracing::warn!(open = tokens.open, %err, "cannot read annotations");
                continue;
            }
        };
        for caps in regex.captures_iter(text) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let body = caps.get(1).map_or("", |m| m.as_str());
            let raw = strip_continuation(body, comment.continuation);
            // "test end" also opens with the test token
            if kind == AnnotationKind::Test && raw.trim() == "end" {
                continue;
            }
            found.push(Annotation {
                kind,
                line: lines.line_of(whole.start()),
                start: whole.start(),
                end: whole.end(),
                raw,
            });
        }
    }

    found.sort_by_key(|a| a.start);
    found
}

fn annotation_regex(tokens: &TokenPair) -> Result<Regex, regex::Error> {
    let open = regex::escape(tokens.open.trim_end());
    let close = regex::escape(tokens.close.trim_start());
    Regex::new(&format!(
        r"(?ms){open}(?:[ \t]+|\r?\n)?(.*?)[ \t]*{close}[ \t]*\r?$"
    ))
}

/// Drop continuation prefixes, blank lines and the indentation the mutator
/// copied onto every line.
fn strip_continuation(raw: &str, continuation: &str) -> String {
    let prefix = continuation.trim_end();
    let lines: Vec<&str> = raw
        .lines()
        .map(|line| {
            if prefix.is_empty() {
                return line;
            }
            let trimmed = line.trim_start();
            trimmed
                .strip_prefix(prefix)
                .map(|rest| rest.strip_prefix(' ').unwrap_or(rest))
                .unwrap_or(trimmed)
        })
        .filter(|line| !line.trim().is_empty())
        .collect();

    let indent = lines
        .iter()
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or(line.trim_start()).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
