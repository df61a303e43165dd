//! XML attribute bodies
//!
//! `key="text"` for strings, `key=42` / `key=true` / `key=null` bare, and
//! `key='{"json":"value"}'` for objects and arrays. The quote style is what
//! tells the reader how to interpret the value.

use crate::error::SerializeError;
use serde_json::{Map, Value};

pub(super) fn render(body: &Map<String, Value>) -> Result<String, SerializeError> {
    let mut attrs = Vec::with_capacity(body.len());
    for (key, value) in body {
        let attr = match value {
            Value::String(s) => format!("{key}=\"{}\"", escape(s)),
            Value::Object(_) | Value::Array(_) => {
                let json = serde_json::to_string(value)?;
                format!("{key}='{}'", escape(&json).replace('\'', "&apos;"))
            }
            other => format!("{key}={other}"),
        };
        attrs.push(attr);
    }
    Ok(attrs.join(" "))
}

/// Escape text for a double-quoted attribute value; line breaks become
/// character references so the body always stays on one line, and `*/`
/// loses its slash so a JSX comment cannot close inside it.
pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace("*/", "*&#47;")
}

pub(crate) fn unescape(text: &str) -> String {
    text.replace("&#47;", "/")
        .replace("&#13;", "\r")
        .replace("&#10;", "\n")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}
