//! Test actions and semantic capture fields
//!
//! Both patterns and steps refer to actions through [`Action`]. The wire name
//! (camelCase, e.g. `goTo`) is only used at the parsing boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A test action a step can perform and a pattern can infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    CheckLink,
    Click,
    Find,
    GoTo,
    HttpRequest,
    RunShell,
    RunCode,
    Screenshot,
    Record,
    StopRecord,
    Type,
    Wait,
    LoadVariables,
    LoadCookie,
    SaveCookie,
    DragAndDrop,
}

impl Action {
    pub const ALL: &'static [Action] = &[
        Action::CheckLink,
        Action::Click,
        Action::Find,
        Action::GoTo,
        Action::HttpRequest,
        Action::RunShell,
        Action::RunCode,
        Action::Screenshot,
        Action::Record,
        Action::StopRecord,
        Action::Type,
        Action::Wait,
        Action::LoadVariables,
        Action::LoadCookie,
        Action::SaveCookie,
        Action::DragAndDrop,
    ];

    /// The key used for this action in step objects.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::CheckLink => "checkLink",
            Action::Click => "click",
            Action::Find => "find",
            Action::GoTo => "goTo",
            Action::HttpRequest => "httpRequest",
            Action::RunShell => "runShell",
            Action::RunCode => "runCode",
            Action::Screenshot => "screenshot",
            Action::Record => "record",
            Action::StopRecord => "stopRecord",
            Action::Type => "type",
            Action::Wait => "wait",
            Action::LoadVariables => "loadVariables",
            Action::LoadCookie => "loadCookie",
            Action::SaveCookie => "saveCookie",
            Action::DragAndDrop => "dragAndDrop",
        }
    }

    /// Keys that hold the comparable value when the step uses the object form,
    /// in lookup order.
    pub fn value_keys(self) -> &'static [&'static str] {
        match self {
            Action::GoTo | Action::CheckLink | Action::HttpRequest => &["url"],
            Action::Click | Action::Find => &["elementText", "selector"],
            Action::Type => &["keys"],
            Action::Screenshot | Action::Record | Action::LoadVariables => &["path"],
            Action::RunShell | Action::RunCode => &["command", "code"],
            Action::LoadCookie | Action::SaveCookie => &["name", "path"],
            Action::DragAndDrop => &["source"],
            Action::StopRecord | Action::Wait => &[],
        }
    }

    /// Field captured by a custom pattern that does not name one.
    pub fn default_field(self) -> Field {
        match self {
            Action::GoTo | Action::CheckLink | Action::HttpRequest => Field::Url,
            Action::Type => Field::Keys,
            Action::Screenshot | Action::Record | Action::LoadVariables => Field::Path,
            Action::RunShell | Action::RunCode => Field::Command,
            _ => Field::Text,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Semantic name of a captured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Url,
    Text,
    Keys,
    Path,
    Command,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Url => "url",
            Field::Text => "text",
            Field::Keys => "keys",
            Field::Path => "path",
            Field::Command => "command",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "url" => Ok(Field::Url),
            "text" => Ok(Field::Text),
            "keys" => Ok(Field::Keys),
            "path" => Ok(Field::Path),
            "command" => Ok(Field::Command),
            other => Err(other.to_string()),
        }
    }
}
