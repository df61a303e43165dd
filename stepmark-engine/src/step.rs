//! Steps and test suites
//!
//! A [`Step`] keeps the object it was built from, key order included, so the
//! serializer can write back exactly what the caller supplied. The one action
//! key is resolved into an [`Action`] on construction; anything else about the
//! step's schema is the caller's business.

use crate::action::Action;
use crate::error::{StepError, SuiteError};
use serde_json::{Map, Value};

/// Keys that describe a step rather than instruct it.
pub const METADATA_KEYS: &[&str] = &["stepId", "id", "description"];

/// Source-location bookkeeping that must never be written into a document.
pub fn is_internal_key(key: &str) -> bool {
    key == "location" || key.starts_with('_')
}

/// One abstract test action.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    action: Action,
    body: Map<String, Value>,
}

impl Step {
    pub fn from_value(value: Value) -> Result<Step, StepError> {
        let body = match value {
            Value::Object(map) => map,
            other => return Err(StepError::NotAnObject(kind_of(&other))),
        };

        let mut actions = body.keys().filter_map(|k| k.parse::<Action>().ok());
        let action = match (actions.next(), actions.next()) {
            (Some(action), None) => action,
            (None, _) => {
                let keys: Vec<_> = body.keys().map(String::as_str).collect();
                return Err(StepError::NoAction(keys.join(", ")));
            }
            (Some(_), Some(_)) => {
                let names: Vec<_> = body
                    .keys()
                    .filter(|k| k.parse::<Action>().is_ok())
                    .map(String::as_str)
                    .collect();
                return Err(StepError::MultipleActions(names.join(", ")));
            }
        };

        Ok(Step { action, body })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// The value under the action key.
    pub fn action_value(&self) -> &Value {
        // from_value guarantees the key is present
        self.body.get(self.action.as_str()).unwrap_or(&Value::Null)
    }

    /// The original step object.
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn step_id(&self) -> Option<&str> {
        self.body
            .get("stepId")
            .or_else(|| self.body.get("id"))
            .and_then(Value::as_str)
    }

    /// The value compared against captured content.
    ///
    /// Primitives are used directly. Objects contribute the first string
    /// under one of the action's value keys. Arrays contribute their string
    /// items joined by spaces.
    pub fn comparable_value(&self) -> Option<String> {
        match self.action_value() {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(_) | Value::Null => None,
            Value::Object(map) => self
                .action
                .value_keys()
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            Value::Array(items) => {
                let parts: Vec<_> = items.iter().filter_map(Value::as_str).collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join(" "))
                }
            }
        }
    }
}

impl TryFrom<Value> for Step {
    type Error = StepError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Step::from_value(value)
    }
}

/// Test-level metadata, rendered as start/end markers around a test's steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestMeta {
    pub id: Option<String>,
    pub description: Option<String>,
    pub run_on: Option<Value>,
}

impl TestMeta {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.description.is_none() && self.run_on.is_none()
    }

    /// Marker body, in wire key order.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(id) = &self.id {
            map.insert("testId".to_string(), Value::String(id.clone()));
        }
        if let Some(description) = &self.description {
            map.insert("description".to_string(), Value::String(description.clone()));
        }
        if let Some(run_on) = &self.run_on {
            map.insert("runOn".to_string(), run_on.clone());
        }
        map
    }
}

/// An ordered list of steps plus optional metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCase {
    pub meta: TestMeta,
    pub steps: Vec<Step>,
}

/// Every test to inject into one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestSuite {
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    /// Build a suite from any of the accepted shapes:
    /// `{"tests": [...]}`, a single `{"steps": [...]}` test, or a bare step array.
    pub fn from_value(value: Value) -> Result<TestSuite, SuiteError> {
        match value {
            Value::Array(steps) => Ok(TestSuite {
                tests: vec![parse_test(0, Map::new(), steps)?],
            }),
            Value::Object(mut map) => {
                if let Some(tests) = map.remove("tests") {
                    let Value::Array(tests) = tests else {
                        return Err(SuiteError::UnrecognisedShape);
                    };
                    let tests = tests
                        .into_iter()
                        .enumerate()
                        .map(|(index, test)| match test {
                            Value::Object(mut test) => {
                                let steps = take_steps(index, &mut test)?;
                                parse_test(index, test, steps)
                            }
                            _ => Err(SuiteError::UnrecognisedShape),
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(TestSuite { tests })
                } else if map.contains_key("steps") {
                    let steps = take_steps(0, &mut map)?;
                    Ok(TestSuite {
                        tests: vec![parse_test(0, map, steps)?],
                    })
                } else {
                    Err(SuiteError::UnrecognisedShape)
                }
            }
            _ => Err(SuiteError::UnrecognisedShape),
        }
    }

    pub fn from_json(source: &str) -> Result<TestSuite, SuiteError> {
        Self::from_value(serde_json::from_str(source)?)
    }

    pub fn from_yaml(source: &str) -> Result<TestSuite, SuiteError> {
        Self::from_value(serde_yaml::from_str(source)?)
    }

    /// Parse a spec file's content, choosing YAML for `.yaml`/`.yml` paths and
    /// JSON otherwise.
    pub fn from_source(path: &str, source: &str) -> Result<TestSuite, SuiteError> {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::from_yaml(source)
        } else {
            Self::from_json(source)
        }
    }

    pub fn step_count(&self) -> usize {
        self.tests.iter().map(|t| t.steps.len()).sum()
    }
}

fn take_steps(test: usize, map: &mut Map<String, Value>) -> Result<Vec<Value>, SuiteError> {
    match map.remove("steps") {
        Some(Value::Array(steps)) => Ok(steps),
        Some(_) => Err(SuiteError::StepsNotArray { test }),
        None => Ok(Vec::new()),
    }
}

fn parse_test(
    index: usize,
    meta: Map<String, Value>,
    steps: Vec<Value>,
) -> Result<TestCase, SuiteError> {
    let text = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| meta.get(*k).and_then(Value::as_str))
            .map(str::to_string)
    };
    let meta_out = TestMeta {
        id: text(&["testId", "id"]),
        description: text(&["description"]),
        run_on: meta
            .get("runOn")
            .or_else(|| meta.get("runContext"))
            .cloned(),
    };

    let steps = steps
        .into_iter()
        .enumerate()
        .map(|(step, value)| {
            Step::from_value(value).map_err(|source| SuiteError::Step {
                test: index,
                step,
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TestCase {
        meta: meta_out,
        steps,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
