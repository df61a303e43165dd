//! Content-matching patterns
//!
//! A pattern is data: a name, one or more regex alternatives, the actions it
//! can infer, and a mapping from capture-group index to [`Field`]. Formats
//! ship their built-in tables as [`PatternDef`]s; configuration adds
//! [`CustomPattern`]s. Both compile into [`Pattern`].
//!
//! Matching uses the `regex` crate, which guarantees linear-time search. A
//! size limit is applied at compile time so an oversized expression is
//! rejected as a [`PatternError`] instead of slowing every scan.

use crate::action::{Action, Field};
use crate::error::PatternError;
use regex::{Regex, RegexBuilder};

/// Upper bound on the compiled size of a single pattern regex.
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Uncompiled pattern definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternDef {
    pub name: String,
    pub regex: Vec<String>,
    pub actions: Vec<Action>,
    /// Capture-group index → field. Index 0 is the whole match. The first
    /// entry is the pattern's primary value.
    pub captures: Vec<(usize, Field)>,
}

impl PatternDef {
    pub fn new(
        name: &str,
        regex: &[&str],
        actions: &[Action],
        captures: &[(usize, Field)],
    ) -> Self {
        PatternDef {
            name: name.to_string(),
            regex: regex.iter().map(|r| r.to_string()).collect(),
            actions: actions.to_vec(),
            captures: captures.to_vec(),
        }
    }
}

/// A user-supplied pattern, as it arrives from configuration.
///
/// Action and field are still strings here; [`CustomPattern::to_def`]
/// resolves them into their tagged variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPattern {
    pub name: String,
    pub regex: Vec<String>,
    pub action: String,
    pub value_group: usize,
    pub field: Option<String>,
}

impl CustomPattern {
    pub fn to_def(&self) -> Result<PatternDef, PatternError> {
        let action: Action = self
            .action
            .parse()
            .map_err(|action| PatternError::UnknownAction {
                name: self.name.clone(),
                action,
            })?;
        let field = match &self.field {
            Some(field) => field.parse().map_err(|field| PatternError::UnknownField {
                name: self.name.clone(),
                field,
            })?,
            None => action.default_field(),
        };
        Ok(PatternDef {
            name: self.name.clone(),
            regex: self.regex.clone(),
            actions: vec![action],
            captures: vec![(self.value_group, field)],
        })
    }
}

/// A compiled, immutable pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    name: String,
    regexes: Vec<Regex>,
    actions: Vec<Action>,
    captures: Vec<(usize, Field)>,
}

impl Pattern {
    /// Compile a definition. Every alternative must compile and expose every
    /// capture group the definition maps.
    pub fn compile(def: &PatternDef) -> Result<Pattern, PatternError> {
        if def.regex.is_empty() {
            return Err(PatternError::NoRegex {
                name: def.name.clone(),
            });
        }

        let mut regexes = Vec::with_capacity(def.regex.len());
        for source in &def.regex {
            let regex = RegexBuilder::new(source)
                .size_limit(REGEX_SIZE_LIMIT)
                .build()
                .map_err(|e| PatternError::InvalidRegex {
                    name: def.name.clone(),
                    regex: source.clone(),
                    message: e.to_string(),
                })?;

            // captures_len counts the implicit group 0
            let available = regex.captures_len() - 1;
            if let Some((group, _)) = def.captures.iter().find(|(g, _)| *g > available) {
                return Err(PatternError::MissingGroup {
                    name: def.name.clone(),
                    group: *group,
                    available,
                });
            }
            regexes.push(regex);
        }

        Ok(Pattern {
            name: def.name.clone(),
            regexes,
            actions: def.actions.clone(),
            captures: def.captures.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regexes(&self) -> &[Regex] {
        &self.regexes
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn captures(&self) -> &[(usize, Field)] {
        &self.captures
    }
}

/// Compile a list of definitions, keeping their order.
///
/// Definitions that fail are reported and skipped; the rest still compile.
pub fn compile_all(defs: &[PatternDef]) -> (Vec<Pattern>, Vec<PatternError>) {
    let mut patterns = Vec::with_capacity(defs.len());
    let mut errors = Vec::new();
    for def in defs {
        match Pattern::compile(def) {
            Ok(pattern) => patterns.push(pattern),
            Err(err) => {
                tracing::warn!(pattern = %def.name, error = %err, "skipping pattern");
                errors.push(err);
            }
        }
    }
    (patterns, errors)
}
