//! Shared configuration loader for the stepmark toolchain.
//!
//! `defaults/stepmark.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`StepmarkConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use stepmark_engine::{CustomPattern, FormatRegistry, InjectOptions, PatternError, Syntax};

const DEFAULT_TOML: &str = include_str!("../defaults/stepmark.default.toml");

/// Top-level configuration consumed by stepmark applications.
#[derive(Debug, Clone, Deserialize)]
pub struct StepmarkConfig {
    pub inject: InjectConfig,
    /// Custom patterns keyed by format name.
    #[serde(default)]
    pub patterns: BTreeMap<String, Vec<PatternConfig>>,
}

/// Knobs for the injection pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct InjectConfig {
    pub syntax: Syntax,
    pub context_lines: usize,
}

impl From<&InjectConfig> for InjectOptions {
    fn from(config: &InjectConfig) -> Self {
        InjectOptions {
            syntax: config.syntax,
            context_lines: config.context_lines,
        }
    }
}

/// One configured content pattern.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternConfig {
    pub name: String,
    pub regex: OneOrMany,
    pub action: String,
    #[serde(default = "default_value_group")]
    pub value_group: usize,
    #[serde(default)]
    pub field: Option<String>,
}

/// A single regex or a list of alternatives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(regex) => vec![regex],
            OneOrMany::Many(regexes) => regexes,
        }
    }
}

fn default_value_group() -> usize {
    1
}

impl From<PatternConfig> for CustomPattern {
    fn from(config: PatternConfig) -> Self {
        CustomPattern {
            name: config.name,
            regex: config.regex.into_vec(),
            action: config.action,
            value_group: config.value_group,
            field: config.field,
        }
    }
}

impl StepmarkConfig {
    /// Append every configured pattern to its format in `registry`.
    ///
    /// Patterns that cannot be used are returned and skipped; the rest are
    /// still registered.
    pub fn apply_patterns(&self, registry: &mut FormatRegistry) -> Vec<PatternError> {
        let mut errors = Vec::new();
        for (format, patterns) in &self.patterns {
            let mut defs = Vec::with_capacity(patterns.len());
            for pattern in patterns {
                match CustomPattern::from(pattern.clone()).to_def() {
                    Ok(def) => defs.push(def),
                    Err(err) => errors.push(err),
                }
            }
            errors.extend(registry.extend_patterns(format, &defs));
        }
        errors
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<StepmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<StepmarkConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.inject.syntax, Syntax::Json);
        assert_eq!(config.inject.context_lines, 1);
        assert!(config.patterns.is_empty());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("inject.syntax", "yaml")
            .expect("override to apply")
            .set_override("inject.context_lines", 3)
            .expect("override to apply")
            .build()
            .expect("config to build");
        let options = InjectOptions::from(&config.inject);
        assert_eq!(options.syntax, Syntax::Yaml);
        assert_eq!(options.context_lines, 3);
    }

    #[test]
    fn rejects_unknown_syntax() {
        let result = Loader::new()
            .set_override("inject.syntax", "toml")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn reads_custom_patterns_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(
            file,
            r#"
[[patterns.markdown]]
name = "waitSeconds"
regex = "(?i)wait (\\d+) seconds"
action = "wait"

[[patterns.markdown]]
name = "menuPath"
regex = ["menu:([^\\[]+)\\[", "Menu > (\\w+)"]
action = "click"
value_group = 1
field = "text"

[[patterns.nowhere]]
name = "orphan"
regex = "(x)"
action = "find"
"#
        )
        .expect("write config");

        let config = Loader::new().with_file(file.path()).build().expect("config to build");
        let markdown = &config.patterns["markdown"];
        assert_eq!(markdown.len(), 2);
        assert_eq!(markdown[0].value_group, 1);
        assert_eq!(markdown[0].regex, OneOrMany::One(r"(?i)wait (\d+) seconds".to_string()));
        assert_eq!(markdown[1].field.as_deref(), Some("text"));
        assert!(matches!(&markdown[1].regex, OneOrMany::Many(list) if list.len() == 2));

        let mut registry = FormatRegistry::with_defaults();
        let before = registry.patterns("markdown").map_or(0, |p| p.len());
        let errors = config.apply_patterns(&mut registry);
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], PatternError::UnknownFormat { format, .. } if format == "nowhere"));
        assert_eq!(registry.patterns("markdown").map_or(0, |p| p.len()), before + 2);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/definitely/not/here.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/definitely/not/here.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.inject.context_lines, 1);
    }
}
