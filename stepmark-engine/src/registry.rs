//! Format registry for format discovery and selection
//!
//! The registry owns every known [`DocumentFormat`] together with its
//! compiled pattern set. Built-in patterns are compiled once, at
//! registration. Custom patterns are appended after them, never replacing
//! them, so default recognition is not silently lost.

use crate::error::PatternError;
use crate::format::{CommentSyntax, DocumentFormat};
use crate::pattern::{compile_all, Pattern, PatternDef};
use std::collections::HashMap;
use std::path::Path;

/// Format used when a path has no recognised extension.
pub const FALLBACK_FORMAT: &str = "markdown";

struct Entry {
    format: Box<dyn DocumentFormat>,
    patterns: Vec<Pattern>,
}

/// A resolved format: everything the pipeline needs to process one document.
#[derive(Clone, Copy)]
pub struct ResolvedFormat<'a> {
    pub name: &'a str,
    pub comment_syntax: &'a CommentSyntax,
    pub patterns: &'a [Pattern],
}

/// Registry of document formats
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
/// let resolved = registry.resolve_format("docs/install.adoc");
/// assert_eq!(resolved.name, "asciidoc");
/// ```
pub struct FormatRegistry {
    formats: HashMap<String, Entry>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format and compile its built-in patterns.
    ///
    /// If a format with the same name already exists, it will be replaced.
    /// Built-in patterns that fail to compile are returned and skipped.
    pub fn register<F: DocumentFormat + 'static>(&mut self, format: F) -> Vec<PatternError> {
        let (patterns, errors) = compile_all(&format.default_patterns());
        self.formats.insert(
            format.name().to_string(),
            Entry {
                format: Box::new(format),
                patterns,
            },
        );
        errors
    }

    /// Append custom patterns to a format's set.
    ///
    /// Returns one error per definition that could not be used; the others
    /// are still appended. An unknown format name is reported against every
    /// definition.
    pub fn extend_patterns(&mut self, format: &str, defs: &[PatternDef]) -> Vec<PatternError> {
        let Some(entry) = self.formats.get_mut(format) else {
            return defs
                .iter()
                .map(|def| PatternError::UnknownFormat {
                    name: def.name.clone(),
                    format: format.to_string(),
                })
                .collect();
        };
        let (patterns, errors) = compile_all(defs);
        tracing::debug!(format, added = patterns.len(), "custom patterns appended");
        entry.patterns.extend(patterns);
        errors
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Option<&dyn DocumentFormat> {
        self.formats.get(name).map(|e| e.format.as_ref())
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Compiled patterns for a format, in priority order
    pub fn patterns(&self, name: &str) -> Option<&[Pattern]> {
        self.formats.get(name).map(|e| e.patterns.as_slice())
    }

    /// Detect format from filename based on file extension
    ///
    /// Extensions are compared case-insensitively. Returns `None` when no
    /// format claims the extension.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .values()
            .find(|entry| entry.format.file_extensions().contains(&extension.as_str()))
            .map(|entry| entry.format.name().to_string())
    }

    /// Resolve the comment syntax and pattern set for a document path.
    ///
    /// Unrecognised extensions fall back to markdown. If the registry has no
    /// markdown entry either, an arbitrary format is not guessed: the result
    /// carries HTML comments and no patterns.
    pub fn resolve_format(&self, path: &str) -> ResolvedFormat<'_> {
        let name = self
            .detect_format_from_filename(path)
            .unwrap_or_else(|| FALLBACK_FORMAT.to_string());

        match self.formats.get_key_value(name.as_str()) {
            Some((name, entry)) => ResolvedFormat {
                name,
                comment_syntax: entry.format.comment_syntax(),
                patterns: &entry.patterns,
            },
            None => ResolvedFormat {
                name: FALLBACK_FORMAT,
                comment_syntax: &crate::format::HTML_COMMENT,
                patterns: &[],
            },
        }
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Built-in tables are covered by tests; errors here would be a bug.
        let mut errors = registry.register(crate::formats::MarkdownFormat);
        errors.extend(registry.register(crate::formats::MdxFormat));
        errors.extend(registry.register(crate::formats::HtmlFormat));
        errors.extend(registry.register(crate::formats::AsciidocFormat));
        errors.extend(registry.register(crate::formats::DitaFormat));
        for err in errors {
            tracing::error!(error = %err, "built-in pattern failed to compile");
        }

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
