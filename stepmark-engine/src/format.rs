//! Document format trait definition
//!
//! This module defines the trait every document format implements: a name,
//! the file extensions it claims, the comment syntax annotations are wrapped
//! in, and the built-in content patterns recognised in its markup.

use crate::pattern::PatternDef;

/// Opening and closing text around one kind of annotation.
///
/// Tokens carry their own spacing so single-line annotations are a plain
/// concatenation: `open + body + close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPair {
    pub open: &'static str,
    pub close: &'static str,
}

/// Comment wrapper used to embed annotations in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub step: TokenPair,
    pub test: TokenPair,
    pub test_end: TokenPair,
    /// Prefix for every line after the first of a multi-line annotation.
    /// Empty for block comments, `"// "` for line comments.
    pub continuation: &'static str,
}

/// `<!-- step {...} -->`, used by markdown, HTML and unknown formats.
pub const HTML_COMMENT: CommentSyntax = CommentSyntax {
    step: TokenPair {
        open: "<!-- step ",
        close: " -->",
    },
    test: TokenPair {
        open: "<!-- test ",
        close: " -->",
    },
    test_end: TokenPair {
        open: "<!-- test end",
        close: " -->",
    },
    continuation: "",
};

/// `{/* step {...} */}`, for JSX-bearing formats.
pub const JSX_COMMENT: CommentSyntax = CommentSyntax {
    step: TokenPair {
        open: "{/* step ",
        close: " */}",
    },
    test: TokenPair {
        open: "{/* test ",
        close: " */}",
    },
    test_end: TokenPair {
        open: "{/* test end",
        close: " */}",
    },
    continuation: "",
};

/// `<?doc-detective step {...} ?>`, for XML and DITA.
pub const XML_PROCESSING_INSTRUCTION: CommentSyntax = CommentSyntax {
    step: TokenPair {
        open: "<?doc-detective step ",
        close: " ?>",
    },
    test: TokenPair {
        open: "<?doc-detective test ",
        close: " ?>",
    },
    test_end: TokenPair {
        open: "<?doc-detective test end",
        close: " ?>",
    },
    continuation: "",
};

/// `// (step {...})`, for AsciiDoc.
pub const ASCIIDOC_COMMENT: CommentSyntax = CommentSyntax {
    step: TokenPair {
        open: "// (step ",
        close: ")",
    },
    test: TokenPair {
        open: "// (test ",
        close: ")",
    },
    test_end: TokenPair {
        open: "// (test end",
        close: ")",
    },
    continuation: "// ",
};

/// Trait for document formats
///
/// Implementors describe how annotations are embedded in a format and which
/// fragments of its markup map to test actions.
///
/// # Examples
///
/// ```ignore
/// struct WikiFormat;
///
/// impl DocumentFormat for WikiFormat {
///     fn name(&self) -> &str {
///         "wiki"
///     }
///
///     fn file_extensions(&self) -> &[&str] {
///         &["wiki"]
///     }
///
///     fn comment_syntax(&self) -> &CommentSyntax {
///         &HTML_COMMENT
///     }
///
///     fn default_patterns(&self) -> Vec<PatternDef> {
///         vec![PatternDef::new("bold", &["'''([^']+)'''"], &[Action::Find], &[(1, Field::Text)])]
///     }
/// }
/// ```
pub trait DocumentFormat: Send + Sync {
    /// The name of this format (e.g., "markdown", "asciidoc")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format, without the leading dot.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Comment wrapper for annotations in this format.
    fn comment_syntax(&self) -> &CommentSyntax;

    /// Built-in content patterns, in priority order.
    ///
    /// The order is part of the format's contract: when two patterns match at
    /// the same offset, the earlier one is listed first.
    fn default_patterns(&self) -> Vec<PatternDef>;
}
