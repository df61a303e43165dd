//! AsciiDoc format
//!
//! AsciiDoc only has line comments (`//`) and delimited comment blocks, so
//! annotations are line comments and multi-line bodies carry a `// ` prefix
//! on every continuation line.

use crate::action::{Action, Field};
use crate::format::{CommentSyntax, DocumentFormat, ASCIIDOC_COMMENT};
use crate::pattern::PatternDef;

/// Format implementation for AsciiDoc
pub struct AsciidocFormat;

impl DocumentFormat for AsciidocFormat {
    fn name(&self) -> &str {
        "asciidoc"
    }

    fn description(&self) -> &str {
        "AsciiDoc documents"
    }

    fn file_extensions(&self) -> &[&str] {
        &["adoc", "asciidoc", "asc"]
    }

    fn comment_syntax(&self) -> &CommentSyntax {
        &ASCIIDOC_COMMENT
    }

    fn default_patterns(&self) -> Vec<PatternDef> {
        vec![
            PatternDef::new(
                "goToUrl",
                &[
                    r"(?i)\b(?:go\s+to|open|navigate\s+to|visit|access|launch)\b\s+(?:link:)?(https?://[^\s\[]+)\[[^\]]*\]",
                ],
                &[Action::GoTo],
                &[(1, Field::Url)],
            ),
            PatternDef::new(
                "checkHyperlink",
                &[r"(?:link:)?(https?://[^\s\[]+)\[[^\]]*\]"],
                &[Action::CheckLink],
                &[(1, Field::Url)],
            ),
            PatternDef::new(
                "clickOnscreenText",
                &[
                    r"(?i)\b(?:click|tap|choose|select|check)\b\s+(?:on\s+)?\*{1,2}([^*\n]+)\*{1,2}",
                    r"btn:\[([^\]]+)\]",
                ],
                &[Action::Click],
                &[(1, Field::Text)],
            ),
            PatternDef::new(
                "findOnscreenText",
                &[r"\*{1,2}([^*\n]+)\*{1,2}", r"menu:([^\[\s]+)\["],
                &[Action::Find],
                &[(1, Field::Text)],
            ),
            PatternDef::new(
                "typeText",
                &[
                    r#"(?i)\b(?:press|enter|type)\b\s+"([^"\n]+)""#,
                    r"kbd:\[([^\]]+)\]",
                ],
                &[Action::Type],
                &[(1, Field::Keys)],
            ),
            PatternDef::new(
                "screenshotImage",
                &[r"image::?([^\s\[]+)\[[^\]]*\]"],
                &[Action::Screenshot],
                &[(1, Field::Path)],
            ),
            PatternDef::new(
                "runShellBlock",
                &[r"(?m)^\[source,\s*(?:bash|sh|shell|console)[^\]]*\]\r?\n-{4,}\r?\n((?s:.*?))\r?\n-{4,}\r?$"],
                &[Action::RunShell],
                &[(1, Field::Command)],
            ),
        ]
    }
}
