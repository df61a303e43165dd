//! Markdown format
//!
//! # Pattern Table
//!
//! | Pattern             | Markdown                                   | Action       | Field     |
//! |---------------------|--------------------------------------------|--------------|-----------|
//! | goToUrl             | `Go to [text](https://…)`                  | goTo         | url       |
//! | checkHyperlink      | `[text](https://…)`, `<https://…>`         | checkLink    | url       |
//! | clickOnscreenText   | `Click **Label**`, `Select __Label__`      | click        | text      |
//! | findOnscreenText    | `**Label**`, `__Label__`                   | find         | text      |
//! | typeText            | `Type "text"`, ``Press `Enter` ``          | type         | keys      |
//! | screenshotImage     | `![alt](path)`                             | screenshot   | path      |
//! | runShellBlock       | fenced `bash`/`sh`/`shell` code block      | runShell     | command   |
//!
//! Overlaps are intentional: `Click **Save**` yields both a click and a find
//! candidate. The assignment step decides which one a step consumes.
//!
//! Annotations are HTML comments (`<!-- step {...} -->`), which every
//! CommonMark renderer hides.

use crate::action::{Action, Field};
use crate::format::{CommentSyntax, DocumentFormat, HTML_COMMENT};
use crate::pattern::PatternDef;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl DocumentFormat for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn comment_syntax(&self) -> &CommentSyntax {
        &HTML_COMMENT
    }

    fn default_patterns(&self) -> Vec<PatternDef> {
        patterns()
    }
}

/// The markdown pattern table, shared with MDX.
pub(crate) fn patterns() -> Vec<PatternDef> {
    vec![
        PatternDef::new(
            "goToUrl",
            &[
                r#"(?i)\b(?:go\s+to|open|navigate\s+to|visit|access|proceed\s+to|launch)\b\s+\[[^\]]+\]\(\s*(https?://[^\s)]+)(?:\s+"[^"]*")?\s*\)"#,
            ],
            &[Action::GoTo],
            &[(1, Field::Url)],
        ),
        PatternDef::new(
            "checkHyperlink",
            &[
                r#"\[[^\]]+\]\(\s*(https?://[^\s)]+)(?:\s+"[^"]*")?\s*\)"#,
                r"<(https?://[^\s>]+)>",
            ],
            &[Action::CheckLink],
            &[(1, Field::Url)],
        ),
        PatternDef::new(
            "clickOnscreenText",
            &[
                r"(?i)\b(?:click|tap|left-click|double-click|choose|select|check)\b\s+(?:on\s+)?\*\*([^*\n]+)\*\*",
                r"(?i)\b(?:click|tap|left-click|double-click|choose|select|check)\b\s+(?:on\s+)?__([^_\n]+)__",
            ],
            &[Action::Click],
            &[(1, Field::Text)],
        ),
        PatternDef::new(
            "findOnscreenText",
            &[r"\*\*([^*\n]+)\*\*", r"__([^_\n]+)__"],
            &[Action::Find],
            &[(1, Field::Text)],
        ),
        PatternDef::new(
            "typeText",
            &[
                r#"(?i)\b(?:press|enter|type)\b\s+"([^"\n]+)""#,
                r"(?i)\b(?:press|enter|type)\b\s+`([^`\n]+)`",
            ],
            &[Action::Type],
            &[(1, Field::Keys)],
        ),
        PatternDef::new(
            "screenshotImage",
            &[r#"!\[[^\]]*\]\(\s*([^\s)]+)(?:\s+"[^"]*")?\s*\)"#],
            &[Action::Screenshot],
            &[(1, Field::Path)],
        ),
        PatternDef::new(
            "runShellBlock",
            &["(?m)^```(?:bash|sh|shell|console)[ \\t]*\\r?\\n((?s:.*?))\\r?\\n```"],
            &[Action::RunShell],
            &[(1, Field::Command)],
        ),
    ]
}
