//! DITA / XML format
//!
//! Annotations are `<?doc-detective ... ?>` processing instructions, which
//! XML processors pass through without affecting the document tree.

use crate::action::{Action, Field};
use crate::format::{CommentSyntax, DocumentFormat, XML_PROCESSING_INSTRUCTION};
use crate::pattern::PatternDef;

/// Format implementation for DITA topics and generic XML
pub struct DitaFormat;

impl DocumentFormat for DitaFormat {
    fn name(&self) -> &str {
        "dita"
    }

    fn description(&self) -> &str {
        "DITA topics and maps (XML)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["dita", "ditamap", "xml"]
    }

    fn comment_syntax(&self) -> &CommentSyntax {
        &XML_PROCESSING_INSTRUCTION
    }

    fn default_patterns(&self) -> Vec<PatternDef> {
        vec![
            PatternDef::new(
                "goToUrl",
                &[
                    r#"(?i)\b(?:go\s+to|open|navigate\s+to|visit|access|launch)\b\s+<xref\s[^>]*href=["'](https?://[^"']+)["'][^>]*>"#,
                ],
                &[Action::GoTo],
                &[(1, Field::Url)],
            ),
            PatternDef::new(
                "checkHyperlink",
                &[r#"<xref\s[^>]*href=["'](https?://[^"']+)["'][^>]*>"#],
                &[Action::CheckLink],
                &[(1, Field::Url)],
            ),
            PatternDef::new(
                "clickOnscreenText",
                &[r"(?i)\b(?:click|tap|choose|select|check)\b\s+(?:on\s+)?(?:the\s+)?<uicontrol>([^<]+)</uicontrol>"],
                &[Action::Click],
                &[(1, Field::Text)],
            ),
            PatternDef::new(
                "findOnscreenText",
                &[
                    r"<uicontrol>([^<]+)</uicontrol>",
                    r"<wintitle>([^<]+)</wintitle>",
                    r"<b>([^<]+)</b>",
                ],
                &[Action::Find],
                &[(1, Field::Text)],
            ),
            PatternDef::new(
                "typeText",
                &[r"<userinput>([^<]+)</userinput>"],
                &[Action::Type],
                &[(1, Field::Keys)],
            ),
            PatternDef::new(
                "screenshotImage",
                &[r#"<image\s[^>]*href=["']([^"']+)["'][^>]*>"#],
                &[Action::Screenshot],
                &[(1, Field::Path)],
            ),
            PatternDef::new(
                "runShellBlock",
                &[r#"<codeblock[^>]*outputclass=["'](?:bash|sh|shell|console)["'][^>]*>([^<]+)</codeblock>"#],
                &[Action::RunShell],
                &[(1, Field::Command)],
            ),
        ]
    }
}
