//! HTML format

use crate::action::{Action, Field};
use crate::format::{CommentSyntax, DocumentFormat, HTML_COMMENT};
use crate::pattern::PatternDef;

/// Format implementation for HTML
pub struct HtmlFormat;

impl DocumentFormat for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML documents"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn comment_syntax(&self) -> &CommentSyntax {
        &HTML_COMMENT
    }

    fn default_patterns(&self) -> Vec<PatternDef> {
        vec![
            PatternDef::new(
                "goToUrl",
                &[
                    r#"(?i)\b(?:go\s+to|open|navigate\s+to|visit|access|launch)\b\s+<a\s[^>]*href=["'](https?://[^"']+)["'][^>]*>"#,
                ],
                &[Action::GoTo],
                &[(1, Field::Url)],
            ),
            PatternDef::new(
                "checkHyperlink",
                &[r#"(?i)<a\s[^>]*href=["'](https?://[^"']+)["'][^>]*>"#],
                &[Action::CheckLink],
                &[(1, Field::Url)],
            ),
            PatternDef::new(
                "clickOnscreenText",
                &[
                    r"(?i)\b(?:click|tap|choose|select|check)\b\s+(?:on\s+)?<(?:b|strong)>([^<]+)</(?:b|strong)>",
                    r"(?i)\b(?:click|tap|choose|select)\b\s+(?:on\s+)?<button[^>]*>([^<]+)</button>",
                ],
                &[Action::Click],
                &[(1, Field::Text)],
            ),
            PatternDef::new(
                "findOnscreenText",
                &[r"(?i)<(?:b|strong)>([^<]+)</(?:b|strong)>"],
                &[Action::Find],
                &[(1, Field::Text)],
            ),
            PatternDef::new(
                "typeText",
                &[
                    r#"(?i)\b(?:press|enter|type)\b\s+"([^"\n]+)""#,
                    r"(?i)<kbd>([^<]+)</kbd>",
                ],
                &[Action::Type],
                &[(1, Field::Keys)],
            ),
            PatternDef::new(
                "screenshotImage",
                &[r#"(?i)<img\s[^>]*src=["']([^"']+)["'][^>]*>"#],
                &[Action::Screenshot],
                &[(1, Field::Path)],
            ),
            PatternDef::new(
                "runShellBlock",
                &[
                    r#"(?i)<pre><code\s+class=["']language-(?:bash|sh|shell|console)["']>([^<]+)</code></pre>"#,
                ],
                &[Action::RunShell],
                &[(1, Field::Command)],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::compile_all;

    #[test]
    fn test_html_patterns_compile() {
        let (patterns, errors) = compile_all(&HtmlFormat.default_patterns());
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(patterns.len(), 7);
    }
}
