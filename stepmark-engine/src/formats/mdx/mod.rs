//! MDX format
//!
//! MDX is markdown with embedded JSX, so it reuses the markdown pattern table
//! and adds JSX anchors and images. HTML comments are not valid in MDX;
//! annotations use JSX expression comments instead.

use crate::action::{Action, Field};
use crate::format::{CommentSyntax, DocumentFormat, JSX_COMMENT};
use crate::formats::markdown;
use crate::pattern::PatternDef;

/// Format implementation for MDX
pub struct MdxFormat;

impl DocumentFormat for MdxFormat {
    fn name(&self) -> &str {
        "mdx"
    }

    fn description(&self) -> &str {
        "Markdown with JSX"
    }

    fn file_extensions(&self) -> &[&str] {
        &["mdx"]
    }

    fn comment_syntax(&self) -> &CommentSyntax {
        &JSX_COMMENT
    }

    fn default_patterns(&self) -> Vec<PatternDef> {
        let mut patterns = markdown::patterns();
        patterns.push(PatternDef::new(
            "jsxHyperlink",
            &[r#"<a\s[^>]*href=["'](https?://[^"']+)["'][^>]*>"#],
            &[Action::CheckLink],
            &[(1, Field::Url)],
        ));
        patterns.push(PatternDef::new(
            "jsxImage",
            &[r#"<img\s[^>]*src=["']([^"']+)["'][^>]*/?>"#],
            &[Action::Screenshot],
            &[(1, Field::Path)],
        ));
        patterns
    }
}
