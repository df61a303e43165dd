//! Format implementations
//!
//! One module per supported document dialect. Each declares its comment
//! syntax and built-in pattern table; the registry does the rest.

pub mod asciidoc;
pub mod dita;
pub mod html;
pub mod markdown;
pub mod mdx;

pub use asciidoc::AsciidocFormat;
pub use dita::DitaFormat;
pub use html::HtmlFormat;
pub use markdown::MarkdownFormat;
pub use mdx::MdxFormat;
