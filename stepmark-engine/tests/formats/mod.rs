//! Per-format injection tests
//!
//! One fixture per dialect, run through the whole pipeline, plus registry
//! behaviour shared by every format.

mod asciidoc;
mod custom;
mod dita;
mod html;
mod mdx;
mod registry;
