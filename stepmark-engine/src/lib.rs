//! Content matching and annotation injection for procedural documentation
//!
//!     This crate finds the places in a document where a human describes an action (a link to
//!     follow, a bold UI label to click, quoted text to type, an image, a shell block) and
//!     places machine-readable test-step annotations right next to them, leaving everything
//!     else in the document as it was.
//!
//!     This is a pure lib: it powers stepmark-cli but is shell agnostic. No code here prints,
//!     reads environment variables or writes files.
//!
//! Architecture
//!
//!     The work is a straight pipeline, each stage its own module:
//!
//!         registry  ->  scanner  ->  assign  ->  serialize  ->  mutate
//!
//!     - registry: which format a file is, its comment tokens and its content patterns.
//!     - scanner: every pattern over the whole document, producing ordered ContentMatches.
//!     - assign: greedy, in-order placement of steps onto matches, with no reuse.
//!     - serialize: steps and test markers rendered as JSON, YAML or XML-attribute bodies
//!       wrapped in the format's comment tokens.
//!     - mutate: all insertions applied in one pass, in descending position order.
//!
//!     inject.rs chains the stages for one document; reader.rs parses annotations back out,
//!     which is how round-tripping is checked and how existing annotations are counted.
//!
//!     The file structure :
//!     .
//!     ├── action.rs               # Action and Field enums
//!     ├── error.rs
//!     ├── format.rs               # DocumentFormat trait, comment syntaxes
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── pattern.rs              # Pattern definitions and compilation
//!     ├── formats
//!     │   └── <format>/mod.rs     # Built-in pattern tables
//!     ├── scanner.rs
//!     ├── step.rs                 # Steps, tests and suites
//!     ├── assign.rs
//!     ├── serialize               # Step serializer (json / yaml / xml bodies)
//!     ├── reader.rs
//!     ├── mutate.rs               # Batch mutator
//!     └── inject.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs
//!     ├── common
//!     ├── markdown
//!     ├── formats
//!     └── fixtures
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs includes them.
//!
//! Formats
//!
//!     A format is a DocumentFormat implementation: a name, file extensions, a comment syntax
//!     and its built-in pattern table. Pattern tables are plain data; the order of patterns in
//!     a table matters, since earlier patterns win ties at the same offset.
//!
//!     User patterns from configuration are appended after the built-ins with
//!     FormatRegistry::extend_patterns. A pattern that fails to compile is reported and skipped;
//!     the rest keep working.

pub mod action;
pub mod assign;
pub mod error;
pub mod format;
pub mod formats;
pub mod inject;
pub mod mutate;
pub mod pattern;
pub mod reader;
pub mod registry;
pub mod scanner;
pub mod serialize;
pub mod step;

pub use action::{Action, Field};
pub use assign::{assign, Assigner, Assignment, Placement};
pub use error::{
    InjectError, MutationError, PatternError, SerializeError, StepError, SuiteError,
};
pub use format::{CommentSyntax, DocumentFormat, TokenPair};
pub use inject::{inject, InjectOptions, InjectReport, UnmatchedStep, UnmatchedTest};
pub use mutate::{apply, apply_with_report, MutationOutcome, PlannedInsertion, UpdateOperation};
pub use pattern::{CustomPattern, Pattern, PatternDef};
pub use reader::{detect_syntax, parse_body, read_annotations, Annotation, AnnotationKind, ReadError};
pub use registry::FormatRegistry;
pub use scanner::{scan, ContentMatch};
pub use serialize::{serialize_step, serialize_test_end, serialize_test_start, Syntax};
pub use step::{Step, TestCase, TestMeta, TestSuite};
