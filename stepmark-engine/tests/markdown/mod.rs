//! Markdown pipeline tests
//!
//! End-to-end injection scenarios, annotation round-tripping and properties
//! of the scanner and batch mutator.

mod properties;
mod round_trip;
mod scenarios;
