//! CoNLL-U input for `ginza-report`.
//!
//! GiNZA writes its analyses as CoNLL-U, with the bunsetu, reading,
//! inflection and entity attributes packed into the MISC column. This crate
//! reads that format into [`ginza_report::Document`]s, either from a file
//! produced ahead of time or by running the `ginza` command once per report.
//!
//! ## Modules
//!
//! - [`parse`] - CoNLL-U reader
//! - [`command`] - Annotator that runs the `ginza` command
//! - [`errors`] - Error types

pub mod command;
pub mod errors;
pub mod parse;

pub use command::GinzaCommand;
pub use errors::{ConlluError, ConlluResult};
pub use parse::{parse_conllu, parse_documents, read_documents, ConlluOptions};
