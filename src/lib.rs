//! Turn GiNZA-style dependency parses of Japanese text into a browsable report.
//!
//! Every sentence of every input block gets a numbered heading, a dependency
//! arc diagram, a per-token annotation table, its bunsetu segmentation, the
//! heads and phrase categories of each bunsetu, and its named entities. A
//! sidebar table of contents links to every heading.
//!
//! ## Modules
//!
//! - [`token`] - Parsed tokens, sentences and documents
//! - [`localize`] - Japanese display labels for UD part-of-speech and dependency codes
//! - [`arc_diagram`] - Word and arc lists for a dependency diagram renderer
//! - [`annotation_table`] - One row of attributes per token
//! - [`chunk`] - Bunsetu, phrase and entity spans
//! - [`toc`] - Heading registration and the navigation link list
//! - [`surface`] - Where report content is written, and how it is rendered
//! - [`driver`] - Runs an annotator over input blocks and writes the report
//! - [`config`] - Report settings loaded from TOML
//! - [`error`] - Error types

pub mod annotation_table;
pub mod arc_diagram;
pub mod chunk;
pub mod config;
pub mod driver;
pub mod error;
pub mod localize;
pub mod surface;
pub mod toc;
pub mod token;

#[cfg(test)]
mod fixtures;

pub use annotation_table::{AnnotationRow, AnnotationTable, Column, DEFAULT_PLACEHOLDER};
pub use arc_diagram::{ArcDiagram, ArcDirection, DiagramArc, DiagramOptions, DiagramWord};
pub use chunk::{
    bunsetu_phrase_spans, bunsetu_spans, entity_spans, format_bunsetu, format_phrases,
    EntityMarkup, EntitySegment, EntitySpan, PhraseSpan,
};
pub use config::{LabelOverrides, NavigationConfig, ReportConfig};
pub use driver::{split_blocks, Annotator, BatchDriver, RunOptions, RunSummary};
pub use error::{AnnotateError, ReportError, ReportResult};
pub use localize::{LabelMap, Localizer};
pub use surface::{Block, Page, Region, SlotId, Surface};
pub use toc::{anchor_key, HeadingEntry, HeadingLevel, NavList, Toc};
pub use token::{is_bunsetu_head_position, Document, MalformedSentence, Sentence, Token};
