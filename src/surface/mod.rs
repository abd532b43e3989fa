//! Display surfaces.
//!
//! The batch driver and the [`Toc`](crate::Toc) write to a [`Surface`]. The
//! only implementation shipped here is [`Page`], which records blocks in a
//! main area and a sidebar and renders them to HTML or plain text once the run
//! is over.

mod html;
mod page;
mod text;

pub use page::{Block, Page};

use serde::{Deserialize, Serialize};

use crate::annotation_table::AnnotationTable;
use crate::arc_diagram::{ArcDiagram, DiagramOptions};
use crate::chunk::EntityMarkup;
use crate::toc::{HeadingLevel, NavList};

/// Area of the surface a block is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Main,
    Sidebar,
}

/// Handle to a reserved, refillable position on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) usize);

/// Where report content goes.
///
/// Content calls append to the main area in call order. Slots are reserved
/// up front and can be refilled any number of times.
pub trait Surface {
    /// A heading carrying an in-page anchor.
    fn heading(&mut self, level: HeadingLevel, anchor: &str, text: &str);

    /// A section caption without an anchor.
    fn subheader(&mut self, text: &str);

    /// Preformatted text.
    fn text(&mut self, text: &str);

    /// A dependency diagram, handed on to the diagram renderer.
    fn diagram(&mut self, diagram: &ArcDiagram, options: &DiagramOptions);

    fn table(&mut self, table: &AnnotationTable);

    /// Sentence text with named entities highlighted.
    fn entities(&mut self, markup: &EntityMarkup);

    /// Reserve an empty slot at the current end of `region`.
    fn reserve(&mut self, region: Region) -> SlotId;

    /// Replace the content of `slot` with `nav`.
    fn fill(&mut self, slot: SlotId, nav: &NavList);

    /// Empty `slot`.
    fn clear(&mut self, slot: SlotId);
}
