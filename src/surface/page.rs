use super::{Region, SlotId, Surface};
use crate::annotation_table::AnnotationTable;
use crate::arc_diagram::{ArcDiagram, DiagramOptions};
use crate::chunk::EntityMarkup;
use crate::toc::{HeadingLevel, NavList};

/// One recorded piece of report content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        anchor: String,
        text: String,
    },
    Subheader(String),
    Text(String),
    Diagram {
        diagram: ArcDiagram,
        options: DiagramOptions,
    },
    Table(AnnotationTable),
    Entities(EntityMarkup),
    Slot(SlotId),
}

/// In-memory surface with a main area and a sidebar.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub(super) title: Option<String>,
    pub(super) renderer: Option<String>,
    main: Vec<Block>,
    sidebar: Vec<Block>,
    slots: Vec<Option<NavList>>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document title used by the rendered output.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// URL of a script that draws the diagrams in the HTML output.
    pub fn with_renderer(mut self, url: impl Into<String>) -> Self {
        self.renderer = Some(url.into());
        self
    }

    pub fn blocks(&self, region: Region) -> &[Block] {
        match region {
            Region::Main => &self.main,
            Region::Sidebar => &self.sidebar,
        }
    }

    fn blocks_mut(&mut self, region: Region) -> &mut Vec<Block> {
        match region {
            Region::Main => &mut self.main,
            Region::Sidebar => &mut self.sidebar,
        }
    }

    /// Current content of `slot`, `None` while empty.
    pub fn slot(&self, slot: SlotId) -> Option<&NavList> {
        self.slots.get(slot.0).and_then(Option::as_ref)
    }

    /// Content of the first filled slot in `region`.
    pub fn slot_in(&self, region: Region) -> Option<&NavList> {
        self.blocks(region).iter().find_map(|block| match block {
            Block::Slot(slot) => self.slot(*slot),
            _ => None,
        })
    }
}

impl Surface for Page {
    fn heading(&mut self, level: HeadingLevel, anchor: &str, text: &str) {
        self.main.push(Block::Heading {
            level,
            anchor: anchor.to_string(),
            text: text.to_string(),
        });
    }

    fn subheader(&mut self, text: &str) {
        self.main.push(Block::Subheader(text.to_string()));
    }

    fn text(&mut self, text: &str) {
        self.main.push(Block::Text(text.to_string()));
    }

    fn diagram(&mut self, diagram: &ArcDiagram, options: &DiagramOptions) {
        self.main.push(Block::Diagram {
            diagram: diagram.clone(),
            options: options.clone(),
        });
    }

    fn table(&mut self, table: &AnnotationTable) {
        self.main.push(Block::Table(table.clone()));
    }

    fn entities(&mut self, markup: &EntityMarkup) {
        self.main.push(Block::Entities(markup.clone()));
    }

    fn reserve(&mut self, region: Region) -> SlotId {
        let slot = SlotId(self.slots.len());
        self.slots.push(None);
        self.blocks_mut(region).push(Block::Slot(slot));
        slot
    }

    fn fill(&mut self, slot: SlotId, nav: &NavList) {
        if let Some(content) = self.slots.get_mut(slot.0) {
            *content = Some(nav.clone());
        }
    }

    fn clear(&mut self, slot: SlotId) {
        if let Some(content) = self.slots.get_mut(slot.0) {
            *content = None;
        }
    }
}
