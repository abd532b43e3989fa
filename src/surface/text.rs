use std::fmt::Write;

use super::page::{Block, Page};
use super::Region;
use crate::chunk::EntitySegment;

impl Page {
    /// Render the page as plain text: sidebar first, then the main area,
    /// blocks separated by blank lines.
    pub fn to_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(title) = &self.title {
            parts.push(title.clone());
        }
        for region in [Region::Sidebar, Region::Main] {
            parts.extend(self.blocks(region).iter().filter_map(|block| self.block_text(block)));
        }

        let mut text = parts.join("\n\n");
        text.push('\n');
        text
    }

    fn block_text(&self, block: &Block) -> Option<String> {
        let text = match block {
            Block::Heading {
                level,
                anchor,
                text,
            } => format!("{} {} {{#{}}}", "#".repeat(level.number()), text, anchor),
            Block::Subheader(text) => format!("-- {} --", text),
            Block::Text(text) => text.clone(),
            Block::Diagram { diagram, options } => {
                let word = |i: usize| diagram.words.get(i).map_or("?", |w| w.text.as_str());
                let mut out = String::new();
                let _ = write!(out, "[diagram width={}]", options.width_for(diagram.words.len()));
                for arc in &diagram.arcs {
                    let (from, to) = match arc.dir {
                        crate::ArcDirection::Left => (arc.start, arc.end),
                        crate::ArcDirection::Right => (arc.end, arc.start),
                    };
                    let _ = write!(
                        out,
                        "\n{} -> {} {}",
                        word(from),
                        word(to),
                        arc.label
                    );
                }
                out
            }
            Block::Table(table) => table.display().to_string(),
            Block::Entities(markup) => markup
                .segments
                .iter()
                .map(|segment| match segment {
                    EntitySegment::Text(text) => text.clone(),
                    EntitySegment::Entity { text, label } => format!("[{}]{{{}}}", text, label),
                })
                .collect(),
            Block::Slot(slot) => self.slot(*slot)?.to_string(),
        };
        Some(text)
    }
}
