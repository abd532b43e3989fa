//! Table of contents for a report run.
//!
//! A [`Toc`] lives for one run: headings are registered as the report is
//! written, and the compiled link list is re-rendered into a bound slot of the
//! surface whenever [`Toc::render`] is called. Entries are never removed.

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::surface::{Region, SlotId, Surface};

/// Heading depth. Level 1 is the outermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn number(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    /// Indent units in the link list: 0, 1 or 2.
    pub fn depth(self) -> usize {
        self.number() - 1
    }
}

/// Width of one indent unit in the link list.
const INDENT: &str = "  ";

/// Anchor key for a heading: its alphanumeric characters, lowercased.
///
/// Distinct headings may share a key; nothing here disambiguates them.
pub fn anchor_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// A registered heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    pub level: HeadingLevel,
    pub anchor: String,
    pub text: String,
}

/// Compiled link list, one line per heading in registration order.
///
/// ```text
/// * <a href='#report'>Report</a>
///     * <a href='#11銀座でランチをご一緒しましょう'>1-1. 銀座でランチをご一緒しましょう。</a>
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavList {
    pub entries: Vec<HeadingEntry>,
}

impl NavList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for NavList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for _ in 0..entry.level.depth() {
                f.write_str(INDENT)?;
            }
            write!(f, "* <a href='#{}'>{}</a>", entry.anchor, entry.text)?;
        }
        Ok(())
    }
}

/// Accumulates headings and keeps a navigation slot up to date.
#[derive(Debug, Default)]
pub struct Toc {
    entries: Vec<HeadingEntry>,
    target: Option<SlotId>,
}

impl Toc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, surface: &mut dyn Surface, text: &str) {
        self.register_heading(surface, text, HeadingLevel::H1);
    }

    pub fn header(&mut self, surface: &mut dyn Surface, text: &str) {
        self.register_heading(surface, text, HeadingLevel::H2);
    }

    pub fn subheader(&mut self, surface: &mut dyn Surface, text: &str) {
        self.register_heading(surface, text, HeadingLevel::H3);
    }

    /// Record a heading and write it, with its anchor, to `surface`.
    pub fn register_heading(&mut self, surface: &mut dyn Surface, text: &str, level: HeadingLevel) {
        let anchor = anchor_key(text);

        if let Some(existing) = self
            .entries
            .iter()
            .find(|entry| entry.anchor == anchor && entry.text != text)
        {
            tracing::warn!(
                anchor = %anchor,
                first = %existing.text,
                second = %text,
                "headings share an anchor key"
            );
        }

        surface.heading(level, &anchor, text);
        self.entries.push(HeadingEntry {
            level,
            anchor,
            text: text.to_string(),
        });
    }

    /// Reserve a slot in `region` for the link list. A previously bound slot
    /// is cleared and no longer updated.
    pub fn bind(&mut self, surface: &mut dyn Surface, region: Region) {
        if let Some(previous) = self.target.take() {
            surface.clear(previous);
        }
        self.target = Some(surface.reserve(region));
    }

    /// Write the full link list to the bound slot, if any.
    pub fn render(&self, surface: &mut dyn Surface) {
        if let Some(slot) = self.target {
            surface.fill(slot, &self.nav_list());
        }
    }

    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    pub fn nav_list(&self) -> NavList {
        NavList {
            entries: self.entries.clone(),
        }
    }
}
