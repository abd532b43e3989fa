//! Dependency arc diagrams.
//!
//! [`ArcDiagram::build`] turns one parsed sentence into the `{words, arcs}`
//! structure expected by displaCy-style dependency renderers in manual mode.
//!
//! ```text
//! 0     1   2       3   4   5     6   7         8
//! 銀座  で  ランチ  を  ご  一緒  し  ましょう  。
//! ╰─────────────────────────╯ obl (left)
//! ╰───╯ case (right)
//! ```

use serde::{Deserialize, Serialize};

use crate::localize::Localizer;
use crate::token::Sentence;

/// A word column of the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramWord {
    pub text: String,
    /// Fine-grained part-of-speech tag shown under the word.
    pub tag: String,
}

/// Which end of an arc carries the arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcDirection {
    /// The dependent precedes its head.
    Left,
    /// The dependent follows its head.
    Right,
}

/// A dependency arc between two word columns, `start <= end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramArc {
    pub start: usize,
    pub end: usize,
    pub label: String,
    pub dir: ArcDirection,
}

/// Renderer input for one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcDiagram {
    pub words: Vec<DiagramWord>,
    pub arcs: Vec<DiagramArc>,
}

impl ArcDiagram {
    /// Build the diagram for `sentence`.
    ///
    /// Positions are relative to the sentence's first token. The root emits no
    /// arc, and arcs keep token order. Heads outside the sentence are not
    /// rejected here; their offsets saturate at zero.
    pub fn build(sentence: &Sentence, localizer: &Localizer) -> Self {
        let start_index = sentence.start_index();
        let mut words = Vec::with_capacity(sentence.len());
        let mut arcs = Vec::with_capacity(sentence.len().saturating_sub(1));

        for token in sentence.tokens() {
            words.push(DiagramWord {
                text: token.text.clone(),
                tag: token.tag.clone(),
            });

            if token.is_root() {
                continue;
            }

            let (lo, hi, dir) = if token.index < token.head {
                (token.index, token.head, ArcDirection::Left)
            } else {
                (token.head, token.index, ArcDirection::Right)
            };

            arcs.push(DiagramArc {
                start: lo.saturating_sub(start_index),
                end: hi.saturating_sub(start_index),
                label: localizer.dep_label(&token.dep).to_string(),
                dir,
            });
        }

        Self { words, arcs }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Layout settings handed to the renderer along with the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramOptions {
    /// Square arrows and tighter spacing.
    pub compact: bool,
    /// Horizontal offset of the first word, in pixels.
    pub offset_x: usize,
    /// Distance between words, in pixels.
    pub distance: usize,
    /// Display width granted per word.
    pub word_width: usize,
}

impl DiagramOptions {
    /// Display width for a diagram of `word_count` words: one spare column.
    pub fn width_for(&self, word_count: usize) -> usize {
        (word_count + 1) * self.word_width
    }
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            compact: true,
            offset_x: 200,
            distance: 175,
            word_width: 120,
        }
    }
}
