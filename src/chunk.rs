//! Bunsetu segmentation, bunsetu phrases and named entities.
//!
//! GiNZA marks chunk and entity membership on individual tokens
//! (`BunsetuBILabel`, `BunsetuPositionType`, IOB entity tags). The functions
//! here regroup those per-token marks into spans over the sentence. Token
//! ranges are sentence-relative and end-exclusive.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::token::{join_tokens, Sentence, Token};

/// Position types that belong to the content part of a bunsetu.
const PHRASE_POSITIONS: &[&str] = &["ROOT", "SEM_HEAD", "CONT"];

/// Phrase label by the part of speech of the phrase head.
const PHRASE_LABELS: &[(&str, &str)] = &[
    ("NOUN", "NP"),
    ("NUM", "NP"),
    ("PRON", "NP"),
    ("PROPN", "NP"),
    ("VERB", "VP"),
    ("ADJ", "ADJP"),
    ("ADV", "ADVP"),
    ("CCONJ", "CCONJP"),
];

/// A contiguous run of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSpan {
    pub range: Range<usize>,
    pub text: String,
    pub label: Option<String>,
}

impl PhraseSpan {
    fn new(tokens: &[Token], range: Range<usize>, label: Option<String>) -> Self {
        Self {
            text: join_tokens(&tokens[range.clone()]),
            range,
            label,
        }
    }
}

/// A named entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub range: Range<usize>,
    pub text: String,
    pub label: String,
}

/// Split a sentence into bunsetu.
///
/// A token labelled `B` opens a bunsetu and `I` continues the open one. A
/// leading `I` (or any other label) with nothing open starts a bunsetu too,
/// so every token belongs to exactly one span.
pub fn bunsetu_spans(sentence: &Sentence) -> Vec<PhraseSpan> {
    let tokens = sentence.tokens();
    let mut spans = Vec::new();
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate() {
        if i > start && token.bunsetu_bi_label == "B" {
            spans.push(PhraseSpan::new(tokens, start..i, None));
            start = i;
        }
    }
    if start < tokens.len() {
        spans.push(PhraseSpan::new(tokens, start..tokens.len(), None));
    }

    spans
}

/// The content part of each bunsetu, labelled with its phrase type.
///
/// Within a bunsetu the phrase is the run of `ROOT`/`SEM_HEAD`/`CONT` tokens
/// around the bunsetu head (function words are left out). Its label comes from
/// the head's part of speech (`NP`, `VP`, ...), falling back to the raw code.
/// Bunsetu without content tokens contribute nothing.
pub fn bunsetu_phrase_spans(sentence: &Sentence) -> Vec<PhraseSpan> {
    let tokens = sentence.tokens();
    let is_content = |token: &Token| PHRASE_POSITIONS.contains(&token.bunsetu_position_type.as_str());

    bunsetu_spans(sentence)
        .into_iter()
        .filter_map(|bunsetu| {
            let head = bunsetu
                .range
                .clone()
                .find(|&i| tokens[i].is_bunsetu_head)
                .or_else(|| bunsetu.range.clone().find(|&i| is_content(&tokens[i])))?;

            let mut start = head;
            while start > bunsetu.range.start && is_content(&tokens[start - 1]) {
                start -= 1;
            }
            let mut end = head + 1;
            while end < bunsetu.range.end && is_content(&tokens[end]) {
                end += 1;
            }

            Some(PhraseSpan::new(tokens, start..end, Some(phrase_label(&tokens[head].pos))))
        })
        .collect()
}

fn phrase_label(pos: &str) -> String {
    PHRASE_LABELS
        .iter()
        .find(|(code, _)| *code == pos)
        .map_or(pos, |(_, label)| label)
        .to_string()
}

/// Group IOB-tagged tokens into entities.
///
/// `B` always opens a new entity; `I` extends the open entity of the same type
/// and otherwise opens one; `O`, a missing tag or a missing type closes it.
pub fn entity_spans(sentence: &Sentence) -> Vec<EntitySpan> {
    let tokens = sentence.tokens();
    let mut spans = Vec::new();
    let mut open: Option<(usize, &str)> = None;

    let close = |open: &mut Option<(usize, &str)>, end: usize, spans: &mut Vec<EntitySpan>| {
        if let Some((start, label)) = open.take() {
            spans.push(EntitySpan {
                text: join_tokens(&tokens[start..end]),
                range: start..end,
                label: label.to_string(),
            });
        }
    };

    for (i, token) in tokens.iter().enumerate() {
        let ent_type = token.ent_type.as_deref().filter(|t| !t.is_empty());
        match (token.ent_iob.as_deref(), ent_type) {
            (Some("I"), Some(label)) if matches!(open, Some((_, open_label)) if open_label == label) => {}
            (Some("B"), Some(label)) | (Some("I"), Some(label)) => {
                close(&mut open, i, &mut spans);
                open = Some((i, label));
            }
            _ => close(&mut open, i, &mut spans),
        }
    }
    close(&mut open, tokens.len(), &mut spans);

    spans
}

/// Bunsetu texts joined with `/`.
pub fn format_bunsetu(spans: &[PhraseSpan]) -> String {
    spans
        .iter()
        .map(|span| span.text.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Phrases as `text(label)` joined with `/`.
pub fn format_phrases(spans: &[PhraseSpan]) -> String {
    spans
        .iter()
        .map(|span| format!("{}({})", span.text, span.label.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join("/")
}

/// A piece of highlighted sentence text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntitySegment {
    Text(String),
    Entity { text: String, label: String },
}

/// Sentence text split into plain and entity segments, for highlighting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMarkup {
    pub segments: Vec<EntitySegment>,
}

impl EntityMarkup {
    /// `None` when the sentence has no entities.
    pub fn build(sentence: &Sentence) -> Option<Self> {
        let spans = entity_spans(sentence);
        if spans.is_empty() {
            return None;
        }

        let tokens = sentence.tokens();
        let mut segments = Vec::new();
        let mut cursor = 0;
        for span in spans {
            if cursor < span.range.start {
                segments.push(EntitySegment::Text(gap_text(tokens, cursor..span.range.start)));
            } else if cursor > 0 && tokens[cursor - 1].space_after {
                segments.push(EntitySegment::Text(" ".to_string()));
            }
            cursor = span.range.end;
            segments.push(EntitySegment::Entity {
                text: span.text,
                label: span.label,
            });
        }
        if cursor < tokens.len() {
            segments.push(EntitySegment::Text(gap_text(tokens, cursor..tokens.len())));
        }

        Some(Self { segments })
    }

    pub fn entity_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, EntitySegment::Entity { .. }))
            .count()
    }
}

/// Text of a non-entity stretch, including the whitespace that separates it
/// from its neighbours.
fn gap_text(tokens: &[Token], range: Range<usize>) -> String {
    let mut text = String::new();
    if range.start > 0 && tokens[range.start - 1].space_after {
        text.push(' ');
    }
    text.push_str(&join_tokens(&tokens[range.clone()]));
    if range.end < tokens.len() && tokens[range.end - 1].space_after {
        text.push(' ');
    }
    text
}
