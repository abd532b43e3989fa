//! Annotated tokens, sentences and documents as delivered by an annotator.
//!
//! Token indices are document-wide: the first token of the second sentence
//! continues where the first sentence ended. A token whose `head` equals its
//! own `index` is the root of its sentence's dependency tree; every other
//! token points at its head inside the same sentence.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bunsetu position types that mark the head of a bunsetu.
const BUNSETU_HEAD_POSITIONS: &[&str] = &["ROOT", "SEM_HEAD"];

/// A single annotated token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Document-wide position.
    pub index: usize,
    /// Surface form.
    pub text: String,
    pub lemma: String,
    /// Katakana reading.
    pub reading: String,
    /// Coarse part of speech (Universal POS code, e.g. `NOUN`).
    pub pos: String,
    /// Fine-grained tag (e.g. `名詞-普通名詞-一般`).
    pub tag: String,
    /// Conjugation type and form for inflected words.
    pub inflection: Option<String>,
    /// Dependency relation to the head (e.g. `nsubj`).
    pub dep: String,
    /// Index of the head token. Equal to `index` for the root.
    pub head: usize,
    pub ent_type: Option<String>,
    /// `B`, `I` or `O`.
    pub ent_iob: Option<String>,
    pub lang: String,
    /// `B` when the token opens a bunsetu, `I` when it continues one.
    pub bunsetu_bi_label: String,
    /// Role inside the bunsetu: `ROOT`, `SEM_HEAD`, `SYN_HEAD`, `CONT`, `FUNC`, `NO_HEAD`.
    pub bunsetu_position_type: String,
    pub is_bunsetu_head: bool,
    /// Entity label in the OntoNotes scheme, with IOB prefix (e.g. `B-GPE`).
    pub ent_label_ontonotes: Option<String>,
    /// Entity label in the Extended Named Entity scheme (e.g. `B-City`).
    pub ent_label_ene: Option<String>,
    /// Whitespace follows the token in the source text.
    pub space_after: bool,
}

impl Token {
    /// Create a root token with the given surface form and neutral attributes.
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            index,
            lemma: text.clone(),
            reading: text.clone(),
            text,
            pos: "X".to_string(),
            tag: String::new(),
            inflection: None,
            dep: "root".to_string(),
            head: index,
            ent_type: None,
            ent_iob: None,
            lang: "ja".to_string(),
            bunsetu_bi_label: String::new(),
            bunsetu_position_type: String::new(),
            is_bunsetu_head: false,
            ent_label_ontonotes: None,
            ent_label_ene: None,
            space_after: false,
        }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.reading = reading.into();
        self
    }

    /// Set the coarse part of speech and the fine-grained tag.
    pub fn with_pos(mut self, pos: impl Into<String>, tag: impl Into<String>) -> Self {
        self.pos = pos.into();
        self.tag = tag.into();
        self
    }

    /// Attach the token to `head` with relation `dep`.
    pub fn with_dep(mut self, dep: impl Into<String>, head: usize) -> Self {
        self.dep = dep.into();
        self.head = head;
        self
    }

    pub fn with_inflection(mut self, inflection: impl Into<String>) -> Self {
        self.inflection = Some(inflection.into());
        self
    }

    /// Set the IOB marker and entity type.
    ///
    /// The OntoNotes label is derived as `{iob}-{ent_type}`.
    pub fn with_entity(mut self, iob: impl Into<String>, ent_type: impl Into<String>) -> Self {
        let iob = iob.into();
        let ent_type = ent_type.into();
        self.ent_label_ontonotes = Some(format!("{}-{}", iob, ent_type));
        self.ent_iob = Some(iob);
        self.ent_type = Some(ent_type);
        self
    }

    pub fn with_ene(mut self, label: impl Into<String>) -> Self {
        self.ent_label_ene = Some(label.into());
        self
    }

    /// Set the bunsetu labels. The head flag follows from the position type.
    pub fn with_bunsetu(
        mut self,
        bi_label: impl Into<String>,
        position_type: impl Into<String>,
    ) -> Self {
        self.bunsetu_bi_label = bi_label.into();
        self.bunsetu_position_type = position_type.into();
        self.is_bunsetu_head = is_bunsetu_head_position(&self.bunsetu_position_type);
        self
    }

    pub fn with_space_after(mut self, space_after: bool) -> Self {
        self.space_after = space_after;
        self
    }

    /// The self-root sentinel: a token that is its own head has no parent.
    pub fn is_root(&self) -> bool {
        self.index == self.head
    }
}

/// Whether a bunsetu position type marks the bunsetu head.
pub fn is_bunsetu_head_position(position_type: &str) -> bool {
    BUNSETU_HEAD_POSITIONS.contains(&position_type)
}

/// Ways a sentence can break the annotator's tree contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedSentence {
    #[error("no root token")]
    NoRoot,
    #[error("{count} root tokens")]
    MultipleRoots { count: usize },
    #[error("token {index} has head {head} outside the sentence")]
    HeadOutOfRange { index: usize, head: usize },
}

/// An ordered run of tokens forming one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Document index of the first token, or 0 for an empty sentence.
    pub fn start_index(&self) -> usize {
        self.tokens.first().map_or(0, |token| token.index)
    }

    /// Surface text with inter-token whitespace restored.
    pub fn text(&self) -> String {
        join_tokens(&self.tokens)
    }

    /// Renumber tokens and heads so the first token has index 0.
    ///
    /// Fails when a head points before the first token.
    pub fn rebase(self) -> Result<Sentence, MalformedSentence> {
        let start = self.start_index();
        let tokens = self
            .tokens
            .into_iter()
            .map(|mut token| match token.head.checked_sub(start) {
                Some(head) => {
                    token.index -= start;
                    token.head = head;
                    Ok(token)
                }
                None => Err(MalformedSentence::HeadOutOfRange {
                    index: token.index,
                    head: token.head,
                }),
            })
            .collect::<Result<_, _>>()?;
        Ok(Sentence::new(tokens))
    }

    /// Check the single-root tree contract.
    ///
    /// Every head must reference a token of this sentence and exactly one
    /// token must be its own head. An empty sentence is trivially valid.
    pub fn validate(&self) -> Result<(), MalformedSentence> {
        let (first, last) = match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => (first.index, last.index),
            _ => return Ok(()),
        };

        let mut roots = 0;
        for token in &self.tokens {
            if token.head < first || token.head > last {
                return Err(MalformedSentence::HeadOutOfRange {
                    index: token.index,
                    head: token.head,
                });
            }
            if token.is_root() {
                roots += 1;
            }
        }

        match roots {
            0 => Err(MalformedSentence::NoRoot),
            1 => Ok(()),
            count => Err(MalformedSentence::MultipleRoots { count }),
        }
    }
}

/// Concatenate token surfaces, keeping whitespace between tokens but not after the last.
pub(crate) fn join_tokens(tokens: &[Token]) -> String {
    let mut text = String::new();
    for (i, token) in tokens.iter().enumerate() {
        text.push_str(&token.text);
        if token.space_after && i + 1 < tokens.len() {
            text.push(' ');
        }
    }
    text
}

/// An annotated input block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// The text that was annotated.
    pub text: String,
    pub sentences: Vec<Sentence>,
}

impl Document {
    pub fn new(text: impl Into<String>, sentences: Vec<Sentence>) -> Self {
        Self {
            text: text.into(),
            sentences,
        }
    }

    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }

    /// Join documents into one, shifting token and head indices so they stay
    /// document-wide. Texts are concatenated without a separator.
    pub fn merge(documents: impl IntoIterator<Item = Document>) -> Document {
        let mut merged = Document::default();
        let mut offset = 0;

        for document in documents {
            let count = document.token_count();
            merged.text.push_str(&document.text);
            for sentence in document.sentences {
                let tokens = sentence
                    .tokens
                    .into_iter()
                    .map(|mut token| {
                        token.index += offset;
                        token.head += offset;
                        token
                    })
                    .collect();
                merged.sentences.push(Sentence::new(tokens));
            }
            offset += count;
        }

        merged
    }
}
