//! Runs an annotator over input blocks and writes the report.

use crate::annotation_table::AnnotationTable;
use crate::arc_diagram::{ArcDiagram, DiagramOptions};
use crate::chunk::{bunsetu_phrase_spans, bunsetu_spans, format_bunsetu, format_phrases, EntityMarkup};
use crate::config::ReportConfig;
use crate::error::{AnnotateError, ReportError, ReportResult};
use crate::localize::Localizer;
use crate::surface::Surface;
use crate::toc::Toc;
use crate::token::{Document, Sentence};

pub const BUNSETU_CAPTION: &str = "文節区切り";
pub const PHRASE_CAPTION: &str = "文節の主辞区間と句の区分";
pub const ENTITY_CAPTION: &str = "固有表現(エンティティ)";
pub const NO_ENTITY: &str = "No Entity";

/// Tokenizes, tags and parses one block of text.
pub trait Annotator {
    fn annotate(&self, text: &str) -> Result<Document, AnnotateError>;

    /// Annotate every block of a run, yielding one result per block in order.
    ///
    /// The driver stops pulling at the first error. The default annotates
    /// each block lazily with [`Annotator::annotate`]; annotators with an
    /// expensive start-up override this to pay it once per run.
    fn annotate_blocks<'a>(
        &'a self,
        blocks: &'a [String],
    ) -> Box<dyn Iterator<Item = Result<Document, AnnotateError>> + 'a> {
        Box::new(blocks.iter().map(move |text| self.annotate(text)))
    }
}

impl<F> Annotator for F
where
    F: Fn(&str) -> Result<Document, AnnotateError>,
{
    fn annotate(&self, text: &str) -> Result<Document, AnnotateError> {
        self(text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Annotate all input lines as a single block.
    pub ignore_line_breaks: bool,
}

/// Input blocks: one per line, or every line concatenated into one.
///
/// Empty lines are kept so block numbers match line numbers. Besides `\n`
/// and `\r\n`, a lone `\r`, the ASCII separators and the Unicode line and
/// paragraph separators all end a line.
pub fn split_blocks(input: &str, options: RunOptions) -> Vec<String> {
    if options.ignore_line_breaks {
        vec![lines(input).concat()]
    } else {
        lines(input).into_iter().map(str::to_string).collect()
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Split on line breaks. A trailing break does not add an empty line.
fn lines(input: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = input;
    while !rest.is_empty() {
        match rest.find(is_line_break) {
            Some(at) => {
                lines.push(&rest[..at]);
                let tail = &rest[at..];
                let width = if tail.starts_with("\r\n") {
                    2
                } else {
                    tail.chars().next().map_or(1, char::len_utf8)
                };
                rest = &tail[width..];
            }
            None => {
                lines.push(rest);
                break;
            }
        }
    }
    lines
}

/// Counts for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub blocks: usize,
    pub sentences: usize,
    pub tokens: usize,
    /// Headings registered with the table of contents during the run.
    pub headings: usize,
}

/// Writes every sentence of every block to a surface, keeping a [`Toc`]
/// current as it goes.
#[derive(Debug, Clone)]
pub struct BatchDriver {
    localizer: Localizer,
    placeholder: String,
    diagram: DiagramOptions,
}

impl Default for BatchDriver {
    fn default() -> Self {
        Self::new(&ReportConfig::default())
    }
}

impl BatchDriver {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            localizer: config.localizer(),
            placeholder: config.placeholder.clone(),
            diagram: config.diagram.clone(),
        }
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Annotate and render each block of `input` in order.
    ///
    /// The first annotator failure or malformed sentence aborts the run.
    /// Everything written before that point stays on the surface.
    pub fn run(
        &self,
        input: &str,
        options: RunOptions,
        annotator: &dyn Annotator,
        surface: &mut dyn Surface,
        toc: &mut Toc,
    ) -> ReportResult<RunSummary> {
        let headings_before = toc.entries().len();
        let mut summary = RunSummary::default();

        let blocks = split_blocks(input, options);
        tracing::debug!(blocks = blocks.len(), "annotating input");
        for (block, result) in annotator.annotate_blocks(&blocks).enumerate() {
            let document = result.map_err(|source| ReportError::Annotate {
                block: block + 1,
                source,
            })?;
            self.render_document(block, &document, surface, toc, &mut summary)?;
        }

        toc.render(surface);
        self.finish(summary, toc, headings_before)
    }

    /// Render documents that were annotated elsewhere, one block each.
    pub fn render_documents(
        &self,
        documents: &[Document],
        surface: &mut dyn Surface,
        toc: &mut Toc,
    ) -> ReportResult<RunSummary> {
        let headings_before = toc.entries().len();
        let mut summary = RunSummary::default();

        for (block, document) in documents.iter().enumerate() {
            self.render_document(block, document, surface, toc, &mut summary)?;
        }

        toc.render(surface);
        self.finish(summary, toc, headings_before)
    }

    fn render_document(
        &self,
        block: usize,
        document: &Document,
        surface: &mut dyn Surface,
        toc: &mut Toc,
        summary: &mut RunSummary,
    ) -> ReportResult<()> {
        summary.blocks += 1;
        for (index, sentence) in document.sentences.iter().enumerate() {
            sentence
                .validate()
                .map_err(|source| ReportError::MalformedSentence {
                    block: block + 1,
                    sentence: index + 1,
                    source,
                })?;
            tracing::debug!(
                block = block + 1,
                sentence = index + 1,
                tokens = sentence.len(),
                "rendering sentence"
            );
            self.render_sentence(block, index, sentence, surface, toc);
            summary.sentences += 1;
            summary.tokens += sentence.len();
        }
        Ok(())
    }

    /// Write one sentence: heading, diagram, table, bunsetu, phrases, entities.
    /// `block` and `index` are zero-based.
    pub fn render_sentence(
        &self,
        block: usize,
        index: usize,
        sentence: &Sentence,
        surface: &mut dyn Surface,
        toc: &mut Toc,
    ) {
        toc.subheader(
            surface,
            &format!("{}-{}. {}", block + 1, index + 1, sentence.text()),
        );

        surface.diagram(&ArcDiagram::build(sentence, &self.localizer), &self.diagram);
        surface.table(&AnnotationTable::build(
            sentence,
            &self.localizer,
            &self.placeholder,
        ));

        surface.subheader(BUNSETU_CAPTION);
        surface.text(&format_bunsetu(&bunsetu_spans(sentence)));

        surface.subheader(PHRASE_CAPTION);
        surface.text(&format_phrases(&bunsetu_phrase_spans(sentence)));

        surface.subheader(ENTITY_CAPTION);
        match EntityMarkup::build(sentence) {
            Some(markup) => surface.entities(&markup),
            None => surface.text(NO_ENTITY),
        }

        toc.render(surface);
    }

    fn finish(
        &self,
        mut summary: RunSummary,
        toc: &Toc,
        headings_before: usize,
    ) -> ReportResult<RunSummary> {
        summary.headings = toc.entries().len() - headings_before;
        tracing::info!(
            blocks = summary.blocks,
            sentences = summary.sentences,
            tokens = summary.tokens,
            "report complete"
        );
        Ok(summary)
    }
}
