//! Annotator that runs the `ginza` command.

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

use ginza_report::{AnnotateError, Annotator, Document, Sentence};

use crate::parse::{parse_conllu, parse_documents, ConlluOptions};

/// Runs the `ginza` command: text goes to stdin one block per line, CoNLL-U
/// is read back from stdout.
///
/// A report run starts the command once, so the language model is loaded
/// once, and the returned sentences are handed back to their blocks by
/// matching their text.
#[derive(Debug, Clone)]
pub struct GinzaCommand {
    program: OsString,
    args: Vec<OsString>,
    options: ConlluOptions,
}

impl Default for GinzaCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl GinzaCommand {
    pub fn new() -> Self {
        Self {
            program: OsString::from("ginza"),
            args: Vec::new(),
            options: ConlluOptions::default(),
        }
    }

    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Extra arguments, e.g. `["-m", "ja_ginza_electra"]`.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_options(mut self, options: ConlluOptions) -> Self {
        self.options = options;
        self
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn run(&self, input: &str) -> Result<String, AnnotateError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AnnotateError::Unavailable(format!("{}: {}", self.program_name(), e)))?;

        // Feed stdin from its own thread so a full stdout pipe cannot stall us.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = format!("{}\n", input);
            thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(|e| AnnotateError::Failed {
            message: format!("{}: {}", self.program_name(), e),
        })?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => {
                    return Err(AnnotateError::Failed {
                        message: format!("{}: writing input: {}", self.program_name(), e),
                    })
                }
                Err(_) => {
                    return Err(AnnotateError::Failed {
                        message: format!("{}: input writer panicked", self.program_name()),
                    })
                }
            }
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        if !output.status.success() {
            let message = if stderr.is_empty() {
                format!("{} exited with {}", self.program_name(), output.status)
            } else {
                stderr.to_string()
            };
            return Err(AnnotateError::Failed { message });
        }
        if !stderr.is_empty() {
            tracing::warn!(program = %self.program_name(), stderr = %stderr, "annotator wrote to stderr");
        }

        String::from_utf8(output.stdout).map_err(|e| AnnotateError::Malformed {
            line: 0,
            message: format!("output is not UTF-8: {}", e),
        })
    }
}

impl Annotator for GinzaCommand {
    fn annotate(&self, text: &str) -> Result<Document, AnnotateError> {
        if text.trim().is_empty() {
            return Ok(Document::new(text, Vec::new()));
        }

        let output = self.run(text)?;
        let mut document = parse_conllu(&output, &self.options)?;
        document.text = text.to_string();
        tracing::debug!(
            sentences = document.sentences.len(),
            tokens = document.token_count(),
            "annotated block"
        );
        Ok(document)
    }

    fn annotate_blocks<'a>(
        &'a self,
        blocks: &'a [String],
    ) -> Box<dyn Iterator<Item = Result<Document, AnnotateError>> + 'a> {
        let lines: Vec<&str> = blocks
            .iter()
            .map(String::as_str)
            .filter(|text| !text.trim().is_empty())
            .collect();
        if lines.is_empty() {
            return Box::new(
                blocks
                    .iter()
                    .map(|text| Ok::<_, AnnotateError>(Document::new(text.as_str(), Vec::new()))),
            );
        }

        let documents = self
            .run(&lines.join("\n"))
            .and_then(|output| parse_documents(&output, &self.options).map_err(Into::into));
        match documents {
            Ok(documents) => {
                let sentences = documents.into_iter().flat_map(|document| document.sentences);
                Box::new(assign_sentences(blocks, sentences).into_iter())
            }
            // The command runs before any block is rendered, so its
            // failure belongs to the first block.
            Err(err) => Box::new(std::iter::once(Err::<Document, _>(err))),
        }
    }
}

/// Hand consecutive sentences to each block until their text, ignoring
/// whitespace, covers the block. Stops at the first block that cannot be
/// covered.
fn assign_sentences(
    blocks: &[String],
    sentences: impl IntoIterator<Item = Sentence>,
) -> Vec<Result<Document, AnnotateError>> {
    let mut sentences = sentences.into_iter();
    let mut results = Vec::with_capacity(blocks.len());

    for (block, text) in blocks.iter().enumerate() {
        let target = compact(text);
        let mut covered = String::new();
        let mut group = Vec::new();
        while covered.len() < target.len() {
            let sentence = match sentences.next() {
                Some(sentence) => sentence,
                None => break,
            };
            covered.push_str(&compact(&sentence.text()));
            group.push(sentence);
            if !target.starts_with(&covered) {
                break;
            }
        }

        if covered != target {
            results.push(Err(AnnotateError::Malformed {
                line: 0,
                message: format!("analysis does not match block {}: {:?}", block + 1, text),
            }));
            return results;
        }
        match block_document(text, group) {
            Ok(document) => {
                tracing::debug!(
                    block = block + 1,
                    sentences = document.sentences.len(),
                    tokens = document.token_count(),
                    "annotated block"
                );
                results.push(Ok(document));
            }
            Err(err) => {
                results.push(Err(err));
                return results;
            }
        }
    }

    let extra = sentences.count();
    if extra > 0 {
        tracing::warn!(sentences = extra, "analysis has sentences past the last block");
    }
    results
}

/// Number a block's sentences from 0, as if it had been annotated alone.
fn block_document(text: &str, sentences: Vec<Sentence>) -> Result<Document, AnnotateError> {
    let mut parts = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        let sentence = sentence.rebase().map_err(|e| AnnotateError::Malformed {
            line: 0,
            message: e.to_string(),
        })?;
        parts.push(Document::new("", vec![sentence]));
    }
    let mut document = Document::merge(parts);
    document.text = text.to_string();
    Ok(document)
}

fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
