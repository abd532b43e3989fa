//! CoNLL-U reader for GiNZA output.
//!
//! Sentences are separated by blank lines and documents by `# newdoc`
//! comments. Token lines have ten tab-separated columns:
//!
//! ```text
//! ID  FORM  LEMMA  UPOS  XPOS  FEATS  HEAD  DEPREL  DEPS  MISC
//! ```
//!
//! Multiword ranges (`1-2`) and empty nodes (`1.1`) are skipped. GiNZA's
//! extra attributes come from MISC:
//!
//! ```text
//! SpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=SEM_HEAD|Reading=ギンザ|NE=B-GPE|ENE=B-City
//! ```

use std::fs;
use std::path::Path;

use ginza_report::{is_bunsetu_head_position, Document, Sentence, Token};

use crate::errors::{ConlluError, ConlluResult};

const COLUMNS: usize = 10;
const EMPTY: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConlluOptions {
    /// Language code given to every token.
    pub lang: String,
}

impl Default for ConlluOptions {
    fn default() -> Self {
        Self {
            lang: "ja".to_string(),
        }
    }
}

/// Parse every document in `input`.
///
/// Token indices restart at 0 in each document and run across its sentences.
/// A `# newdoc` before any token does not produce an empty document.
pub fn parse_documents(input: &str, options: &ConlluOptions) -> ConlluResult<Vec<Document>> {
    let mut reader = Reader::new(options);

    for (i, line) in input.lines().enumerate() {
        let line_no = i + 1;
        let line = line.trim_end_matches('\r');

        if line.trim().is_empty() {
            reader.end_sentence();
        } else if let Some(comment) = line.strip_prefix('#') {
            reader.comment(comment.trim());
        } else {
            reader.token_line(line_no, line)?;
        }
    }

    Ok(reader.finish())
}

/// Parse `input` as a single document, ignoring `# newdoc` boundaries.
pub fn parse_conllu(input: &str, options: &ConlluOptions) -> ConlluResult<Document> {
    Ok(Document::merge(parse_documents(input, options)?))
}

/// Read and parse a CoNLL-U file.
pub fn read_documents(path: &Path, options: &ConlluOptions) -> ConlluResult<Vec<Document>> {
    let content = fs::read_to_string(path).map_err(|source| ConlluError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_documents(&content, options)
}

struct Reader<'a> {
    options: &'a ConlluOptions,
    documents: Vec<Document>,
    current: Document,
    /// Tokens of the sentence being read.
    tokens: Vec<Token>,
    /// `# text =` of the sentence being read.
    text: Option<String>,
    /// Document index of the sentence's first token.
    sentence_start: usize,
}

impl<'a> Reader<'a> {
    fn new(options: &'a ConlluOptions) -> Self {
        Self {
            options,
            documents: Vec::new(),
            current: Document::default(),
            tokens: Vec::new(),
            text: None,
            sentence_start: 0,
        }
    }

    fn comment(&mut self, comment: &str) {
        if comment.starts_with("newdoc") {
            self.end_document();
        } else if let Some(text) = comment.strip_prefix("text") {
            if let Some(text) = text.trim_start().strip_prefix('=') {
                self.text = Some(text.trim().to_string());
            }
        }
    }

    fn token_line(&mut self, line_no: usize, line: &str) -> ConlluResult<()> {
        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() != COLUMNS {
            return Err(ConlluError::malformed(
                line_no,
                format!("expected {} columns, found {}", COLUMNS, columns.len()),
            ));
        }

        let id = columns[0];
        if id.contains('-') || id.contains('.') {
            return Ok(());
        }
        let id: usize = parse_number(line_no, "ID", id)?;
        if id == 0 {
            return Err(ConlluError::malformed(line_no, "token ID must start at 1"));
        }
        let head: usize = parse_number(line_no, "HEAD", columns[6])?;

        let index = self.sentence_start + id - 1;
        // HEAD 0 marks the root, which is its own head here.
        let head = if head == 0 {
            index
        } else {
            self.sentence_start + head - 1
        };

        let form = columns[1];
        let mut token = Token::new(index, form)
            .with_lemma(field(columns[2]).unwrap_or(form))
            .with_pos(columns[3], field(columns[4]).unwrap_or(""))
            .with_dep(columns[7], head)
            .with_space_after(true);
        token.lang = self.options.lang.clone();

        apply_misc(&mut token, columns[9]);
        self.tokens.push(token);
        Ok(())
    }

    fn end_sentence(&mut self) {
        if self.tokens.is_empty() {
            self.text = None;
            return;
        }

        let sentence = Sentence::new(std::mem::take(&mut self.tokens));
        let text = self.text.take().unwrap_or_else(|| sentence.text());
        self.current.text.push_str(&text);
        self.sentence_start += sentence.len();
        self.current.sentences.push(sentence);
    }

    fn end_document(&mut self) {
        self.end_sentence();
        if !self.current.sentences.is_empty() {
            self.documents.push(std::mem::take(&mut self.current));
        }
        self.sentence_start = 0;
    }

    fn finish(mut self) -> Vec<Document> {
        self.end_document();
        self.documents
    }
}

fn parse_number(line_no: usize, column: &str, value: &str) -> ConlluResult<usize> {
    value
        .parse()
        .map_err(|_| ConlluError::malformed(line_no, format!("invalid {} {:?}", column, value)))
}

/// `None` for the CoNLL-U empty marker.
fn field(value: &str) -> Option<&str> {
    if value == EMPTY || value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Copy GiNZA's MISC attributes onto `token`. Unknown keys and bare flags
/// (`NP_B`) are ignored; a token without `NE` is outside any entity.
fn apply_misc(token: &mut Token, misc: &str) {
    token.ent_iob = Some("O".to_string());

    for item in misc.split('|').filter(|item| *item != EMPTY) {
        let (key, value) = match item.split_once('=') {
            Some(pair) => pair,
            None => continue,
        };
        match key {
            "SpaceAfter" => token.space_after = value != "No",
            "BunsetuBILabel" => token.bunsetu_bi_label = value.to_string(),
            "BunsetuPositionType" => {
                token.bunsetu_position_type = value.to_string();
                token.is_bunsetu_head = is_bunsetu_head_position(value);
            }
            "Reading" => token.reading = value.to_string(),
            "Inf" => token.inflection = Some(value.to_string()),
            "NE" => {
                if let Some((iob, ent_type)) = value.split_once('-') {
                    token.ent_iob = Some(iob.to_string());
                    token.ent_type = Some(ent_type.to_string());
                    token.ent_label_ontonotes = Some(value.to_string());
                }
            }
            "ENE" => token.ent_label_ene = Some(value.to_string()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUNCH: &str = "\
# text = 銀座でランチ。
1\t銀座\t銀座\tPROPN\t名詞-固有名詞-地名-一般\t_\t3\tobl\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=SEM_HEAD|NP_B|Reading=ギンザ|NE=B-GPE|ENE=B-City
2\tで\tで\tADP\t助詞-格助詞\t_\t1\tcase\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=SYN_HEAD|Reading=デ
3\tランチ\tランチ\tNOUN\t名詞-普通名詞-一般\t_\t0\troot\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=ROOT|Reading=ランチ
4\t。\t。\tPUNCT\t補助記号-句点\t_\t3\tpunct\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=CONT|Reading=。
";

    #[test]
    fn test_root_becomes_its_own_head() {
        let document = parse_conllu(LUNCH, &ConlluOptions::default()).unwrap();
        let heads: Vec<(usize, usize)> = document.sentences[0]
            .tokens()
            .iter()
            .map(|t| (t.index, t.head))
            .collect();

        assert_eq!(heads, vec![(0, 2), (1, 0), (2, 2), (3, 2)]);
        assert!(document.sentences[0].tokens()[2].is_root());
        assert_eq!(document.text, "銀座でランチ。");
    }

    #[test]
    fn test_misc_attributes() {
        let document = parse_conllu(LUNCH, &ConlluOptions::default()).unwrap();
        let ginza = &document.sentences[0].tokens()[0];

        assert_eq!(ginza.reading, "ギンザ");
        assert_eq!(ginza.tag, "名詞-固有名詞-地名-一般");
        assert_eq!(ginza.bunsetu_bi_label, "B");
        assert_eq!(ginza.bunsetu_position_type, "SEM_HEAD");
        assert!(ginza.is_bunsetu_head);
        assert_eq!(ginza.ent_iob.as_deref(), Some("B"));
        assert_eq!(ginza.ent_type.as_deref(), Some("GPE"));
        assert_eq!(ginza.ent_label_ontonotes.as_deref(), Some("B-GPE"));
        assert_eq!(ginza.ent_label_ene.as_deref(), Some("B-City"));
        assert!(!ginza.space_after);

        let de = &document.sentences[0].tokens()[1];
        assert_eq!(de.ent_iob.as_deref(), Some("O"));
        assert_eq!(de.ent_type, None);
        assert_eq!(de.ent_label_ontonotes, None);
        assert!(!de.is_bunsetu_head);
    }

    #[test]
    fn test_inflection_and_missing_reading() {
        let input = "\
1\tし\tする\tAUX\t動詞-非自立可能\t_\t0\troot\t_\tInf=サ行変格,連用形-一般
";
        let document = parse_conllu(input, &ConlluOptions::default()).unwrap();
        let token = &document.sentences[0].tokens()[0];

        assert_eq!(token.lemma, "する");
        assert_eq!(token.reading, "し");
        assert_eq!(token.inflection.as_deref(), Some("サ行変格,連用形-一般"));
        assert!(token.space_after);
        assert_eq!(document.text, "し");
    }

    #[test]
    fn test_indices_run_across_sentences() {
        let input = format!("{}\n{}", LUNCH, LUNCH);
        let document = parse_conllu(&input, &ConlluOptions::default()).unwrap();

        assert_eq!(document.sentences.len(), 2);
        let second = &document.sentences[1];
        assert_eq!(second.start_index(), 4);
        assert_eq!(second.tokens()[0].head, 6);
        assert!(second.tokens()[2].is_root());
        assert_eq!(second.validate(), Ok(()));
        assert_eq!(document.text, "銀座でランチ。銀座でランチ。");
    }

    #[test]
    fn test_newdoc_splits_documents() {
        let input = format!("# newdoc id = a\n{}\n# newdoc id = b\n{}", LUNCH, LUNCH);
        let documents = parse_documents(&input, &ConlluOptions::default()).unwrap();

        assert_eq!(documents.len(), 2);
        for document in &documents {
            assert_eq!(document.sentences.len(), 1);
            assert_eq!(document.sentences[0].start_index(), 0);
        }
    }

    #[test]
    fn test_skips_multiword_and_empty_nodes() {
        let input = "\
1-2\tだろう\t_\t_\t_\t_\t_\t_\t_\t_
1\tだろ\tだ\tAUX\t_\t_\t0\troot\t_\t_
1.1\tx\tx\tX\t_\t_\t_\t_\t_\t_
2\tう\tう\tAUX\t_\t_\t1\taux\t_\t_
";
        let document = parse_conllu(input, &ConlluOptions::default()).unwrap();
        let forms: Vec<&str> = document.sentences[0]
            .tokens()
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(forms, vec!["だろ", "う"]);
    }

    #[test]
    fn test_lang_option() {
        let options = ConlluOptions {
            lang: "ja-JP".to_string(),
        };
        let document = parse_conllu(LUNCH, &options).unwrap();
        assert!(document.sentences[0].tokens().iter().all(|t| t.lang == "ja-JP"));
    }

    #[test]
    fn test_malformed_lines() {
        let err = parse_conllu("1\t銀座\t銀座\n", &ConlluOptions::default()).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"line 1: expected 10 columns, found 3");

        let input = "# text = x\nx\tx\tx\tX\t_\t_\t0\troot\t_\t_\n";
        let err = parse_conllu(input, &ConlluOptions::default()).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @r###"line 2: invalid ID "x""###);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_documents("", &ConlluOptions::default()).unwrap().is_empty());
        let document = parse_conllu("\n\n", &ConlluOptions::default()).unwrap();
        assert!(document.sentences.is_empty());
    }
}
