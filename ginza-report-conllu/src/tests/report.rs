//! Reports built from GiNZA CoNLL-U output.

use std::path::{Path, PathBuf};

use ginza_report::{
    AnnotationTable, BatchDriver, Block, Column, Document, Localizer, Page, Region, ReportError,
    Toc, DEFAULT_PLACEHOLDER,
};
use crate::{read_documents, ConlluError, ConlluOptions};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample() -> Vec<Document> {
    read_documents(&fixture("ginza_sample.conllu"), &ConlluOptions::default()).unwrap()
}

fn render(documents: &[Document]) -> Page {
    let mut page = Page::new().with_title("GiNZA NLP Library");
    let mut toc = Toc::new();
    toc.bind(&mut page, Region::Sidebar);
    BatchDriver::default()
        .render_documents(documents, &mut page, &mut toc)
        .unwrap();
    page
}

fn headings(page: &Page) -> Vec<&str> {
    page.blocks(Region::Main)
        .iter()
        .filter_map(|block| match block {
            Block::Heading { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn texts(page: &Page) -> Vec<&str> {
    page.blocks(Region::Main)
        .iter()
        .filter_map(|block| match block {
            Block::Text(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_newdoc_comments_separate_blocks() {
    let documents = sample();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].sentences.len(), 2);
    assert_eq!(documents[0].token_count(), 17);
    assert_eq!(
        documents[0].text,
        "銀座でランチをご一緒しましょう。今度の日曜日はどうですか。"
    );
    assert_eq!(documents[1].text, "吾輩は猫である。");
    assert_eq!(documents[1].sentences[0].start_index(), 0);
}

#[test]
fn test_sentences_are_numbered_per_block() {
    let page = render(&sample());

    assert_eq!(
        headings(&page),
        vec![
            "1-1. 銀座でランチをご一緒しましょう。",
            "1-2. 今度の日曜日はどうですか。",
            "2-1. 吾輩は猫である。",
        ]
    );

    let nav = page.slot_in(Region::Sidebar).unwrap().to_string();
    let links: Vec<&str> = nav.lines().collect();
    assert_eq!(
        links,
        vec![
            "    * <a href='#11銀座でランチをご一緒しましょう'>1-1. 銀座でランチをご一緒しましょう。</a>",
            "    * <a href='#12今度の日曜日はどうですか'>1-2. 今度の日曜日はどうですか。</a>",
            "    * <a href='#21吾輩は猫である'>2-1. 吾輩は猫である。</a>",
        ]
    );
}

#[test]
fn test_bunsetu_and_phrase_sections() {
    let page = render(&sample());

    insta::assert_debug_snapshot!(texts(&page), @r###"
    [
        "銀座で/ランチを/ご一緒しましょう。",
        "銀座(NP)/ランチ(NP)/ご一緒(VP)",
        "今度の/日曜日は/どうですか。",
        "今度(NP)/日曜日(NP)/どう(ADVP)",
        "吾輩は/猫である。",
        "吾輩(NP)/猫(NP)",
        "No Entity",
    ]
    "###);
}

#[test]
fn test_entities_are_highlighted() {
    let text = render(&sample()).to_text();

    assert!(text.contains("[銀座]{GPE}でランチをご一緒しましょう。"));
    assert!(text.contains("[今度の日曜日]{DATE}はどうですか。"));
}

#[test]
fn test_diagram_positions_are_sentence_relative() {
    let html = render(&sample()).to_html();

    // 今度 (document index 9) depends on 日曜日 (index 11)
    assert!(html.contains(r#"{"start":0,"end":2,"label":"名詞修飾語","dir":"left"}"#));
    assert!(html.contains("<h3 id='12今度の日曜日はどうですか'>"));
}

#[test]
fn test_table_cells_follow_the_tokens() {
    let documents = sample();
    let sentence = &documents[1].sentences[0];
    let table = AnnotationTable::build(sentence, &Localizer::japanese(), DEFAULT_PLACEHOLDER);

    let de = &table.rows()[3];
    assert_eq!(de.get(Column::Orth), "で");
    assert_eq!(de.get(Column::Lemma), "だ");
    assert_eq!(de.get(Column::ReadingForm), "デ");
    assert_eq!(de.get(Column::PosLocalized), "助動詞");
    assert_eq!(de.get(Column::Inflection), "助動詞-ダ,連用形-一般");
    assert_eq!(de.get(Column::EntType), "-");
    assert_eq!(de.get(Column::EntIob), "O");
    assert_eq!(de.get(Column::DepLocalized), "コピュラ");
    assert_eq!(de.get(Column::HeadIndex), "2");
    assert_eq!(de.get(Column::IsBunsetuHead), "False");
    assert_eq!(de.get(Column::EntLabelOntonotes), "-");

    let neko = &table.rows()[2];
    assert_eq!(neko.get(Column::HeadIndex), "2");
    assert_eq!(neko.get(Column::IsBunsetuHead), "True");
}

#[test]
fn test_merged_documents_keep_global_indices() {
    let merged = Document::merge(sample());
    let page = render(&[merged.clone()]);

    assert_eq!(merged.sentences[2].start_index(), 17);
    assert_eq!(
        headings(&page),
        vec![
            "1-1. 銀座でランチをご一緒しましょう。",
            "1-2. 今度の日曜日はどうですか。",
            "1-3. 吾輩は猫である。",
        ]
    );
}

#[test]
fn test_malformed_head_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.conllu");
    std::fs::write(
        &path,
        "1\t猫\t猫\tNOUN\t_\t_\t2\tnsubj\t_\t_\n2\tだ\tだ\tAUX\t_\t_\t1\tcop\t_\t_\n",
    )
    .unwrap();

    let documents = read_documents(&path, &ConlluOptions::default()).unwrap();
    let mut page = Page::new();
    let mut toc = Toc::new();
    let err = BatchDriver::default()
        .render_documents(&documents, &mut page, &mut toc)
        .unwrap_err();

    assert!(matches!(
        err,
        ReportError::MalformedSentence {
            block: 1,
            sentence: 1,
            ..
        }
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_documents(&dir.path().join("none.conllu"), &ConlluOptions::default())
        .unwrap_err();
    assert!(matches!(err, ConlluError::Io { .. }));
}
