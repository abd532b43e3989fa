//! Per-token attribute tables.
//!
//! [`AnnotationTable::build`] projects every token of a sentence onto a fixed
//! set of [`Column`]s. Rows follow token order exactly; nothing is filtered or
//! merged. Absent optional attributes are shown as a placeholder so the
//! rendered table never has gaps.

mod display;

pub use display::AnnotationTableDisplay;

use serde::{Deserialize, Serialize};

use crate::localize::Localizer;
use crate::token::{Sentence, Token};

/// Marker shown in place of an absent optional attribute.
pub const DEFAULT_PLACEHOLDER: &str = "-";

/// Table columns, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Index,
    Orth,
    Lemma,
    ReadingForm,
    Pos,
    PosLocalized,
    Tag,
    Inflection,
    EntType,
    EntIob,
    Lang,
    Dep,
    DepLocalized,
    HeadIndex,
    BunsetuBiLabel,
    BunsetuPositionType,
    IsBunsetuHead,
    EntLabelOntonotes,
    EntLabelEne,
}

impl Column {
    pub const ALL: [Column; 19] = [
        Column::Index,
        Column::Orth,
        Column::Lemma,
        Column::ReadingForm,
        Column::Pos,
        Column::PosLocalized,
        Column::Tag,
        Column::Inflection,
        Column::EntType,
        Column::EntIob,
        Column::Lang,
        Column::Dep,
        Column::DepLocalized,
        Column::HeadIndex,
        Column::BunsetuBiLabel,
        Column::BunsetuPositionType,
        Column::IsBunsetuHead,
        Column::EntLabelOntonotes,
        Column::EntLabelEne,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::Index => "i(index)",
            Column::Orth => "orth(テキスト)",
            Column::Lemma => "lemma(基本形)",
            Column::ReadingForm => "reading_form(読みカナ)",
            Column::Pos => "pos(PartOfSpeech)",
            Column::PosLocalized => "pos(品詞)",
            Column::Tag => "tag(品詞詳細)",
            Column::Inflection => "inflection(活用情報)",
            Column::EntType => "ent_type(エンティティ型)",
            Column::EntIob => "ent_iob(エンティティIOB)",
            Column::Lang => "lang(言語)",
            Column::Dep => "dep(dependency)",
            Column::DepLocalized => "dep(構文従属関係)",
            Column::HeadIndex => "head.i(親index)",
            Column::BunsetuBiLabel => "bunsetu_bi_label",
            Column::BunsetuPositionType => "bunsetu_position_type",
            Column::IsBunsetuHead => "is_bunsetu_head",
            Column::EntLabelOntonotes => "ent_label_ontonotes",
            Column::EntLabelEne => "ent_label_ene",
        }
    }

    /// Position of the column within a row.
    pub fn position(self) -> usize {
        self as usize
    }
}

/// One token's cells, aligned with [`Column::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRow {
    cells: Vec<String>,
}

impl AnnotationRow {
    fn from_token(token: &Token, localizer: &Localizer, placeholder: &str) -> Self {
        let optional = |value: &Option<String>| match value.as_deref() {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => placeholder.to_string(),
        };

        let cells = Column::ALL
            .iter()
            .map(|column| match column {
                Column::Index => token.index.to_string(),
                Column::Orth => token.text.clone(),
                Column::Lemma => token.lemma.clone(),
                Column::ReadingForm => token.reading.clone(),
                Column::Pos => token.pos.clone(),
                Column::PosLocalized => localizer.pos_label(&token.pos).to_string(),
                Column::Tag => token.tag.clone(),
                Column::Inflection => optional(&token.inflection),
                Column::EntType => optional(&token.ent_type),
                Column::EntIob => optional(&token.ent_iob),
                Column::Lang => token.lang.clone(),
                Column::Dep => token.dep.clone(),
                Column::DepLocalized => localizer.dep_label(&token.dep).to_string(),
                Column::HeadIndex => token.head.to_string(),
                Column::BunsetuBiLabel => token.bunsetu_bi_label.clone(),
                Column::BunsetuPositionType => token.bunsetu_position_type.clone(),
                Column::IsBunsetuHead => {
                    let flag = if token.is_bunsetu_head { "True" } else { "False" };
                    flag.to_string()
                }
                Column::EntLabelOntonotes => optional(&token.ent_label_ontonotes),
                Column::EntLabelEne => optional(&token.ent_label_ene),
            })
            .collect();

        Self { cells }
    }

    pub fn get(&self, column: Column) -> &str {
        &self.cells[column.position()]
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

/// Attribute table for one sentence, one row per token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationTable {
    rows: Vec<AnnotationRow>,
}

impl AnnotationTable {
    pub fn build(sentence: &Sentence, localizer: &Localizer, placeholder: &str) -> Self {
        Self {
            rows: sentence
                .tokens()
                .iter()
                .map(|token| AnnotationRow::from_token(token, localizer, placeholder))
                .collect(),
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        &Column::ALL
    }

    pub fn rows(&self) -> &[AnnotationRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All cells of `column`, in token order.
    pub fn column(&self, column: Column) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row.get(column))
    }

    pub fn display(&self) -> AnnotationTableDisplay<'_> {
        AnnotationTableDisplay::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ginza_lunch;

    fn lunch_table() -> AnnotationTable {
        AnnotationTable::build(&ginza_lunch(0), &Localizer::japanese(), DEFAULT_PLACEHOLDER)
    }

    #[test]
    fn test_one_row_per_token_in_order() {
        let table = lunch_table();
        assert_eq!(table.len(), 9);
        let orth: Vec<&str> = table.column(Column::Orth).collect();
        assert_eq!(
            orth,
            vec!["銀座", "で", "ランチ", "を", "ご", "一緒", "し", "ましょう", "。"]
        );
        let index: Vec<&str> = table.column(Column::Index).collect();
        assert_eq!(index, vec!["0", "1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_root_row() {
        let table = lunch_table();
        let root = &table.rows()[5];
        assert_eq!(root.get(Column::Dep), "root");
        assert_eq!(root.get(Column::DepLocalized), "文の主辞");
        assert_eq!(root.get(Column::HeadIndex), "5");
        assert_eq!(root.get(Column::IsBunsetuHead), "True");
    }

    #[test]
    fn test_localized_columns() {
        let table = lunch_table();
        let first = &table.rows()[0];
        assert_eq!(first.get(Column::Pos), "PROPN");
        assert_eq!(first.get(Column::PosLocalized), "固有名詞");
        assert_eq!(first.get(Column::Dep), "obl");
        assert_eq!(first.get(Column::DepLocalized), "斜格要素");
    }

    #[test]
    fn test_optional_attributes_use_placeholder() {
        let table = lunch_table();
        let particle = &table.rows()[1];
        assert_eq!(particle.get(Column::Inflection), "-");
        assert_eq!(particle.get(Column::EntType), "-");
        assert_eq!(particle.get(Column::EntIob), "-");
        assert_eq!(particle.get(Column::EntLabelOntonotes), "-");
        assert_eq!(particle.get(Column::EntLabelEne), "-");

        let ginza = &table.rows()[0];
        assert_eq!(ginza.get(Column::EntType), "GPE");
        assert_eq!(ginza.get(Column::EntIob), "B");
        assert_eq!(ginza.get(Column::EntLabelOntonotes), "B-GPE");
        assert_eq!(ginza.get(Column::EntLabelEne), "B-City");

        let aux = &table.rows()[6];
        assert_eq!(aux.get(Column::Inflection), "サ行変格,連用形-一般");
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        let mut token = Token::new(0, "猫");
        token.inflection = Some(String::new());
        let table = AnnotationTable::build(
            &Sentence::new(vec![token]),
            &Localizer::japanese(),
            "(none)",
        );
        assert_eq!(table.rows()[0].get(Column::Inflection), "(none)");
    }

    #[test]
    fn test_no_empty_cells_for_optional_columns() {
        let table = lunch_table();
        let optional = [
            Column::Inflection,
            Column::EntType,
            Column::EntIob,
            Column::EntLabelOntonotes,
            Column::EntLabelEne,
        ];
        for column in optional {
            assert!(table.column(column).all(|cell| !cell.is_empty()));
        }
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        let token = Token::new(0, "ｗ").with_pos("EMOJI", "記号").with_dep("unknown", 0);
        let table = AnnotationTable::build(
            &Sentence::new(vec![token]),
            &Localizer::japanese(),
            DEFAULT_PLACEHOLDER,
        );
        assert_eq!(table.rows()[0].get(Column::PosLocalized), "EMOJI");
        assert_eq!(table.rows()[0].get(Column::DepLocalized), "unknown");
    }

    #[test]
    fn test_empty_sentence() {
        let table = AnnotationTable::build(
            &Sentence::default(),
            &Localizer::japanese(),
            DEFAULT_PLACEHOLDER,
        );
        assert!(table.is_empty());
        assert_eq!(table.columns().len(), 19);
    }

    #[test]
    fn test_column_positions_match_order() {
        for (i, column) in Column::ALL.iter().enumerate() {
            assert_eq!(column.position(), i);
        }
    }
}
