//! Japanese display labels for part-of-speech and dependency codes.
//!
//! Lookups never fail: a code without an entry is displayed as itself.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const POS_JA: &[(&str, &str)] = &[
    ("ADJ", "形容詞"),
    ("ADP", "設置詞"),
    ("ADV", "副詞"),
    ("AUX", "助動詞"),
    ("CCONJ", "接続詞"),
    ("DET", "限定詞"),
    ("INTJ", "間投詞"),
    ("NOUN", "名詞"),
    ("NUM", "数詞"),
    ("PART", "助詞"),
    ("PRON", "代名詞"),
    ("PROPN", "固有名詞"),
    ("PUNCT", "句読点"),
    ("SCONJ", "連結詞"),
    ("SYM", "シンボル"),
    ("VERB", "動詞"),
    ("X", "その他"),
];

const DEP_JA: &[(&str, &str)] = &[
    ("nsubj", "名詞句主語"),
    ("obj", "目的語"),
    ("iobj", "間接目的語"),
    ("csubj", "節主語"),
    ("ccomp", "節補語"),
    ("xcomp", "開いた節補語"),
    ("obl", "斜格要素"),
    ("vocative", "呼格要素"),
    ("expl", "虚辞"),
    ("dislocated", "転位された要素"),
    ("advcl", "副詞的修飾節"),
    ("advmod", "副詞修飾語"),
    ("discourse", "談話要素"),
    ("aux", "助動詞"),
    ("cop", "コピュラ"),
    ("mark", "節標識"),
    ("nmod", "名詞修飾語"),
    ("appos", "同格要素"),
    ("nummod", "数詞"),
    ("acl", "形容詞的修飾節"),
    ("amod", "形容詞修飾語"),
    ("det", "限定詞"),
    ("clf", "助数詞"),
    ("case", "格標識"),
    ("conj", "等位並列句・節"),
    ("cc", "等位接続詞"),
    ("fixed", "複合機能表現"),
    ("flat", "構造のない複単語表現"),
    ("compound", "複合語"),
    ("list", "リスト表現"),
    ("parataxis", "並置表現"),
    ("orphan", "主辞がない語"),
    ("goeswith", "単語区切り誤り"),
    ("reparandum", "言い直し"),
    ("punct", "句読点"),
    ("root", "文の主辞"),
    ("dep", "不明な依存関係"),
];

static POS_LABELS: Lazy<LabelMap> = Lazy::new(|| LabelMap::from_pairs(POS_JA));
static DEP_LABELS: Lazy<LabelMap> = Lazy::new(|| LabelMap::from_pairs(DEP_JA));

/// Mapping from annotation codes to display labels, with identity fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: HashMap<String, String>,
}

impl LabelMap {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            labels: pairs
                .iter()
                .map(|(code, label)| (code.to_string(), label.to_string()))
                .collect(),
        }
    }

    /// The label for `code`, or `code` itself when unmapped.
    pub fn get<'a>(&'a self, code: &'a str) -> &'a str {
        self.labels.get(code).map_or(code, String::as_str)
    }

    /// Add or replace entries.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = (String, String)>) {
        self.labels.extend(entries);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// The pair of label maps used by the diagram and table builders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localizer {
    pub pos: LabelMap,
    pub dep: LabelMap,
}

impl Localizer {
    /// Built-in Japanese labels for Universal Dependencies codes.
    pub fn japanese() -> Self {
        Self {
            pos: POS_LABELS.clone(),
            dep: DEP_LABELS.clone(),
        }
    }

    /// Labels that display every code unchanged.
    pub fn identity() -> Self {
        Self {
            pos: LabelMap::default(),
            dep: LabelMap::default(),
        }
    }

    pub fn pos_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.pos.get(code)
    }

    pub fn dep_label<'a>(&'a self, code: &'a str) -> &'a str {
        self.dep.get(code)
    }
}

impl Default for Localizer {
    fn default() -> Self {
        Self::japanese()
    }
}
