//! Hand-annotated sentences shared by unit tests.

use crate::{Sentence, Token};

/// 銀座でランチをご一緒しましょう。 as GiNZA annotates it, starting at `start`.
///
/// The root is 一緒 (offset 5); every other token hangs off it directly or
/// through its bunsetu head.
pub(crate) fn ginza_lunch(start: usize) -> Sentence {
    let at = |offset: usize| start + offset;
    Sentence::new(vec![
        Token::new(at(0), "銀座")
            .with_reading("ギンザ")
            .with_pos("PROPN", "名詞-固有名詞-地名-一般")
            .with_dep("obl", at(5))
            .with_entity("B", "GPE")
            .with_ene("B-City")
            .with_bunsetu("B", "SEM_HEAD"),
        Token::new(at(1), "で")
            .with_reading("デ")
            .with_pos("ADP", "助詞-格助詞")
            .with_dep("case", at(0))
            .with_bunsetu("I", "SYN_HEAD"),
        Token::new(at(2), "ランチ")
            .with_reading("ランチ")
            .with_pos("NOUN", "名詞-普通名詞-一般")
            .with_dep("obj", at(5))
            .with_bunsetu("B", "SEM_HEAD"),
        Token::new(at(3), "を")
            .with_reading("ヲ")
            .with_pos("ADP", "助詞-格助詞")
            .with_dep("case", at(2))
            .with_bunsetu("I", "SYN_HEAD"),
        Token::new(at(4), "ご")
            .with_reading("ゴ")
            .with_pos("NOUN", "接頭辞")
            .with_dep("compound", at(5))
            .with_bunsetu("B", "CONT"),
        Token::new(at(5), "一緒")
            .with_reading("イッショ")
            .with_pos("VERB", "名詞-普通名詞-サ変可能")
            .with_dep("root", at(5))
            .with_bunsetu("I", "ROOT"),
        Token::new(at(6), "し")
            .with_lemma("する")
            .with_reading("シ")
            .with_pos("AUX", "動詞-非自立可能")
            .with_inflection("サ行変格,連用形-一般")
            .with_dep("aux", at(5))
            .with_bunsetu("I", "SYN_HEAD"),
        Token::new(at(7), "ましょう")
            .with_lemma("ます")
            .with_reading("マショウ")
            .with_pos("AUX", "助動詞")
            .with_inflection("助動詞-マス,意志推量形")
            .with_dep("aux", at(5))
            .with_bunsetu("I", "SYN_HEAD"),
        Token::new(at(8), "。")
            .with_reading("。")
            .with_pos("PUNCT", "補助記号-句点")
            .with_dep("punct", at(5))
            .with_bunsetu("I", "CONT"),
    ])
}
