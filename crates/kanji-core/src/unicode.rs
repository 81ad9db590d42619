//! Character-level Unicode classification for the ideograph ranges covered
//! by the source dictionaries.

/// Check the full Hiragana block (U+3040..U+309F).
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Check the full Katakana block (U+30A0..U+30FF). Includes the prolonged
/// sound mark ー (U+30FC) and the middle dot ・ (U+30FB).
pub fn is_katakana(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

/// Hiragana, katakana, or the small katakana of the phonetic extensions block
/// (U+31F0..U+31FF) that show up as stroke-group labels.
pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c) || ('\u{31F0}'..='\u{31FF}').contains(&c)
}

/// CJK Unified Ideographs (U+4E00..U+9FFF), categorised as `KANJI`.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// CJK Compatibility Ideographs and their supplement.
pub fn is_compat(c: char) -> bool {
    ('\u{F900}'..='\u{FAFF}').contains(&c) || ('\u{2F800}'..='\u{2FA1F}').contains(&c)
}

/// CJK Unified Ideographs extensions A through F, and G.
pub fn is_uniext(c: char) -> bool {
    ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2EBEF}').contains(&c)
        || ('\u{30000}'..='\u{3134F}').contains(&c)
}

/// Any ideograph the dictionaries can contain.
pub fn is_ideo(c: char) -> bool {
    is_kanji(c) || is_compat(c) || is_uniext(c)
}

/// Kangxi radicals (U+2F00..U+2FDF) and the CJK Radicals Supplement
/// (U+2E80..U+2EFF).
pub fn is_radical(c: char) -> bool {
    ('\u{2F00}'..='\u{2FDF}').contains(&c) || ('\u{2E80}'..='\u{2EFF}').contains(&c)
}

/// CJK Symbols and Punctuation (U+3000..U+303F).
pub fn is_punc(c: char) -> bool {
    ('\u{3000}'..='\u{303F}').contains(&c)
}

/// Characters that may appear as components in a decomposition.
pub fn is_component(c: char) -> bool {
    is_ideo(c) || is_kana(c) || is_radical(c)
}

/// An on'yomi reading: katakana plus the `.`/`-` morpheme markers.
pub fn is_on_reading(s: &str) -> bool {
    s.chars().all(|c| is_katakana(c) || c == '.' || c == '-')
}

/// A kun'yomi reading: either hiragana (with `.`, `-`, `ー`) or entirely
/// katakana.
pub fn is_kun_reading(s: &str) -> bool {
    s.chars()
        .all(|c| is_hiragana(c) || c == '.' || c == '-' || c == 'ー')
        || s.chars().all(is_katakana)
}

/// Remove the `.`/`-` markers kanjidic uses for okurigana and affix
/// boundaries.
pub fn strip_markers(s: &str) -> String {
    s.chars().filter(|&c| c != '.' && c != '-').collect()
}
