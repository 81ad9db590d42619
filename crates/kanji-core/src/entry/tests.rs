use std::collections::BTreeSet;

use proptest::prelude::*;

use super::*;
use crate::decompose::resolve;
use crate::testutil::{
    hi, neko, sample_decompositions, sample_entries, sample_records, stroke, strings,
};

fn build(record: KanjidicRecord) -> Result<Entry, IntegrityError> {
    let decompositions = sample_decompositions();
    EntryBuilder::new(&decompositions).build(record)
}

#[test]
fn neko_entry() {
    let e = build(neko()).unwrap();
    assert_eq!(e.char, '猫');
    assert_eq!(e.category, Category::Kanji);
    assert_eq!(e.level, None);
    assert_eq!(e.strokes, 11);
    assert_eq!(e.freq, Some(1702));
    assert_eq!(e.jlpt, Some(2));
    assert_eq!(e.skip.as_deref(), Some("1-3-8"));
    assert_eq!(e.rad, 94);
    assert_eq!(e.comp, "⽝⽥⾋犬犭犯猫田艸艹艾苗");
    assert_eq!(e.on, strings(&["ビョウ"]));
    assert_eq!(e.kun, strings(&["ねこ"]));
    assert!(e.nanori.is_empty());
    assert_eq!(e.meaning, strings(&["cat"]));
}

#[test]
fn hi_entry() {
    let e = build(hi()).unwrap();
    assert_eq!(e.level, Some(Level::Grade1));
    assert_eq!(e.strokes, 4);
    assert_eq!(e.freq, Some(1));
    assert_eq!(e.jlpt, Some(4));
    assert_eq!(e.skip.as_deref(), Some("3-3-1"));
    assert_eq!(e.rad, 72);
    assert_eq!(e.comp, "⽇日");
    assert_eq!(e.on, strings(&["ニチ", "ジツ"]));
    assert_eq!(e.kun, strings(&["ひ", "-び", "-か"]));
}

#[test]
fn comp_without_decomposition_is_radical_plus_self() {
    let decompositions = DecompositionMap::default();
    let e = EntryBuilder::new(&decompositions).build(neko()).unwrap();
    assert_eq!(e.comp, "⽝犬猫");
}

#[test]
fn comp_is_sorted_and_contains_radical_forms() {
    for e in sample_entries() {
        let chars: Vec<char> = e.comp.chars().collect();
        let mut sorted = chars.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(chars, sorted, "{}", e.char);
        let r = e.radical().unwrap();
        assert!(e.comp.contains(e.char));
        assert!(e.comp.contains(r.kangxi) && e.comp.contains(r.kanji));
    }
}

#[test]
fn build_all_keeps_input_order() {
    let chars: Vec<char> = sample_entries().iter().map(|e| e.char).collect();
    assert_eq!(chars, vec!['猫', '日', '描', '犬', '錨', '苗']);
    assert_eq!(sample_records().len(), chars.len());
}

#[test]
fn grade_mapping() {
    let expected = [
        (1, "常用1"),
        (2, "常用2"),
        (3, "常用3"),
        (4, "常用4"),
        (5, "常用5"),
        (6, "常用6"),
        (8, "常用"),
        (9, "人名"),
        (10, "人名(常用)"),
    ];
    for (grade, name) in expected {
        assert_eq!(Level::from_grade(grade).map(Level::as_str), Some(name));
    }
    for grade in [0, 7, 11, 255] {
        assert_eq!(Level::from_grade(grade), None);
    }
}

#[test]
fn unexpected_grade_is_fatal() {
    let mut record = hi();
    record.grade = Some(7);
    assert_eq!(
        build(record),
        Err(IntegrityError::UnexpectedGrade { char: '日', grade: 7 })
    );
}

#[test]
fn radical_out_of_range_is_fatal() {
    for rad in [0, 215, 1000] {
        let mut record = hi();
        record.rad = rad;
        assert_eq!(
            build(record),
            Err(IntegrityError::RadicalOutOfRange { char: '日', rad })
        );
    }
}

#[test]
fn literal_must_be_one_codepoint() {
    for literal in ["", "日本"] {
        let mut record = hi();
        record.literal = literal.to_string();
        assert_eq!(
            build(record),
            Err(IntegrityError::NotSingleCodepoint(literal.to_string()))
        );
    }
}

#[test]
fn non_ideograph_literal_is_fatal() {
    let mut record = hi();
    record.literal = "ひ".to_string();
    assert_eq!(build(record), Err(IntegrityError::UnexpectedCategory('ひ')));
}

#[test]
fn zero_strokes_is_fatal() {
    let mut record = hi();
    record.strokes = 0;
    assert_eq!(build(record), Err(IntegrityError::ZeroStrokes('日')));
}

#[test]
fn invalid_readings_are_fatal() {
    let mut record = hi();
    record.on.push("にち".to_string());
    assert!(matches!(
        build(record),
        Err(IntegrityError::InvalidReading { field: "on", .. })
    ));

    let mut record = hi();
    record.kun.push("ひカ".to_string());
    assert!(matches!(
        build(record),
        Err(IntegrityError::InvalidReading { field: "kun", .. })
    ));

    let mut record = hi();
    record.kun.push("カ".to_string());
    assert!(build(record).is_ok());
}

#[test]
fn line_breaks_are_fatal() {
    let mut record = hi();
    record.nanori.push("あ\nき".to_string());
    assert!(matches!(
        build(record),
        Err(IntegrityError::EmbeddedNewline { field: "nanori", .. })
    ));

    let mut record = hi();
    record.meanings.push(Meaning::english("two\nlines"));
    assert!(matches!(
        build(record),
        Err(IntegrityError::EmbeddedNewline { field: "meaning", .. })
    ));
}

#[test]
fn empty_values_are_fatal() {
    let mut record = hi();
    record.meanings.push(Meaning::english(""));
    assert_eq!(
        build(record),
        Err(IntegrityError::EmptyField { char: '日', field: "meaning" })
    );
}

#[test]
fn tagged_meanings_are_dropped_before_validation() {
    let mut record = hi();
    record.meanings.push(Meaning {
        text: "jour\nsoleil".to_string(),
        lang: Some("fr".to_string()),
    });
    let e = build(record).unwrap();
    assert_eq!(e.meaning.len(), 4);
}

#[test]
fn radical_mismatch_is_fatal() {
    let mut record = neko();
    record.rad = 72;
    assert_eq!(
        build(record),
        Err(IntegrityError::ComponentMismatch { char: '猫', rad: 72 })
    );
}

#[test]
fn shape_equivalence_satisfies_radical_check() {
    // 肌 is filed under 肉 (130) but drawn with 月.
    let decompositions = resolve(vec![stroke('肌', "月几")], Vec::new()).unwrap();
    let record = KanjidicRecord {
        literal: "肌".to_string(),
        strokes: 6,
        rad: 130,
        ..Default::default()
    };
    let e = EntryBuilder::new(&decompositions).build(record).unwrap();
    assert!(e.comp.contains('⽉'));
    assert!(e.comp.contains('⾁') && e.comp.contains('肉'));
}

#[test]
fn allow_listed_character_skips_radical_check() {
    // 為 is filed under 火 (86), which its glyph does not show.
    let decompositions = resolve(vec![stroke('為', "丶")], Vec::new()).unwrap();
    let record = KanjidicRecord {
        literal: "為".to_string(),
        strokes: 9,
        rad: 86,
        ..Default::default()
    };
    let e = EntryBuilder::new(&decompositions).build(record).unwrap();
    assert!(e.comp.contains('⽕') && e.comp.contains('火'));
}

#[test]
fn exception_lists_are_fixed() {
    assert_eq!(SHAPE_EQUIVALENCES.len(), 9);
    assert_eq!(RADICAL_MISMATCH_ALLOWED.chars().count(), 11);
    for (form, _) in SHAPE_EQUIVALENCES {
        assert!(radical::kanji_to_kangxi(form).is_some(), "{form}");
    }
}

#[test]
fn radical_consistent_accepts_empty() {
    let r = radical::radical(94).unwrap();
    assert!(radical_consistent('猫', r, &BTreeSet::new()));
    assert!(!radical_consistent('猫', r, &"田".chars().collect()));
}

#[test]
fn category_of_codepoint() {
    assert_eq!(Category::of('猫'), Some(Category::Kanji));
    assert_eq!(Category::of('\u{F91D}'), Some(Category::CompatibilityIdeograph));
    assert_eq!(Category::of('㐂'), Some(Category::UnifiedIdeograph));
    assert_eq!(Category::of('𠀋'), Some(Category::UnifiedIdeograph));
    assert_eq!(Category::of('ね'), None);
    for c in Category::ALL {
        assert_eq!(c.as_str().parse::<Category>(), Ok(c));
    }
}

#[test]
fn level_rank_is_declaration_order() {
    for (i, level) in Level::ALL.into_iter().enumerate() {
        assert_eq!(level_rank(Some(level.as_str())), i as u8);
        assert_eq!(level.as_str().parse::<Level>(), Ok(level));
    }
    assert_eq!(level_rank(None), UNRANKED_LEVEL);
    assert_eq!(level_rank(Some("N5")), UNRANKED_LEVEL);
}

proptest! {
    #[test]
    fn level_rank_is_total(s in ".{0,8}") {
        let rank = level_rank(Some(&s));
        match s.parse::<Level>() {
            Ok(level) => prop_assert_eq!(rank, level.rank()),
            Err(_) => prop_assert!(rank > 8),
        }
    }

    #[test]
    fn category_is_pure(code in 0x3400u32..0x32000) {
        if let Some(c) = char::from_u32(code) {
            prop_assert_eq!(Category::of(c), Category::of(c));
            if let Some(cat) = Category::of(c) {
                prop_assert_eq!(cat.as_str().parse::<Category>(), Ok(cat));
            }
        }
    }
}
