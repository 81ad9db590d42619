//! Shared fixtures for unit tests: a handful of real KANJIDIC2/KanjiVG
//! characters, trimmed to the fields the tests look at.

use crate::decompose::{parse_supplement, resolve, DecompositionMap, StrokeRecord};
use crate::entry::{Entry, EntryBuilder, KanjidicRecord, Meaning};

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn stroke(char: char, elements: &str) -> StrokeRecord {
    StrokeRecord {
        char,
        elements: elements.chars().collect(),
    }
}

pub fn sample_decompositions() -> DecompositionMap {
    let strokes = vec![
        stroke('猫', "犭苗艹田"),
        stroke('日', ""),
        stroke('描', "扌苗艹田"),
        stroke('犬', "大"),
        stroke('錨', "金苗艹田"),
        stroke('苗', "艹田"),
    ];
    let supplements = parse_supplement("# test\n猫 : 犯 艾 田\n").unwrap();
    resolve(strokes, supplements).unwrap()
}

pub fn neko() -> KanjidicRecord {
    KanjidicRecord {
        literal: "猫".to_string(),
        grade: None,
        strokes: 11,
        freq: Some(1702),
        jlpt: Some(2),
        skip: Some("1-3-8".to_string()),
        rad: 94,
        on: strings(&["ビョウ"]),
        kun: strings(&["ねこ"]),
        nanori: Vec::new(),
        meanings: vec![
            Meaning::english("cat"),
            Meaning {
                text: "chat".to_string(),
                lang: Some("fr".to_string()),
            },
        ],
    }
}

pub fn hi() -> KanjidicRecord {
    KanjidicRecord {
        literal: "日".to_string(),
        grade: Some(1),
        strokes: 4,
        freq: Some(1),
        jlpt: Some(4),
        skip: Some("3-3-1".to_string()),
        rad: 72,
        on: strings(&["ニチ", "ジツ"]),
        kun: strings(&["ひ", "-び", "-か"]),
        nanori: strings(&["あき", "か"]),
        meanings: ["day", "sun", "Japan", "counter for days"]
            .into_iter()
            .map(Meaning::english)
            .collect(),
    }
}

pub fn sample_records() -> Vec<KanjidicRecord> {
    vec![
        neko(),
        hi(),
        KanjidicRecord {
            literal: "描".to_string(),
            grade: Some(8),
            strokes: 11,
            freq: Some(1464),
            jlpt: Some(1),
            skip: Some("1-3-8".to_string()),
            rad: 64,
            on: strings(&["ビョウ"]),
            kun: strings(&["えが.く", "か.く"]),
            nanori: Vec::new(),
            meanings: vec![Meaning::english("sketch"), Meaning::english("draw")],
        },
        KanjidicRecord {
            literal: "犬".to_string(),
            grade: Some(1),
            strokes: 4,
            freq: Some(1326),
            jlpt: Some(3),
            skip: Some("4-4-3".to_string()),
            rad: 94,
            on: strings(&["ケン"]),
            kun: strings(&["いぬ", "いぬ-"]),
            nanori: Vec::new(),
            meanings: vec![Meaning::english("dog")],
        },
        KanjidicRecord {
            literal: "錨".to_string(),
            grade: None,
            strokes: 16,
            freq: None,
            jlpt: None,
            skip: Some("1-8-8".to_string()),
            rad: 167,
            on: strings(&["ビョウ"]),
            kun: strings(&["いかり"]),
            nanori: Vec::new(),
            meanings: vec![Meaning::english("anchor")],
        },
        KanjidicRecord {
            literal: "苗".to_string(),
            grade: Some(8),
            strokes: 8,
            freq: None,
            jlpt: Some(1),
            skip: Some("2-3-5".to_string()),
            rad: 140,
            on: strings(&["ビョウ", "ミョウ"]),
            kun: strings(&["なえ", "なわ-"]),
            nanori: strings(&["え", "みつ"]),
            meanings: vec![Meaning::english("seedling"), Meaning::english("sapling")],
        },
    ]
}

pub fn sample_entries() -> Vec<Entry> {
    let decompositions = sample_decompositions();
    EntryBuilder::new(&decompositions)
        .build_all(sample_records())
        .unwrap()
}
