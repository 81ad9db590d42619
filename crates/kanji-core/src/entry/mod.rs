//! Canonical per-ideograph entries and the builder that derives them from
//! raw character-dictionary records.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info};

use crate::decompose::DecompositionMap;
use crate::radical::{self, Radical, RADICAL_COUNT};
use crate::unicode::{is_compat, is_kanji, is_kun_reading, is_on_reading, is_uniext};
use crate::IntegrityError;

#[cfg(test)]
mod tests;

/// Unicode block family of an entry's codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "KANJI")]
    Kanji,
    #[serde(rename = "CJK COMPATIBILITY IDEOGRAPH")]
    CompatibilityIdeograph,
    #[serde(rename = "CJK UNIFIED IDEOGRAPH")]
    UnifiedIdeograph,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Kanji,
        Category::CompatibilityIdeograph,
        Category::UnifiedIdeograph,
    ];

    /// Classify a codepoint. `None` outside the three covered ranges.
    pub fn of(c: char) -> Option<Self> {
        if is_kanji(c) {
            Some(Category::Kanji)
        } else if is_compat(c) {
            Some(Category::CompatibilityIdeograph)
        } else if is_uniext(c) {
            Some(Category::UnifiedIdeograph)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Kanji => "KANJI",
            Category::CompatibilityIdeograph => "CJK COMPATIBILITY IDEOGRAPH",
            Category::UnifiedIdeograph => "CJK UNIFIED IDEOGRAPH",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// School-grade / name-use classification.
///
/// Declaration order is the ranking order used for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "常用1")]
    Grade1,
    #[serde(rename = "常用2")]
    Grade2,
    #[serde(rename = "常用3")]
    Grade3,
    #[serde(rename = "常用4")]
    Grade4,
    #[serde(rename = "常用5")]
    Grade5,
    #[serde(rename = "常用6")]
    Grade6,
    #[serde(rename = "常用")]
    Joyo,
    #[serde(rename = "人名")]
    Jinmeiyo,
    #[serde(rename = "人名(常用)")]
    JinmeiyoJoyoVariant,
}

/// Rank given to entries without a recognised level.
pub const UNRANKED_LEVEL: u8 = 99;

impl Level {
    pub const ALL: [Level; 9] = [
        Level::Grade1,
        Level::Grade2,
        Level::Grade3,
        Level::Grade4,
        Level::Grade5,
        Level::Grade6,
        Level::Joyo,
        Level::Jinmeiyo,
        Level::JinmeiyoJoyoVariant,
    ];

    /// Map a KANJIDIC2 `<grade>` code. Codes 1–6 are the school grades, 8 the
    /// remaining jōyō kanji, 9 jinmeiyō, 10 jinmeiyō variants of jōyō kanji.
    pub fn from_grade(grade: u32) -> Option<Self> {
        match grade {
            1 => Some(Level::Grade1),
            2 => Some(Level::Grade2),
            3 => Some(Level::Grade3),
            4 => Some(Level::Grade4),
            5 => Some(Level::Grade5),
            6 => Some(Level::Grade6),
            8 => Some(Level::Joyo),
            9 => Some(Level::Jinmeiyo),
            10 => Some(Level::JinmeiyoJoyoVariant),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Grade1 => "常用1",
            Level::Grade2 => "常用2",
            Level::Grade3 => "常用3",
            Level::Grade4 => "常用4",
            Level::Grade5 => "常用5",
            Level::Grade6 => "常用6",
            Level::Joyo => "常用",
            Level::Jinmeiyo => "人名",
            Level::JinmeiyoJoyoVariant => "人名(常用)",
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown level: {s}"))
    }
}

/// Rank of a stored level string: 0..=8 in declaration order, or
/// [`UNRANKED_LEVEL`] for anything else, including a missing level.
pub fn level_rank(level: Option<&str>) -> u8 {
    level
        .and_then(|s| s.parse::<Level>().ok())
        .map_or(UNRANKED_LEVEL, Level::rank)
}

/// One dictionary entry per ideograph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub char: char,
    pub category: Category,
    pub level: Option<Level>,
    pub strokes: u32,
    pub freq: Option<u32>,
    /// Pre-2010 JLPT level, 1–4.
    pub jlpt: Option<u8>,
    pub skip: Option<String>,
    /// Classical radical number, 1..=214.
    pub rad: u8,
    /// Sorted, de-duplicated components, always including the character and
    /// both forms of its radical.
    pub comp: String,
    pub on: Vec<String>,
    pub kun: Vec<String>,
    pub nanori: Vec<String>,
    pub meaning: Vec<String>,
}

impl Entry {
    pub fn code(&self) -> u32 {
        self.char as u32
    }

    pub fn radical(&self) -> Option<Radical> {
        radical::radical(self.rad)
    }
}

/// A meaning gloss with its optional `m_lang` tag. Untagged glosses are
/// English.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meaning {
    pub text: String,
    pub lang: Option<String>,
}

impl Meaning {
    pub fn english(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: None,
        }
    }
}

/// One `<character>` of the character dictionary, already tokenised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanjidicRecord {
    pub literal: String,
    pub grade: Option<u32>,
    pub strokes: u32,
    pub freq: Option<u32>,
    pub jlpt: Option<u8>,
    pub skip: Option<String>,
    /// Classical radical number as found in the source; range-checked by the
    /// builder.
    pub rad: u32,
    pub on: Vec<String>,
    pub kun: Vec<String>,
    pub nanori: Vec<String>,
    pub meanings: Vec<Meaning>,
}

/// Pairs `(radical kanji form, alternative component)` where the
/// decomposition legitimately spells the radical with a different shape,
/// e.g. 肉 drawn as ⽉ or 白 drawn as ⽇.
pub const SHAPE_EQUIVALENCES: [(char, char); 9] = [
    ('肉', '⽉'),
    ('白', '⽇'),
    ('曰', '⽇'),
    ('臼', '𦥑'),
    ('匸', '⼕'),
    ('夊', '⼡'),
    ('夂', '久'),
    ('人', '⼊'),
    ('入', '⼈'),
];

/// Characters whose decomposition does not contain their classical radical
/// in any recognisable form.
pub const RADICAL_MISMATCH_ALLOWED: &str = "為亀巨尭壮争単壷丗舅关";

/// Whether a decomposition is consistent with the classical radical.
///
/// An empty decomposition (no stroke-tree data) is always accepted.
pub fn radical_consistent(char: char, radical: Radical, components: &BTreeSet<char>) -> bool {
    if components.is_empty()
        || (components.contains(&radical.kangxi) && components.contains(&radical.kanji))
    {
        return true;
    }
    let shape_match = SHAPE_EQUIVALENCES
        .iter()
        .any(|&(form, alt)| form == radical.kanji && components.contains(&alt));
    shape_match || RADICAL_MISMATCH_ALLOWED.contains(char)
}

/// Builds validated [`Entry`] values from raw records.
pub struct EntryBuilder<'a> {
    decompositions: &'a DecompositionMap,
}

impl<'a> EntryBuilder<'a> {
    pub fn new(decompositions: &'a DecompositionMap) -> Self {
        Self { decompositions }
    }

    pub fn build(&self, record: KanjidicRecord) -> Result<Entry, IntegrityError> {
        let char = single_codepoint(&record.literal)?;
        let category = Category::of(char).ok_or(IntegrityError::UnexpectedCategory(char))?;
        let level = match record.grade {
            Some(grade) => Some(
                Level::from_grade(grade).ok_or(IntegrityError::UnexpectedGrade { char, grade })?,
            ),
            None => None,
        };
        if record.strokes == 0 {
            return Err(IntegrityError::ZeroStrokes(char));
        }
        let radical = u8::try_from(record.rad)
            .ok()
            .filter(|&r| (1..=RADICAL_COUNT as u8).contains(&r))
            .and_then(radical::radical)
            .ok_or(IntegrityError::RadicalOutOfRange {
                char,
                rad: record.rad,
            })?;

        let mut components = self.decompositions.get(char).cloned().unwrap_or_default();
        if !radical_consistent(char, radical, &components) {
            return Err(IntegrityError::ComponentMismatch {
                char,
                rad: radical.index,
            });
        }
        components.extend([radical.kangxi, radical.kanji, char]);
        let comp: String = components.into_iter().collect();

        let meaning: Vec<String> = record
            .meanings
            .into_iter()
            .filter(|m| m.lang.is_none())
            .map(|m| m.text)
            .collect();

        check_field(char, "on", &record.on)?;
        check_field(char, "kun", &record.kun)?;
        check_field(char, "nanori", &record.nanori)?;
        check_field(char, "meaning", &meaning)?;
        if let Some(bad) = record.on.iter().find(|r| !is_on_reading(r)) {
            return Err(invalid_reading(char, "on", bad));
        }
        if let Some(bad) = record.kun.iter().find(|r| !is_kun_reading(r)) {
            return Err(invalid_reading(char, "kun", bad));
        }

        Ok(Entry {
            char,
            category,
            level,
            strokes: record.strokes,
            freq: record.freq,
            jlpt: record.jlpt,
            skip: record.skip,
            rad: radical.index,
            comp,
            on: record.on,
            kun: record.kun,
            nanori: record.nanori,
            meaning,
        })
    }

    /// Build every record in input order, stopping at the first failure.
    pub fn build_all(
        &self,
        records: impl IntoIterator<Item = KanjidicRecord>,
    ) -> Result<Vec<Entry>, IntegrityError> {
        let _span = debug_span!("build_entries").entered();
        let mut entries = Vec::new();
        let mut without_decomposition = 0usize;
        for record in records {
            let entry = self.build(record)?;
            if !self.decompositions.contains(entry.char) {
                without_decomposition += 1;
            }
            entries.push(entry);
        }
        debug!(without_decomposition, "entries lacking stroke data");
        info!(entries = entries.len(), "entries built");
        Ok(entries)
    }
}

fn single_codepoint(literal: &str) -> Result<char, IntegrityError> {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(IntegrityError::NotSingleCodepoint(literal.to_string())),
    }
}

/// Stored list fields are newline-joined, so no element may contain a line
/// break, and an empty element would not survive the split.
fn check_field(char: char, field: &'static str, values: &[String]) -> Result<(), IntegrityError> {
    for value in values {
        if value.contains(['\n', '\r']) {
            return Err(IntegrityError::EmbeddedNewline {
                char,
                field,
                value: value.clone(),
            });
        }
        if value.is_empty() {
            return Err(IntegrityError::EmptyField { char, field });
        }
    }
    Ok(())
}

fn invalid_reading(char: char, field: &'static str, reading: &str) -> IntegrityError {
    IntegrityError::InvalidReading {
        char,
        field,
        reading: reading.to_string(),
    }
}

