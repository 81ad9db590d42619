//! Component decomposition: merges the stroke-tree dataset with the two
//! supplemental radical tables and folds radical variants onto their
//! canonical forms.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, debug_span, info};

use crate::radical::close_over_variants;
use crate::unicode::{is_component, is_ideo, is_kana, is_kanji, is_punc, is_radical};
use crate::IntegrityError;

/// One glyph from the stroke-tree dataset: the character plus the labels of
/// the stroke groups its glyph is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrokeRecord {
    pub char: char,
    pub elements: Vec<char>,
}

/// One line of a supplemental table: `CHAR : C1 C2 ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplementEntry {
    /// 1-based line number within its file.
    pub line: usize,
    pub char: char,
    pub components: Vec<char>,
}

/// Parse a supplemental radical table. Blank lines and `#` comments are
/// skipped; `｜` is read as `丨`.
pub fn parse_supplement(text: &str) -> Result<Vec<SupplementEntry>, IntegrityError> {
    let mut entries = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let malformed = || IntegrityError::MalformedSupplement {
            line: i + 1,
            text: line.to_string(),
        };
        let (head, rest) = line.split_once(" : ").ok_or_else(malformed)?;
        let mut head_chars = head.chars();
        let (Some(char), None) = (head_chars.next(), head_chars.next()) else {
            return Err(malformed());
        };
        let components = rest
            .split_whitespace()
            .flat_map(str::chars)
            .map(|c| if c == '｜' { '丨' } else { c })
            .collect();
        entries.push(SupplementEntry {
            line: i + 1,
            char,
            components,
        });
    }
    Ok(entries)
}

/// Read-only `char → components` map produced by [`DecompositionResolver`].
#[derive(Debug, Clone, Default)]
pub struct DecompositionMap {
    map: HashMap<char, BTreeSet<char>>,
}

impl DecompositionMap {
    pub fn get(&self, c: char) -> Option<&BTreeSet<char>> {
        self.map.get(&c)
    }

    pub fn contains(&self, c: char) -> bool {
        self.map.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &BTreeSet<char>)> {
        self.map.iter().map(|(&c, set)| (c, set))
    }
}

/// Accumulates decomposition sources, then closes every component set over
/// the radical variant tables.
///
/// Stroke-tree records must be added before any supplement: a supplemental
/// line for a character the stroke tree does not know is an error, not a new
/// entry.
#[derive(Debug, Default)]
pub struct DecompositionResolver {
    map: HashMap<char, BTreeSet<char>>,
    skipped: usize,
}

impl DecompositionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one stroke-tree glyph. Returns `false` when the record is filtered
    /// out (kana, punctuation, or anything that is neither an ideograph nor a
    /// radical).
    pub fn add_stroke_record(&mut self, record: StrokeRecord) -> Result<bool, IntegrityError> {
        let StrokeRecord { char, elements } = record;
        if is_kana(char) || is_punc(char) || !(is_ideo(char) || is_radical(char)) {
            self.skipped += 1;
            return Ok(false);
        }
        if self.map.contains_key(&char) {
            return Err(IntegrityError::DuplicateStrokeRecord(char));
        }
        let mut components: BTreeSet<char> = elements.into_iter().collect();
        components.insert(char);
        if let Some(&bad) = components.iter().find(|&&c| !is_component(c)) {
            return Err(IntegrityError::InvalidComponent {
                owner: char,
                component: bad,
            });
        }
        self.map.insert(char, components);
        Ok(true)
    }

    pub fn add_stroke_records(
        &mut self,
        records: impl IntoIterator<Item = StrokeRecord>,
    ) -> Result<usize, IntegrityError> {
        let mut added = 0;
        for record in records {
            if self.add_stroke_record(record)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Merge one supplemental line into an existing decomposition.
    pub fn add_supplement(&mut self, entry: SupplementEntry) -> Result<(), IntegrityError> {
        let SupplementEntry {
            char, components, ..
        } = entry;
        if !is_kanji(char) {
            return Err(IntegrityError::NotKanji(char));
        }
        let existing = self
            .map
            .get_mut(&char)
            .filter(|set| set.contains(&char))
            .ok_or(IntegrityError::MissingDecomposition(char))?;
        if let Some(&bad) = components.iter().find(|&&c| !(is_kanji(c) || is_kana(c))) {
            return Err(IntegrityError::InvalidComponent {
                owner: char,
                component: bad,
            });
        }
        existing.extend(components);
        Ok(())
    }

    pub fn add_supplements(
        &mut self,
        entries: impl IntoIterator<Item = SupplementEntry>,
    ) -> Result<usize, IntegrityError> {
        let mut merged = 0;
        for entry in entries {
            self.add_supplement(entry)?;
            merged += 1;
        }
        Ok(merged)
    }

    /// Apply the variant closure once to every set and freeze the result.
    pub fn finish(self) -> DecompositionMap {
        let _span = debug_span!("close_over_variants", chars = self.map.len()).entered();
        let mut map = self.map;
        let mut grown = 0usize;
        for components in map.values_mut() {
            let before = components.len();
            close_over_variants(components);
            if components.len() != before {
                grown += 1;
            }
        }
        debug!(grown, "variant closure applied");
        info!(
            chars = map.len(),
            skipped = self.skipped,
            "decomposition map ready"
        );
        DecompositionMap { map }
    }
}

/// Build the decomposition map from all three sources in one call.
pub fn resolve(
    strokes: impl IntoIterator<Item = StrokeRecord>,
    supplements: impl IntoIterator<Item = SupplementEntry>,
) -> Result<DecompositionMap, IntegrityError> {
    let _span = debug_span!("resolve").entered();
    let mut resolver = DecompositionResolver::new();
    let glyphs = resolver.add_stroke_records(strokes)?;
    let lines = resolver.add_supplements(supplements)?;
    debug!(glyphs, lines, "sources merged");
    Ok(resolver.finish())
}
