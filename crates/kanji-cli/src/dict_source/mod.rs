mod fetch;
mod kanjidic;
mod kanjivg;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use kanji_core::decompose::{parse_supplement, resolve, DecompositionMap};
use kanji_core::settings::SourceSettings;
use kanji_core::{Entry, EntryBuilder, IntegrityError};

pub use fetch::fetch;
pub use kanjidic::parse_kanjidic;
pub use kanjivg::parse_kanjivg;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("integrity error: {0}")]
    Integrity(#[from] IntegrityError),
}

/// File names `fetch` writes and `SourceFiles::in_dir` expects.
pub const KANJIDIC_FILE: &str = "kanjidic2.xml.gz";
pub const KANJIVG_FILE: &str = "kanjivg.xml.gz";
pub const KRADFILE: &str = "kradfile.utf8";
pub const KRADFILE2: &str = "kradfile2.utf8";

/// Paths of the four raw inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFiles {
    pub kanjidic: PathBuf,
    pub kanjivg: PathBuf,
    pub kradfile: PathBuf,
    pub kradfile2: PathBuf,
}

impl SourceFiles {
    pub fn from_settings(s: &SourceSettings) -> Self {
        Self {
            kanjidic: s.kanjidic.clone(),
            kanjivg: s.kanjivg.clone(),
            kradfile: s.kradfile.clone(),
            kradfile2: s.kradfile2.clone(),
        }
    }

    /// The layout produced by [`fetch`].
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            kanjidic: dir.join(KANJIDIC_FILE),
            kanjivg: dir.join(KANJIVG_FILE),
            kradfile: dir.join(KRADFILE),
            kradfile2: dir.join(KRADFILE2),
        }
    }

    /// Stroke trees plus both supplemental tables, closed over radical
    /// variants. A KRADFILE2 line for a character without a stroke tree is
    /// as fatal as one in KRADFILE.
    pub fn decompositions(&self) -> Result<DecompositionMap, SourceError> {
        eprintln!("Reading {}...", self.kanjivg.display());
        let strokes = parse_kanjivg(open_maybe_gz(&self.kanjivg)?)?;
        eprintln!("  {} glyphs", strokes.len());

        let mut supplements = Vec::new();
        for path in [&self.kradfile, &self.kradfile2] {
            eprintln!("Reading {}...", path.display());
            let text = fs::read_to_string(path)?;
            let lines = parse_supplement(&text)?;
            eprintln!("  {} lines", lines.len());
            supplements.extend(lines);
        }
        Ok(resolve(strokes, supplements)?)
    }

    /// Run the whole pipeline: decompositions, then one validated entry per
    /// character-dictionary record.
    pub fn entries(&self) -> Result<Vec<Entry>, SourceError> {
        let decompositions = self.decompositions()?;
        eprintln!("Reading {}...", self.kanjidic.display());
        let records = parse_kanjidic(open_maybe_gz(&self.kanjidic)?)?;
        eprintln!("  {} characters", records.len());
        Ok(EntryBuilder::new(&decompositions).build_all(records)?)
    }
}

/// Open a file for buffered reading, decompressing it when the name ends in
/// `.gz`.
pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, SourceError> {
    let file = File::open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}
