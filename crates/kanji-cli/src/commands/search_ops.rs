use std::path::Path;
use std::process;

use kanji_core::radical;
use kanji_core::settings::settings;
use kanji_core::{Entry, KanjiStore, Level};
use unicode_width::UnicodeWidthStr;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Display width of the readings column in one-line output.
const READING_COLUMN: usize = 28;

fn open_store(db: &Path) -> KanjiStore {
    let db_name = db.display();
    die!(
        KanjiStore::open_read_only(db),
        "Error opening {db_name}: {}"
    )
}

/// `-n` wins over `search.max_results`; zero means unlimited in both.
fn result_limit(n: Option<usize>) -> Option<usize> {
    match n {
        Some(0) => None,
        Some(n) => Some(n),
        None => settings().search.limit(),
    }
}

pub fn search(db: &Path, query: &str, n: Option<usize>, json: bool) {
    let store = open_store(db);
    let entries = die!(store.search(query, result_limit(n)), "Error: {}");
    print_entries(&entries, json);
}

pub fn containing(db: &Path, component: &str, n: Option<usize>, json: bool) {
    let mut chars = component.chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        eprintln!("Error: expected a single character, got {component:?}");
        process::exit(1);
    };
    let store = open_store(db);
    let entries = die!(store.containing(c, result_limit(n)), "Error: {}");
    print_entries(&entries, json);
}

pub fn by_freq(db: &Path) {
    let store = open_store(db);
    for (c, freq) in die!(store.by_freq(), "Error: {}") {
        println!("{c} {freq}");
    }
}

pub fn by_level(db: &Path, level: &str) {
    let level: Level = die!(level.parse(), "Error: {}");
    let store = open_store(db);
    let chars: String = die!(store.by_level(level), "Error: {}")
        .into_iter()
        .collect();
    println!("{chars}");
}

/// Print the 214 radicals, one stroke-count band per line.
pub fn radicals() {
    for (strokes, group) in radical::stroke_groups() {
        let forms: Vec<String> = group
            .iter()
            .map(|r| format!("{}{}", r.index, r.kanji))
            .collect();
        println!("{strokes:>2}: {}", forms.join(" "));
    }
}

fn print_entries(entries: &[Entry], json: bool) {
    for e in entries {
        if json {
            let line = die!(serde_json::to_string(e), "Error encoding entry: {}");
            println!("{line}");
        } else {
            println!("{}", format_line(e));
        }
    }
    if !json {
        eprintln!("({} results)", entries.len());
    }
}

/// One-line summary: character, readings padded to a fixed display width,
/// then meanings.
fn format_line(e: &Entry) -> String {
    let readings = e
        .on
        .iter()
        .chain(&e.kun)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "{} {} {}",
        e.char,
        pad(&readings, READING_COLUMN),
        e.meaning.join("; ")
    )
}

/// Pad to `width` terminal columns; wide characters count as two.
fn pad(text: &str, width: usize) -> String {
    let display_width = UnicodeWidthStr::width(text);
    if display_width < width {
        format!("{text}{}", " ".repeat(width - display_width))
    } else {
        text.to_string()
    }
}
