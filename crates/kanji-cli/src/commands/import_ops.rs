use std::fs;
use std::path::Path;
use std::process;

use kanji_core::settings::settings;
use kanji_core::KanjiStore;

use crate::dict_source::{self, SourceFiles};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn fetch(output_dir: &str) {
    eprintln!("Fetching sources into {output_dir}...");
    die!(
        dict_source::fetch(Path::new(output_dir)),
        "Error fetching sources: {}"
    );
}

/// Build the dataset from `sources_dir` (the `fetch` layout) or, without it,
/// from the configured source paths, and replace the store's contents.
pub fn import(sources_dir: Option<&str>, db: &Path) {
    let sources = match sources_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            if !dir.is_dir() {
                eprintln!("Error: {} is not a directory", dir.display());
                process::exit(1);
            }
            SourceFiles::in_dir(dir)
        }
        None => SourceFiles::from_settings(&settings().sources),
    };

    let entries = die!(sources.entries(), "Error building entries: {}");

    let db_name = db.display();
    eprintln!("Writing {} entries to {db_name}...", entries.len());
    let mut store = die!(KanjiStore::open(db), "Error opening {db_name}: {}");
    let stats = die!(store.import(&entries), "Error writing {db_name}: {}");

    let file_size = fs::metadata(db).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {db_name}: {} entries, {} component rows ({:.1} MB)",
        stats.entries,
        stats.components,
        file_size as f64 / 1_048_576.0
    );
}

pub fn info(db: &Path) {
    let db_name = db.display();
    let store = die!(
        KanjiStore::open_read_only(db),
        "Error opening {db_name}: {}"
    );
    let info = die!(store.info(), "Error reading {db_name}: {}");
    println!("Store: {db_name}");
    println!("  entries:    {}", info.entries);
    println!("  components: {}", info.components);
    for (category, count) in &info.by_category {
        println!("  {category}: {count}");
    }
}
