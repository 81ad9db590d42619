use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Install a custom settings file. Must run before anything reads settings.
pub fn load_config(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        kanji_core::settings::init_custom(content),
        "Error in {file}: {}"
    );
}

pub fn settings_export() {
    print!("{}", kanji_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        kanji_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: store.path={}, sources.kanjidic={}, search.max_results={}",
        s.store.path.display(),
        s.sources.kanjidic.display(),
        s.search.max_results
    );
}
