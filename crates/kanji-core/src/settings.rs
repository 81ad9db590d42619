//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub sources: SourceSettings,
    pub store: StoreSettings,
    pub search: SearchSettings,
}

/// Locations of the raw dictionary files.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// KANJIDIC2 XML, optionally gzipped.
    pub kanjidic: PathBuf,
    /// KanjiVG XML, optionally gzipped.
    pub kanjivg: PathBuf,
    /// KRADFILE as UTF-8.
    pub kradfile: PathBuf,
    /// KRADFILE2 as UTF-8.
    pub kradfile2: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub max_results: usize,
}

impl SearchSettings {
    /// `max_results` as a query limit; zero means unlimited.
    pub fn limit(&self) -> Option<usize> {
        (self.max_results > 0).then_some(self.max_results)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty_path {
        ($section:ident . $field:ident) => {
            if s.$section.$field.as_os_str().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty_path!(sources.kanjidic);
    check_non_empty_path!(sources.kanjivg);
    check_non_empty_path!(sources.kradfile);
    check_non_empty_path!(sources.kradfile2);
    check_non_empty_path!(store.path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUSTOM: &str = r#"
[sources]
kanjidic = "/srv/edrdg/kanjidic2.xml"
kanjivg = "/srv/kanjivg/kanjivg.xml"
kradfile = "/srv/edrdg/kradfile.utf8"
kradfile2 = "/srv/edrdg/kradfile2.utf8"

[store]
path = "/var/lib/kanji/kanji.db"

[search]
max_results = 0
"#;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.sources.kanjidic, PathBuf::from("data/kanjidic2.xml.gz"));
        assert_eq!(s.sources.kanjivg, PathBuf::from("data/kanjivg.xml.gz"));
        assert_eq!(s.sources.kradfile, PathBuf::from("data/kradfile.utf8"));
        assert_eq!(s.sources.kradfile2, PathBuf::from("data/kradfile2.utf8"));
        assert_eq!(s.store.path, PathBuf::from("kanji.db"));
        assert_eq!(s.search.max_results, 50);
        assert_eq!(s.search.limit(), Some(50));
    }

    #[test]
    fn parse_valid_custom_toml() {
        let s = parse_settings_toml(CUSTOM).unwrap();
        assert_eq!(s.store.path, PathBuf::from("/var/lib/kanji/kanji.db"));
        assert_eq!(s.search.limit(), None);
    }

    #[test]
    fn error_empty_path() {
        let toml = CUSTOM.replace("/var/lib/kanji/kanji.db", "");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("store.path"));
    }

    #[test]
    fn error_missing_section() {
        let toml = CUSTOM.replace("[search]\nmax_results = 0\n", "");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().contains("search"));
    }

    #[test]
    fn error_negative_limit() {
        let toml = CUSTOM.replace("max_results = 0", "max_results = -1");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(SettingsError::Parse(_))
        ));
    }
}
