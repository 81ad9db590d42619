use std::path::PathBuf;

use clap::{Parser, Subcommand};

use kanji_cli::commands::{config_ops, import_ops, search_ops};
use kanji_cli::trace_init;
use kanji_core::settings::settings;

#[derive(Parser)]
#[command(name = "kanjitool", about = "Kanji dictionary build and query tool")]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    config: Option<String>,
    /// Database file (default: store.path from settings)
    #[arg(long, global = true)]
    db: Option<String>,
    /// Log as JSON lines instead of plain text
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download KANJIDIC2, KanjiVG and the KRADFILEs
    Fetch {
        /// Output directory
        #[arg(default_value = "data")]
        output_dir: String,
    },
    /// Build the dictionary and replace the database contents
    Import {
        /// Directory laid out by `fetch` (default: source paths from settings)
        #[arg(long)]
        sources: Option<String>,
    },
    /// Search by ideographs, SKIP code (+skip 1-3-8) or regex over readings and meanings
    Search {
        /// Query
        query: String,
        /// Maximum number of results (0 = unlimited)
        #[arg(short, long)]
        n: Option<usize>,
        /// Print entries as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// List characters that contain a component
    Containing {
        /// Component character
        component: String,
        /// Maximum number of results (0 = unlimited)
        #[arg(short, long)]
        n: Option<usize>,
        /// Print entries as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// List characters with a frequency rank, most frequent first
    ByFreq,
    /// List the characters of one level (常用1 … 常用6, 常用, 人名, 人名(常用))
    ByLevel {
        /// Level name
        level: String,
    },
    /// Show the 214 classical radicals by stroke count
    Radicals,
    /// Show database row counts
    Info,
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    trace_init::init_tracing(cli.log_json);

    if let Some(file) = &cli.config {
        config_ops::load_config(file);
    }
    let db = cli
        .db
        .map(PathBuf::from)
        .unwrap_or_else(|| settings().store.path.clone());

    match cli.command {
        Command::Fetch { output_dir } => import_ops::fetch(&output_dir),
        Command::Import { sources } => import_ops::import(sources.as_deref(), &db),
        Command::Search { query, n, json } => search_ops::search(&db, &query, n, json),
        Command::Containing { component, n, json } => {
            search_ops::containing(&db, &component, n, json)
        }
        Command::ByFreq => search_ops::by_freq(&db),
        Command::ByLevel { level } => search_ops::by_level(&db, &level),
        Command::Radicals => search_ops::radicals(),
        Command::Info => import_ops::info(&db),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
