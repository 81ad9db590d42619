use std::sync::OnceLock;

use regex::Regex;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use serde::Serialize;
use tracing::{debug, debug_span};

use super::{entry_from_row, schema, KanjiStore, StoreError};
use crate::entry::{Category, Entry, Level};
use crate::unicode::is_ideo;

/// How a search query is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchMode {
    /// Distinct ideographs of the query, in first-occurrence order.
    Ideographs(Vec<char>),
    /// A SKIP code such as `1-3-8`, from `+skip 1-3-8` or `+s1-3-8`.
    Skip(String),
    /// A regular expression over readings and meanings.
    Pattern(String),
}

fn skip_query() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\+s(?:kip)?\s*([\d-]+)$").expect("SKIP query pattern must compile")
    })
}

impl SearchMode {
    pub fn parse(query: &str) -> Self {
        let mut ideographs: Vec<char> = Vec::new();
        for c in query.chars().filter(|&c| is_ideo(c)) {
            if !ideographs.contains(&c) {
                ideographs.push(c);
            }
        }
        if !ideographs.is_empty() {
            return SearchMode::Ideographs(ideographs);
        }
        if let Some(caps) = skip_query().captures(query) {
            return SearchMode::Skip(caps[1].to_string());
        }
        SearchMode::Pattern(query.to_string())
    }
}

/// Row counts of a populated store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreInfo {
    pub entries: u64,
    pub components: u64,
    pub by_category: Vec<(Category, u64)>,
}

/// `SELECT` over `entry` with an optional filter. Filters are fixed SQL with
/// positional placeholders; only `params` carry caller data.
struct EntrySelect {
    filter: Option<&'static str>,
    params: Vec<Value>,
    limit: Option<usize>,
}

impl EntrySelect {
    fn new() -> Self {
        Self {
            filter: None,
            params: Vec::new(),
            limit: None,
        }
    }

    fn filter(mut self, clause: &'static str, params: impl IntoIterator<Item = Value>) -> Self {
        self.filter = Some(clause);
        self.params.extend(params);
        self
    }

    /// `None` and `Some(0)` both mean no limit.
    fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.filter(|&n| n > 0);
        self
    }

    fn sql(&self) -> String {
        let mut sql = format!("SELECT {} FROM entry", schema::ENTRY_COLUMNS);
        if let Some(filter) = self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }
        sql.push(' ');
        sql.push_str(&schema::default_order());
        if let Some(limit) = self.limit {
            // SQLite reads a negative limit as unbounded.
            let limit = i64::try_from(limit).unwrap_or(-1);
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        sql
    }

    fn run(&self, conn: &Connection) -> rusqlite::Result<Vec<Entry>> {
        let mut stmt = conn.prepare(&self.sql())?;
        let rows = stmt.query_map(params_from_iter(self.params.iter()), entry_from_row)?;
        rows.collect()
    }
}

impl KanjiStore {
    /// Look up one entry by character.
    pub fn get(&self, c: char) -> Result<Option<Entry>, StoreError> {
        let sql = format!("SELECT {} FROM entry WHERE code = ?1", schema::ENTRY_COLUMNS);
        let entry = self
            .conn
            .prepare_cached(&sql)?
            .query_row(params![c as u32], entry_from_row)
            .optional()?;
        Ok(entry)
    }

    /// Search the dictionary. See [`SearchMode`] for how `query` is read.
    ///
    /// An ideograph query keeps query order and skips characters that are
    /// not in the store. SKIP and pattern queries use the default order.
    /// A `max_results` of zero means no limit.
    pub fn search(
        &self,
        query: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<Entry>, StoreError> {
        let mode = SearchMode::parse(query);
        let _span = debug_span!("search", ?mode).entered();
        let entries = match mode {
            SearchMode::Ideographs(chars) => {
                let limit = max_results.filter(|&n| n > 0).unwrap_or(usize::MAX);
                let mut entries = Vec::new();
                for c in chars {
                    if entries.len() >= limit {
                        break;
                    }
                    if let Some(entry) = self.get(c)? {
                        entries.push(entry);
                    }
                }
                entries
            }
            SearchMode::Skip(code) => EntrySelect::new()
                .filter("skip = ?1", [Value::Text(code)])
                .limit(max_results)
                .run(&self.conn)?,
            SearchMode::Pattern(pattern) => {
                // Reject a bad pattern here rather than inside SQLite.
                Regex::new(&pattern)?;
                EntrySelect::new()
                    .filter(schema::TEXT_MATCH, [Value::Text(pattern)])
                    .limit(max_results)
                    .run(&self.conn)?
            }
        };
        debug!(results = entries.len(), "search done");
        Ok(entries)
    }

    /// Entries whose components include `component`, in default order.
    pub fn containing(
        &self,
        component: char,
        max_results: Option<usize>,
    ) -> Result<Vec<Entry>, StoreError> {
        let entries = EntrySelect::new()
            .filter(
                "code IN (SELECT entry_code FROM comp WHERE component_code = ?1)",
                [Value::Integer(i64::from(u32::from(component)))],
            )
            .limit(max_results)
            .run(&self.conn)?;
        debug!(%component, results = entries.len(), "containment lookup");
        Ok(entries)
    }

    /// `(char, freq)` for every entry with a frequency rank, most frequent
    /// first.
    pub fn by_freq(&self) -> Result<Vec<(char, u32)>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT code, freq FROM entry WHERE freq IS NOT NULL ORDER BY freq ASC")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, u32>(1)?)))?;
        let mut out = Vec::new();
        for row in rows {
            let (code, freq) = row?;
            out.extend(char::from_u32(code).map(|c| (c, freq)));
        }
        Ok(out)
    }

    /// Characters of one level, by codepoint.
    pub fn by_level(&self, level: Level) -> Result<Vec<char>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT code FROM entry WHERE level = ?1 ORDER BY code ASC")?;
        let rows = stmt.query_map(params![level], |row| row.get::<_, u32>(0))?;
        let mut out = Vec::new();
        for code in rows {
            out.extend(char::from_u32(code?));
        }
        Ok(out)
    }

    pub fn info(&self) -> Result<StoreInfo, StoreError> {
        let entries = self
            .conn
            .query_row("SELECT COUNT(*) FROM entry", [], |row| row.get(0))?;
        let components = self
            .conn
            .query_row("SELECT COUNT(*) FROM comp", [], |row| row.get(0))?;
        let mut stmt = self
            .conn
            .prepare("SELECT cat, COUNT(*) FROM entry GROUP BY cat ORDER BY cat")?;
        let by_category = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<_>>()?;
        Ok(StoreInfo {
            entries,
            components,
            by_category,
        })
    }
}
