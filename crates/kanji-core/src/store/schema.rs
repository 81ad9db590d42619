//! Table layout of the persisted dictionary. Column names and types are a
//! compatibility contract with other readers of the database.

/// Drops and recreates both relations. Run inside the import transaction so
/// readers never observe the empty tables. `comp` references `entry`, so it
/// goes first.
pub(super) const CREATE_SQL: &str = "
    DROP TABLE IF EXISTS comp;
    DROP TABLE IF EXISTS entry;

    CREATE TABLE entry(
        code INTEGER PRIMARY KEY ASC,
        char TEXT,
        cat TEXT,
        level TEXT,
        strokes INTEGER,
        freq INTEGER,
        jlpt INTEGER,
        skip TEXT,
        rad INTEGER,
        comp TEXT,
        on_ TEXT,
        kun TEXT,
        nanori TEXT,
        meaning TEXT
    );
    CREATE TABLE comp(
        entry_code INTEGER,
        component_code INTEGER,
        FOREIGN KEY(entry_code) REFERENCES entry(code)
    );

    CREATE INDEX idx_comp ON comp (component_code);
";

pub(super) const INSERT_ENTRY: &str = "
    INSERT INTO entry (code, char, cat, level, strokes, freq, jlpt, skip, rad, comp,
                       on_, kun, nanori, meaning)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
";

pub(super) const INSERT_COMP: &str =
    "INSERT INTO comp (entry_code, component_code) VALUES (?1, ?2)";

/// Column list matching [`super::entry_from_row`].
pub(super) const ENTRY_COLUMNS: &str =
    "code, char, cat, level, strokes, freq, jlpt, skip, rad, comp, on_, kun, nanori, meaning";

/// Frequency rank assumed for entries without one when ordering results.
pub const NO_FREQ: u32 = 9999;

/// Default result order: frequent first (unranked entries sort as
/// [`NO_FREQ`]), then by level rank, then codepoint. Uses the `level_rank`
/// SQL function registered on every connection.
pub(super) fn default_order() -> String {
    format!("ORDER BY IFNULL(freq, {NO_FREQ}) ASC, level_rank(level) ASC, code ASC")
}

/// Matches `?1` against every reading and meaning column, and against the
/// readings with their `.`/`-` markers removed.
pub(super) const TEXT_MATCH: &str = "
    on_ REGEXP ?1 OR
    kun REGEXP ?1 OR
    nanori REGEXP ?1 OR
    replace(replace(on_, '.', ''), '-', '') REGEXP ?1 OR
    replace(replace(kun, '.', ''), '-', '') REGEXP ?1 OR
    replace(replace(nanori, '.', ''), '-', '') REGEXP ?1 OR
    meaning REGEXP ?1
";
