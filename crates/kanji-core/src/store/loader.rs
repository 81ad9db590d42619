use rusqlite::params;
use serde::Serialize;
use tracing::{debug, debug_span, info};

use super::{join_list, schema, KanjiStore, StoreError};
use crate::entry::Entry;

/// Row counts written by one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub entries: usize,
    pub components: usize,
}

impl KanjiStore {
    /// Replace the persisted dataset with `entries`.
    ///
    /// Both tables are dropped, recreated and filled inside one transaction.
    /// On any error the transaction is rolled back and the previous dataset
    /// stays in place.
    pub fn import<'e>(
        &mut self,
        entries: impl IntoIterator<Item = &'e Entry>,
    ) -> Result<ImportStats, StoreError> {
        let _span = debug_span!("import").entered();
        let tx = self.conn.transaction()?;
        tx.execute_batch(schema::CREATE_SQL)?;
        debug!("schema recreated");

        let mut stats = ImportStats::default();
        {
            let mut insert_entry = tx.prepare(schema::INSERT_ENTRY)?;
            let mut insert_comp = tx.prepare(schema::INSERT_COMP)?;
            for e in entries {
                let code = e.code();
                insert_entry.execute(params![
                    code,
                    e.char.to_string(),
                    e.category,
                    e.level,
                    e.strokes,
                    e.freq,
                    e.jlpt,
                    e.skip,
                    e.rad,
                    e.comp,
                    join_list(&e.on),
                    join_list(&e.kun),
                    join_list(&e.nanori),
                    join_list(&e.meaning),
                ])?;
                for component in e.comp.chars() {
                    insert_comp.execute(params![code, component as u32])?;
                    stats.components += 1;
                }
                stats.entries += 1;
            }
        }
        tx.commit()?;
        info!(
            entries = stats.entries,
            components = stats.components,
            "dataset imported"
        );
        Ok(stats)
    }
}
