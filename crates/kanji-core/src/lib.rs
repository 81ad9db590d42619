pub mod decompose;
pub mod entry;
mod error;
pub mod radical;
pub mod settings;
pub mod store;
pub mod unicode;

#[cfg(test)]
mod testutil;

pub use decompose::{resolve, DecompositionMap, DecompositionResolver};
pub use entry::{Category, Entry, EntryBuilder, KanjidicRecord, Level};
pub use error::IntegrityError;
pub use store::{KanjiStore, StoreError};
