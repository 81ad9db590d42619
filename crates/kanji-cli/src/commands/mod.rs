pub mod config_ops;
pub mod import_ops;
pub mod search_ops;
