/// command-palette library
///
/// Search engine behind a command palette: one ranked, grouped list built
/// from a command registry and note/notebook/tag/reminder lookups.

pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod navigation;
pub mod store;

// Re-exports for convenience
pub use db::Database;
pub use error::{PaletteError, Result};
