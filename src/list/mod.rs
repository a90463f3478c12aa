pub mod client;
pub mod loader;
pub mod types;

pub use client::create_client;
pub use loader::{fetch_editors, fetch_list, ListOutcome};
pub use types::{Editor, Level, LevelDocument, LoadOutcome, Record};
