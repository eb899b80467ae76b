//! Static content source: one JSON file holding every hymn, read once per
//! surface load, plus the Dock's live filter over it.

mod loader;
mod search;

pub use loader::{find_song, load_songs, spawn_load, LoadError, PendingLoad};
pub use search::{filter_songs, matches_query};
