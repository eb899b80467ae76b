//! Celestial Hymns presenter: an operator Dock that picks a hymn and slide,
//! and a Display that renders whatever its location says.
//!
//! The two surfaces share nothing at runtime. The Dock serializes its state
//! into a Display location and hands it to a single named output window;
//! the Display rebuilds everything from that location on every load.
pub mod cli;
pub mod config;
pub mod content;
pub mod display;
pub mod dock;
pub(crate) mod helpers;
pub mod logging;
pub mod models;
pub mod options;
pub mod output;
pub mod protocol;
pub mod terminal;

pub use content::{filter_songs, load_songs, LoadError};
pub use display::{DisplayApp, DisplayState};
pub use dock::{DockApp, DockState};
pub use models::{Slide, Song};
pub use options::PresentationOptions;
pub use output::{NamedWindow, OutputChannel, WindowHost};
pub use protocol::DisplayRequest;
