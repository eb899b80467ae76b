//! The Display: a presentation-only surface whose entire state is a function
//! of its location at load time. It pages one hymn into single-line slides
//! and renders the requested slide with the requested options.

mod app;
mod html;
mod render;
mod state;

use std::path::Path;

use anyhow::Result;
use tracing::error;

use crate::content::load_songs;
use crate::protocol::DisplayRequest;

pub use app::DisplayApp;
pub use html::render_html;
pub use render::draw_display;
pub use state::{DisplaySession, DisplayState};

/// Run a Display until it is closed.
pub fn run_display(app: &mut DisplayApp) -> Result<()> {
    let result = crate::terminal::run(app);
    app.close();
    result
}

/// Resolve one location synchronously and render it as an HTML page. A
/// collection that fails to load leaves the page on its loading message.
pub fn render_location_html(location: &str, content_path: &Path) -> String {
    let request = DisplayRequest::from_url(location);
    let state = match request.number {
        Some(_) => match load_songs(content_path) {
            Ok(songs) => DisplayState::resolve(&request, &songs),
            Err(err) => {
                error!(error = %err, location, "display stays loading");
                DisplayState::Loading
            }
        },
        None => DisplayState::Loading,
    };
    render_html(&request.options, &state)
}
