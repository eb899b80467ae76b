use std::path::PathBuf;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use tracing::{info, warn};

use crate::output::WindowRegistry;
use crate::terminal::Surface;

use super::render::draw_display;
use super::state::DisplaySession;

/// Where the Display gets its location from.
enum LocationSource {
    /// A location given once on the command line.
    Fixed,
    /// A named output window; every new generation is a navigation.
    Window {
        registry: WindowRegistry,
        name: String,
        generation: u64,
    },
}

/// The presentation surface. It never changes state in place: each new
/// location throws the current session away and starts a fresh load.
pub struct DisplayApp {
    session: DisplaySession,
    source: LocationSource,
    content_path: PathBuf,
    loads: usize,
}

impl DisplayApp {
    pub fn with_location(location: &str, content_path: PathBuf) -> Self {
        Self {
            session: DisplaySession::start(location, &content_path),
            source: LocationSource::Fixed,
            content_path,
            loads: 1,
        }
    }

    /// Bind to a named output window. Until the window has a location the
    /// Display sits on its loading screen.
    pub fn for_window(registry: WindowRegistry, name: &str, content_path: PathBuf) -> Self {
        let mut app = Self {
            session: DisplaySession::start("", &content_path),
            source: LocationSource::Window {
                registry,
                name: name.to_string(),
                generation: 0,
            },
            content_path,
            loads: 1,
        };
        app.follow_window();
        app
    }

    pub fn session(&self) -> &DisplaySession {
        &self.session
    }

    /// Number of page loads so far, counting the initial one.
    pub fn load_count(&self) -> usize {
        self.loads
    }

    /// Reload if the window was navigated since the last check, and keep the
    /// heartbeat fresh so the Dock sees the window as open.
    fn follow_window(&mut self) {
        let LocationSource::Window {
            registry,
            name,
            generation,
        } = &mut self.source
        else {
            return;
        };

        if let Err(err) = registry.touch_heartbeat(name) {
            warn!(window = %name, error = %err, "failed to refresh heartbeat");
        }

        match registry.read_location(name) {
            Ok(Some(location)) if location.generation != *generation => {
                info!(window = %name, generation = location.generation, "display reloading");
                *generation = location.generation;
                self.session = DisplaySession::start(&location.url, &self.content_path);
                self.loads += 1;
            }
            Ok(_) => {}
            Err(err) => warn!(window = %name, error = %err, "failed to read window location"),
        }
    }

    /// Mark a window-bound Display as closed.
    pub fn close(&self) {
        if let LocationSource::Window { registry, name, .. } = &self.source {
            if let Err(err) = registry.clear_heartbeat(name) {
                warn!(window = %name, error = %err, "failed to clear heartbeat");
            }
        }
    }
}

impl Surface for DisplayApp {
    fn draw(&self, frame: &mut Frame) {
        draw_display(frame, &self.session.request().options, self.session.state());
    }

    fn tick(&mut self) -> Result<()> {
        self.follow_window();
        self.session.poll();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c'));
        Ok(ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc))
    }
}
