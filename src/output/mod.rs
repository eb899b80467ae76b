//! The Dock's only way of reaching the Display: a named output window that is
//! reused while it stays open and recreated once it is closed. Delivery is
//! fire-and-forget; failures are logged and never reported back.

mod registry;
mod window;

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::protocol::DisplayRequest;

pub use registry::{Heartbeat, Location, WindowRegistry};
pub use window::{TerminalWindow, TerminalWindowHost, HEARTBEAT_TIMEOUT};

/// Capability handed to the Dock for pushing state to the Display.
pub trait OutputChannel {
    fn send(&mut self, request: &DisplayRequest);
}

/// Host-side table of named windows, the equivalent of a browser's
/// window-name registry.
pub trait WindowHost {
    type Window;

    /// Return the window registered under `name` if it is still open.
    fn find(&mut self, name: &str) -> Option<Self::Window>;

    /// Create a window under `name` showing `url`.
    fn open(&mut self, name: &str, url: &str) -> Result<Self::Window, WindowError>;

    /// Point an open window at `url`, forcing it to reload.
    fn navigate(&mut self, window: &Self::Window, url: &str) -> Result<(), WindowError>;
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("no launcher configured for output windows")]
    NoLauncher,
    #[error("failed to launch output window with `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to update window location {path}")]
    Location {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single reusable output window addressed by a fixed name.
pub struct NamedWindow<H: WindowHost> {
    host: H,
    name: String,
    display_path: String,
}

impl<H: WindowHost> NamedWindow<H> {
    pub fn new(host: H, name: impl Into<String>, display_path: impl Into<String>) -> Self {
        Self {
            host,
            name: name.into(),
            display_path: display_path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: WindowHost> OutputChannel for NamedWindow<H> {
    fn send(&mut self, request: &DisplayRequest) {
        let url = request.to_url(&self.display_path);
        let result = match self.host.find(&self.name) {
            Some(window) => {
                debug!(window = %self.name, %url, "navigating output window");
                self.host.navigate(&window, &url)
            }
            None => {
                debug!(window = %self.name, %url, "opening output window");
                self.host.open(&self.name, &url).map(|_| ())
            }
        };

        if let Err(err) = result {
            warn!(window = %self.name, error = %err, "output window unavailable");
        }
    }
}
