use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::registry::{Heartbeat, WindowRegistry};
use super::{WindowError, WindowHost};

/// A Display that has not touched its heartbeat for this long is closed.
pub const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(2);
/// A launched window counts as open this long before its Display first
/// touches the heartbeat.
const SPAWN_GRACE: Duration = Duration::from_secs(5);

/// Output windows backed by Display processes running in their own terminal
/// windows. The launcher is a command prefix such as
/// `x-terminal-emulator -e`; the host appends
/// `<exe> [forwarded args] display --window <name>`.
pub struct TerminalWindowHost {
    registry: WindowRegistry,
    launcher: Vec<String>,
    exe: PathBuf,
    forwarded_args: Vec<String>,
    /// Launcher processes, kept so they can be reaped once they exit.
    spawned: HashMap<String, Child>,
}

/// Handle to an open Display window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalWindow {
    pub name: String,
}

impl TerminalWindowHost {
    pub fn new(registry: WindowRegistry, launcher: Vec<String>, exe: PathBuf) -> Self {
        Self {
            registry,
            launcher,
            exe,
            forwarded_args: Vec::new(),
            spawned: HashMap::new(),
        }
    }

    /// Arguments passed to every spawned Display ahead of the subcommand,
    /// typically `--config`/`--content` so both surfaces read the same files.
    pub fn with_forwarded_args(mut self, args: Vec<String>) -> Self {
        self.forwarded_args = args;
        self
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    fn reap_launchers(&mut self) {
        self.spawned.retain(|name, child| match child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                debug!(window = %name, %status, "launcher exited");
                false
            }
            Err(err) => {
                warn!(window = %name, error = %err, "failed to check launcher");
                false
            }
        });
    }

    fn command_for(&self, name: &str) -> Result<Command, WindowError> {
        let (program, launcher_args) = self.launcher.split_first().ok_or(WindowError::NoLauncher)?;
        let mut command = Command::new(program);
        command
            .args(launcher_args)
            .arg(&self.exe)
            .args(&self.forwarded_args)
            .args(["display", "--window", name])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Ok(command)
    }
}

impl WindowHost for TerminalWindowHost {
    type Window = TerminalWindow;

    fn find(&mut self, name: &str) -> Option<TerminalWindow> {
        self.reap_launchers();

        let open = match self.registry.heartbeat(name) {
            Heartbeat::Beating { age } => age <= HEARTBEAT_TIMEOUT,
            Heartbeat::Launching { age } => age <= SPAWN_GRACE,
            Heartbeat::Missing => false,
        };
        open.then(|| TerminalWindow {
            name: name.to_string(),
        })
    }

    fn open(&mut self, name: &str, url: &str) -> Result<TerminalWindow, WindowError> {
        self.registry
            .write_location(name, url)
            .map_err(|source| WindowError::Location {
                path: self.registry.location_path(name),
                source,
            })?;

        let mut command = self.command_for(name)?;
        self.registry
            .mark_launching(name)
            .map_err(|source| WindowError::Location {
                path: self.registry.heartbeat_path(name),
                source,
            })?;
        let child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                if let Err(err) = self.registry.clear_heartbeat(name) {
                    warn!(window = name, error = %err, "failed to clear launch stamp");
                }
                return Err(WindowError::Spawn {
                    program: self.launcher.join(" "),
                    source,
                });
            }
        };
        info!(window = name, pid = child.id(), "launched output window");

        self.spawned.insert(name.to_string(), child);
        Ok(TerminalWindow {
            name: name.to_string(),
        })
    }

    fn navigate(&mut self, window: &TerminalWindow, url: &str) -> Result<(), WindowError> {
        self.registry
            .write_location(&window.name, url)
            .map(|_| ())
            .map_err(|source| WindowError::Location {
                path: self.registry.location_path(&window.name),
                source,
            })
    }
}
