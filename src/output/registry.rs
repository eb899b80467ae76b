use std::fs;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// Extension of the file holding a window's current location.
const LOCATION_EXT: &str = "location";
/// Extension of the file a running Display touches on every tick.
const HEARTBEAT_EXT: &str = "alive";
/// Heartbeat contents written by the Dock when it launches a window.
const LAUNCHING_MARK: &str = "launching";

/// A window's current location. `generation` increases on every navigation so
/// re-sending the same URL still counts as a new load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub generation: u64,
    pub url: String,
}

/// What a window's heartbeat file says about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heartbeat {
    /// No heartbeat: never opened, or its Display exited.
    Missing,
    /// Launched by the Dock; no Display has beaten yet.
    Launching { age: Duration },
    /// Last touched by a running Display.
    Beating { age: Duration },
}

/// File-backed registry of named output windows shared by the Dock (writer)
/// and each Display process (reader).
#[derive(Debug, Clone)]
pub struct WindowRegistry {
    dir: PathBuf,
}

impl WindowRegistry {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn location_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{LOCATION_EXT}", file_stem(name)))
    }

    pub fn heartbeat_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{HEARTBEAT_EXT}", file_stem(name)))
    }

    /// Replace the window's location, bumping its generation. The new file is
    /// written beside the old one and renamed over it so a reader never sees
    /// a partial write.
    pub fn write_location(&self, name: &str, url: &str) -> io::Result<Location> {
        fs::create_dir_all(&self.dir)?;
        let generation = self
            .read_location(name)?
            .map(|current| current.generation + 1)
            .unwrap_or(1);

        let path = self.location_path(name);
        let staging = path.with_extension(format!("{LOCATION_EXT}.tmp"));
        fs::write(&staging, format!("{generation}\n{url}"))?;
        fs::rename(&staging, &path)?;

        Ok(Location {
            generation,
            url: url.to_string(),
        })
    }

    pub fn read_location(&self, name: &str) -> io::Result<Option<Location>> {
        let raw = match fs::read_to_string(self.location_path(name)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };
        let (generation, url) = raw.split_once('\n').unwrap_or(("0", raw.as_str()));
        Ok(Some(Location {
            generation: generation.trim().parse().unwrap_or(0),
            url: url.trim().to_string(),
        }))
    }

    pub fn touch_heartbeat(&self, name: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let stamp = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        fs::write(self.heartbeat_path(name), stamp.to_string())
    }

    /// Remove the heartbeat so the window reads as closed immediately.
    pub fn clear_heartbeat(&self, name: &str) -> io::Result<()> {
        match fs::remove_file(self.heartbeat_path(name)) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }

    /// Stamp the heartbeat on behalf of a Display that is still starting.
    /// The Display's first touch replaces the stamp.
    pub fn mark_launching(&self, name: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.heartbeat_path(name), LAUNCHING_MARK)
    }

    pub fn heartbeat(&self, name: &str) -> Heartbeat {
        let path = self.heartbeat_path(name);
        let Ok(modified) = fs::metadata(&path).and_then(|meta| meta.modified()) else {
            return Heartbeat::Missing;
        };
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or_default();
        match fs::read_to_string(&path) {
            Ok(raw) if raw.trim() == LAUNCHING_MARK => Heartbeat::Launching { age },
            Ok(_) => Heartbeat::Beating { age },
            Err(_) => Heartbeat::Missing,
        }
    }

    /// A window is alive while its heartbeat is younger than `timeout`.
    pub fn is_alive(&self, name: &str, timeout: Duration) -> bool {
        match self.heartbeat(name) {
            Heartbeat::Launching { age } | Heartbeat::Beating { age } => age <= timeout,
            Heartbeat::Missing => false,
        }
    }
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
