use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::Song;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read hymn collection {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("hymn collection {path} is not valid JSON")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("hymn collection loader stopped before finishing")]
    Interrupted,
}

/// Read and parse the whole collection, preserving file order.
pub fn load_songs(path: &Path) -> Result<Vec<Song>, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let songs: Vec<Song> = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), count = songs.len(), "loaded hymn collection");
    Ok(songs)
}

/// Locate the hymn whose number matches. The first match wins if the file
/// carries duplicates.
pub fn find_song(songs: &[Song], number: i64) -> Option<&Song> {
    songs
        .iter()
        .find(|song| song.number.value() == Some(number))
}

/// A one-shot collection fetch running on a worker thread. It cannot be
/// cancelled; dropping the handle just discards the result.
pub struct PendingLoad {
    rx: Receiver<Result<Vec<Song>, LoadError>>,
}

impl PendingLoad {
    /// Non-blocking check for the result. Returns `None` while the fetch is
    /// still in flight.
    pub fn poll(&self) -> Option<Result<Vec<Song>, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::Interrupted)),
        }
    }
}

pub fn spawn_load(path: PathBuf) -> PendingLoad {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = load_songs(&path);
        if let Err(err) = &result {
            error!(error = %err, "hymn collection load failed");
        }
        // The receiver is gone if the surface reloaded meanwhile.
        if tx.send(result).is_err() {
            debug!(path = %path.display(), "hymn collection load discarded");
        }
    });
    PendingLoad { rx }
}
