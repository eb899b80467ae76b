use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::content::{find_song, spawn_load, PendingLoad};
use crate::models::{Slide, Song};
use crate::protocol::DisplayRequest;

/// What the Display shows for one load. Every state is final for that load;
/// only a reload with a new location produces a different one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayState {
    /// The collection fetch is in flight, or no hymn number was requested
    /// (which never resolves).
    Loading,
    /// The fetch resolved but no hymn carries the requested number.
    NotFound { number: i64 },
    /// The hymn exists but is marked reserved; its text is withheld.
    Reserved { number: i64 },
    Ready {
        number: i64,
        slide: Slide,
    },
}

impl DisplayState {
    /// Pure resolution of a request against a loaded collection.
    pub fn resolve(request: &DisplayRequest, songs: &[Song]) -> Self {
        let Some(number) = request.number else {
            return DisplayState::Loading;
        };
        match find_song(songs, number) {
            None => DisplayState::NotFound { number },
            Some(song) if song.is_reserved() => DisplayState::Reserved { number },
            Some(song) => DisplayState::Ready {
                number,
                slide: song.slide(request.slide),
            },
        }
    }
}

/// One Display page load: the parsed request plus the collection fetch it
/// started. Reloading means building a new session.
pub struct DisplaySession {
    location: String,
    request: DisplayRequest,
    state: DisplayState,
    pending: Option<PendingLoad>,
}

impl DisplaySession {
    /// Parse `location` and start fetching the collection. Without a hymn
    /// number nothing is fetched and the session stays in `Loading`.
    pub fn start(location: &str, content_path: &Path) -> Self {
        let request = DisplayRequest::from_url(location);
        info!(location, number = ?request.number, slide = request.slide, "display load");
        let pending = request
            .number
            .map(|_| spawn_load(PathBuf::from(content_path)));
        Self {
            location: location.to_string(),
            request,
            state: DisplayState::Loading,
            pending,
        }
    }

    /// Resolve against an already loaded collection.
    pub fn with_songs(location: &str, songs: &[Song]) -> Self {
        let request = DisplayRequest::from_url(location);
        let state = DisplayState::resolve(&request, songs);
        Self {
            location: location.to_string(),
            request,
            state,
            pending: None,
        }
    }

    /// Check the fetch and resolve once it lands. A failed fetch leaves the
    /// session loading.
    pub fn poll(&mut self) {
        let Some(result) = self.pending.as_ref().and_then(PendingLoad::poll) else {
            return;
        };
        self.pending = None;
        match result {
            Ok(songs) => self.state = DisplayState::resolve(&self.request, &songs),
            Err(err) => error!(error = %err, location = %self.location, "display stays loading"),
        }
    }

    pub fn request(&self) -> &DisplayRequest {
        &self.request
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }
}
