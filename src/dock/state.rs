use crate::content::filter_songs;
use crate::models::Song;
use crate::options::PresentationOptions;
use crate::protocol::DisplayRequest;

/// Everything the Dock tracks between keystrokes: the loaded collection, the
/// live filter, the selection within the filtered list, the slide offset
/// within the selected hymn, and the presentation options.
#[derive(Debug, Clone, Default)]
pub struct DockState {
    songs: Vec<Song>,
    query: String,
    filtered: Vec<usize>,
    selected_index: usize,
    current_slide: usize,
    pub options: PresentationOptions,
}

impl DockState {
    pub fn new(options: PresentationOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace the collection. Like a query change, this re-filters and
    /// resets the selection.
    pub fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.refilter();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the filter text. Selection and slide reset only when the text
    /// actually changes.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        self.refilter();
    }

    pub fn push_query_char(&mut self, ch: char) {
        let mut query = self.query.clone();
        query.push(ch);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = self.query.clone();
        if query.pop().is_some() {
            self.set_query(query);
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_songs(&self.songs, &self.query);
        self.selected_index = 0;
        self.current_slide = 0;
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered(&self) -> impl Iterator<Item = &Song> + '_ {
        self.filtered.iter().map(|index| &self.songs[*index])
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn selected_song(&self) -> Option<&Song> {
        self.filtered
            .get(self.selected_index)
            .map(|index| &self.songs[*index])
    }

    /// Move the selection by `offset`, clamped to the filtered list, and go
    /// back to the first slide.
    pub fn move_selection(&mut self, offset: isize) {
        let last = self.filtered.len().saturating_sub(1) as isize;
        let next = (self.selected_index as isize + offset).clamp(0, last.max(0));
        self.selected_index = next as usize;
        self.current_slide = 0;
    }

    /// Select a row directly (e.g. a click on the list).
    pub fn select(&mut self, index: usize) {
        if index < self.filtered.len() {
            self.selected_index = index;
            self.current_slide = 0;
        }
    }

    /// Advance one slide. There is no upper bound: past the end the Display
    /// shows empty text. Returns the dispatch to send, if a hymn is selected.
    pub fn next_slide(&mut self) -> Option<DisplayRequest> {
        self.current_slide += 1;
        self.current_request()
    }

    /// Go back one slide, stopping at 0.
    pub fn previous_slide(&mut self) -> Option<DisplayRequest> {
        self.current_slide = self.current_slide.saturating_sub(1);
        self.current_request()
    }

    /// Dispatch for the current selection at the current slide.
    pub fn current_request(&self) -> Option<DisplayRequest> {
        self.selected_song()
            .map(|song| DisplayRequest::for_song(song, self.current_slide, &self.options))
    }
}
