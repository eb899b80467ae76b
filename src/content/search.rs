use crate::models::Song;

/// Case-insensitive substring match against the hymn number, the joined
/// primary lines, or the joined secondary lines. `term` must already be
/// lowercase.
pub fn matches_query(song: &Song, term: &str) -> bool {
    song.number.text().to_lowercase().contains(term)
        || song.primary_text.join(" ").to_lowercase().contains(term)
        || song.secondary_text.join(" ").to_lowercase().contains(term)
}

/// Indices of the songs retained by `query`, in collection order. An empty
/// query keeps everything.
pub fn filter_songs(songs: &[Song], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..songs.len()).collect();
    }
    let term = query.to_lowercase();
    songs
        .iter()
        .enumerate()
        .filter(|(_, song)| matches_query(song, &term))
        .map(|(index, _)| index)
        .collect()
}
