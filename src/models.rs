//! Domain models shared by the Dock and the Display. Song records come straight
//! from the static content file and stay immutable once loaded; slides are
//! derived on demand and never stored.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;

/// Status value that suppresses a hymn's content on the Display.
pub const RESERVED_STATUS: &str = "reserved";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// One hymn from the content file. `primary_text` and `secondary_text` are
/// parallel line sequences (one entry per displayable line) and may differ in
/// length.
pub struct Song {
    /// Hymn number as written in the content file.
    #[serde(default)]
    pub number: HymnNumber,
    /// Lines in the primary language.
    #[serde(
        default,
        rename = "yoruba",
        alias = "primaryText",
        alias = "primary_text"
    )]
    pub primary_text: Vec<String>,
    /// Lines in the secondary language.
    #[serde(
        default,
        rename = "english",
        alias = "secondaryText",
        alias = "secondary_text"
    )]
    pub secondary_text: Vec<String>,
    /// Optional status flag; only `"reserved"` changes behavior.
    #[serde(default)]
    pub status: Option<String>,
}

impl Song {
    pub fn is_reserved(&self) -> bool {
        self.status.as_deref() == Some(RESERVED_STATUS)
    }

    /// Number of slides the hymn yields: the longer of the two line sequences.
    pub fn slide_count(&self) -> usize {
        self.primary_text.len().max(self.secondary_text.len())
    }

    /// Pair the lines at `index`. Past the end of either sequence the missing
    /// side is empty, and past the end of both the whole slide is empty.
    pub fn slide(&self, index: usize) -> Slide {
        Slide {
            primary: self.primary_text.get(index).cloned().unwrap_or_default(),
            secondary: self.secondary_text.get(index).cloned().unwrap_or_default(),
        }
    }

    /// Short preview line used by the Dock list.
    pub fn preview(&self) -> &str {
        self.secondary_text
            .first()
            .or_else(|| self.primary_text.first())
            .map(String::as_str)
            .unwrap_or("(Reserved)")
    }

    pub fn title(&self) -> String {
        format!("Hymn {}", self.number)
    }
}

/// One paired line, the atomic unit of display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slide {
    pub primary: String,
    pub secondary: String,
}

impl Slide {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// A hymn number as the content file spells it. The text is what the Dock
/// filters on; `value` is the numeric form used for lookup and is absent when
/// the text is not an integer, so such a hymn never matches a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HymnNumber {
    text: String,
    value: Option<i64>,
}

impl HymnNumber {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }
}

impl From<i64> for HymnNumber {
    fn from(value: i64) -> Self {
        Self {
            text: value.to_string(),
            value: Some(value),
        }
    }
}

impl From<String> for HymnNumber {
    fn from(text: String) -> Self {
        let value = text.trim().parse().ok();
        Self { text, value }
    }
}

impl fmt::Display for HymnNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Never fails: a malformed number only costs that one hymn its lookup.
impl<'de> Deserialize<'de> for HymnNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawNumber {
            Int(i64),
            Float(f64),
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match RawNumber::deserialize(deserializer)? {
            RawNumber::Int(value) => Self::from(value),
            RawNumber::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                Self::from(value as i64)
            }
            RawNumber::Float(value) => Self {
                text: value.to_string(),
                value: None,
            },
            RawNumber::Text(text) => Self::from(text),
            RawNumber::Other(_) => Self::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(primary: &[&str], secondary: &[&str]) -> Song {
        Song {
            number: 1.into(),
            primary_text: primary.iter().map(|s| s.to_string()).collect(),
            secondary_text: secondary.iter().map(|s| s.to_string()).collect(),
            status: None,
        }
    }

    #[test]
    fn slide_count_follows_longer_sequence() {
        let hymn = song(&["a", "b", "c"], &["1", "2", "3", "4", "5"]);
        assert_eq!(hymn.slide_count(), 5);

        let last = hymn.slide(4);
        assert_eq!(last.primary, "");
        assert_eq!(last.secondary, "5");
    }

    #[test]
    fn slide_past_the_end_is_empty() {
        let hymn = song(&["a"], &["1"]);
        assert!(hymn.slide(7).is_empty());
        assert_eq!(hymn.slide(0).primary, "a");
    }

    #[test]
    fn preview_prefers_secondary_then_primary() {
        assert_eq!(song(&["Oluwa"], &["Lord"]).preview(), "Lord");
        assert_eq!(song(&["Oluwa"], &[]).preview(), "Oluwa");
        assert_eq!(song(&[], &[]).preview(), "(Reserved)");
    }

    #[test]
    fn deserializes_content_file_fields() {
        let json = r#"[
            {"number": 12, "yoruba": ["Ba"], "english": ["Father"]},
            {"number": "7", "status": "reserved"},
            {"number": 3.0, "primaryText": ["x"], "secondaryText": ["y", "z"]}
        ]"#;
        let songs: Vec<Song> = serde_json::from_str(json).unwrap();

        assert_eq!(songs[0].number.value(), Some(12));
        assert_eq!(songs[0].primary_text, vec!["Ba"]);
        assert!(songs[1].is_reserved());
        assert_eq!(songs[1].number.value(), Some(7));
        assert!(songs[1].primary_text.is_empty());
        assert_eq!(songs[2].number.value(), Some(3));
        assert_eq!(songs[2].slide_count(), 2);
    }

    #[test]
    fn malformed_numbers_keep_their_text_without_a_value() {
        let json = r#"[
            {"number": "12a"},
            {"number": 1.5},
            {"number": null},
            {"english": ["no number"]},
            {"number": "003"}
        ]"#;
        let songs: Vec<Song> = serde_json::from_str(json).unwrap();

        assert_eq!(songs[0].number.text(), "12a");
        assert_eq!(songs[0].number.value(), None);
        assert_eq!(songs[1].number.text(), "1.5");
        assert_eq!(songs[1].number.value(), None);
        assert_eq!(songs[2].number.value(), None);
        assert_eq!(songs[3].number.value(), None);
        assert_eq!(songs[4].number.text(), "003");
        assert_eq!(songs[4].number.value(), Some(3));
        assert_eq!(songs[4].title(), "Hymn 003");
    }
}
