//! The Dock → Display contract. A dispatch is nothing more than a URL: the
//! Dock encodes the full presentation state into query parameters and the
//! Display rebuilds the same state from them at load time.
//!
//! Parsing never fails. Every parameter falls back to its default, and the
//! integer parameters use a leading-integer scan so `12abc` still means 12.

use url::form_urlencoded;

use crate::models::Song;
use crate::options::{Align, FontSize, OptionValue, PresentationOptions, Theme, ViewMode};

pub const PARAM_NUMBER: &str = "number";
pub const PARAM_THEME: &str = "theme";
pub const PARAM_VIEW: &str = "view";
pub const PARAM_FONT_SIZE: &str = "fontSize";
pub const PARAM_ALIGN: &str = "align";
pub const PARAM_BG_IMAGE: &str = "bgImage";
pub const PARAM_SLIDE: &str = "slide";

/// Everything the Display needs for one load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRequest {
    /// Requested hymn. `None` keeps the Display on its loading screen.
    pub number: Option<i64>,
    pub slide: usize,
    pub options: PresentationOptions,
}

impl DisplayRequest {
    pub fn for_song(song: &Song, slide: usize, options: &PresentationOptions) -> Self {
        Self {
            number: song.number.value(),
            slide,
            options: options.clone(),
        }
    }

    /// Encode as a query string (without the leading `?`).
    pub fn to_query(&self) -> String {
        let number = self.number.map(|n| n.to_string()).unwrap_or_default();
        form_urlencoded::Serializer::new(String::new())
            .append_pair(PARAM_NUMBER, &number)
            .append_pair(PARAM_THEME, self.options.theme.as_str())
            .append_pair(PARAM_VIEW, self.options.view.as_str())
            .append_pair(PARAM_FONT_SIZE, self.options.font_size.as_str())
            .append_pair(PARAM_ALIGN, self.options.align.as_str())
            .append_pair(PARAM_BG_IMAGE, &self.options.bg_image)
            .append_pair(PARAM_SLIDE, &self.slide.to_string())
            .finish()
    }

    /// Full Display location, e.g. `/display?number=12&theme=dark&...`.
    pub fn to_url(&self, display_path: &str) -> String {
        format!("{display_path}?{}", self.to_query())
    }

    /// Rebuild a request from a Display location. Accepts a full URL, a
    /// path with a query, or a bare query string with or without `?`.
    pub fn from_url(location: &str) -> Self {
        let query = query_part(location);
        let mut params = QueryParams::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.insert(&key, value.into_owned());
        }

        Self {
            number: params
                .number
                .as_deref()
                .and_then(parse_leading_int)
                .filter(|n| *n != 0),
            slide: params
                .slide
                .as_deref()
                .and_then(parse_leading_int)
                .map(|n| match usize::try_from(n) {
                    Ok(slide) => slide,
                    Err(_) if n < 0 => 0,
                    Err(_) => usize::MAX,
                })
                .unwrap_or(0),
            options: PresentationOptions {
                theme: Theme::parse_or_default(params.theme.as_deref().unwrap_or_default()),
                view: ViewMode::parse_or_default(params.view.as_deref().unwrap_or_default()),
                font_size: FontSize::parse_or_default(
                    params.font_size.as_deref().unwrap_or_default(),
                ),
                align: Align::parse_or_default(params.align.as_deref().unwrap_or_default()),
                bg_image: params.bg_image.unwrap_or_default(),
            },
        }
    }
}

/// First occurrence of each known key wins, matching how a browser's
/// `URLSearchParams::get` behaves.
#[derive(Default)]
struct QueryParams {
    number: Option<String>,
    theme: Option<String>,
    view: Option<String>,
    font_size: Option<String>,
    align: Option<String>,
    bg_image: Option<String>,
    slide: Option<String>,
}

impl QueryParams {
    fn insert(&mut self, key: &str, value: String) {
        let slot = match key {
            PARAM_NUMBER => &mut self.number,
            PARAM_THEME => &mut self.theme,
            PARAM_VIEW => &mut self.view,
            PARAM_FONT_SIZE => &mut self.font_size,
            PARAM_ALIGN => &mut self.align,
            PARAM_BG_IMAGE => &mut self.bg_image,
            PARAM_SLIDE => &mut self.slide,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

fn query_part(location: &str) -> &str {
    let location = location.trim();
    let without_fragment = location.split('#').next().unwrap_or_default();
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    }
}

/// Scan an optional sign followed by leading ASCII digits, ignoring leading
/// whitespace and any trailing characters. Returns `None` when no digit is
/// found; values beyond the `i64` range saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = &rest[..digits_len];
    let value = if negative {
        format!("-{digits}").parse().unwrap_or(i64::MIN)
    } else {
        digits.parse().unwrap_or(i64::MAX)
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_round_trips_with_defaults() {
        let request = DisplayRequest {
            number: Some(12),
            slide: 2,
            options: PresentationOptions {
                theme: Theme::Dark,
                ..PresentationOptions::default()
            },
        };
        let url = request.to_url("/display");
        assert!(url.starts_with("/display?number=12&theme=dark&view=both"));

        let parsed = DisplayRequest::from_url(&url);
        assert_eq!(parsed.number, Some(12));
        assert_eq!(parsed.slide, 2);
        assert_eq!(parsed.options.theme, Theme::Dark);
        assert_eq!(parsed.options.view, ViewMode::Both);
        assert_eq!(parsed.options.font_size, FontSize::Medium);
        assert_eq!(parsed.options.align, Align::Center);
        assert_eq!(parsed.options.bg_image, "");
    }

    #[test]
    fn background_url_survives_encoding() {
        let request = DisplayRequest {
            number: Some(1),
            slide: 0,
            options: PresentationOptions {
                bg_image: "https://img.example/a b.png?x=1&y=2".into(),
                ..PresentationOptions::default()
            },
        };
        let parsed = DisplayRequest::from_url(&request.to_url("http://localhost/display"));
        assert_eq!(parsed.options.bg_image, "https://img.example/a b.png?x=1&y=2");
    }

    #[test]
    fn empty_location_is_all_defaults() {
        let parsed = DisplayRequest::from_url("/display");
        assert_eq!(parsed, DisplayRequest::default());
    }

    #[test]
    fn malformed_numbers_degrade() {
        let parsed = DisplayRequest::from_url("?number=abc&slide=oops");
        assert_eq!(parsed.number, None);
        assert_eq!(parsed.slide, 0);

        let parsed = DisplayRequest::from_url("number=0&slide=-3");
        assert_eq!(parsed.number, None);
        assert_eq!(parsed.slide, 0);

        let parsed = DisplayRequest::from_url("?number=12abc&slide=4.5");
        assert_eq!(parsed.number, Some(12));
        assert_eq!(parsed.slide, 4);
    }

    #[test]
    fn first_occurrence_wins() {
        let parsed = DisplayRequest::from_url("?theme=light&theme=dark&number=5&number=6");
        assert_eq!(parsed.options.theme, Theme::Light);
        assert_eq!(parsed.number, Some(5));
    }

    #[test]
    fn empty_values_use_defaults() {
        let parsed = DisplayRequest::from_url("?number=3&theme=&view=&fontSize=&align=");
        assert_eq!(parsed.options, PresentationOptions::default());
    }

    #[test]
    fn leading_int_scan() {
        assert_eq!(parse_leading_int("  42"), Some(42));
        assert_eq!(parse_leading_int("-7x"), Some(-7));
        assert_eq!(parse_leading_int("+3"), Some(3));
        assert_eq!(parse_leading_int("x7"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn oversized_slide_stays_past_the_end() {
        let parsed = DisplayRequest::from_url("?number=12&slide=99999999999999999999");
        assert_eq!(parsed.number, Some(12));
        assert!(parsed.slide >= i64::MAX as usize);

        let song = Song {
            number: 12.into(),
            primary_text: vec!["a".into()],
            secondary_text: vec!["b".into()],
            status: None,
        };
        assert!(song.slide(parsed.slide).is_empty());
    }
}
