//! Static HTML rendering of a Display load, for pointing an OBS browser
//! source at a file instead of capturing a terminal window.

use crate::options::{Align, OptionValue, PresentationOptions, Theme, ViewMode};

use super::state::DisplayState;

fn theme_css(theme: Theme) -> &'static str {
    match theme {
        Theme::Celestial => {
            "background: linear-gradient(to bottom, #ffffff, #bfdbfe, #fef9c3); color: #1e3a8a;"
        }
        Theme::Dark | Theme::Projector => "background: #000000; color: #ffffff;",
        Theme::Light => "background: #ffffff; color: #000000;",
    }
}

pub fn render_html(options: &PresentationOptions, state: &DisplayState) -> String {
    let body = match state {
        DisplayState::Loading => r#"<div class="message">Loading hymn...</div>"#.to_string(),
        DisplayState::NotFound { number } => {
            format!(r#"<div class="message">Hymn {number} not found</div>"#)
        }
        DisplayState::Reserved { number } => {
            format!(r#"<div class="message reserved">Hymn {number} is reserved</div>"#)
        }
        DisplayState::Ready { number, slide } => {
            let primary = escape_html(&slide.primary);
            let secondary = escape_html(&slide.secondary);
            let text = match options.view {
                ViewMode::Both => format!(
                    r#"<div class="text both"><div>{primary}</div><div>{secondary}</div></div>"#
                ),
                ViewMode::Primary => format!(r#"<div class="text">{primary}</div>"#),
                ViewMode::Secondary => format!(r#"<div class="text">{secondary}</div>"#),
            };
            format!(r#"<h1 class="title">Hymn {number}</h1>{text}"#)
        }
    };

    let background = if options.bg_image.is_empty() {
        String::new()
    } else {
        format!(
            r#" background-image: url("{}"); background-size: cover; background-position: center;"#,
            escape_css_string(&options.bg_image)
        )
    };
    let text_align = match options.align {
        Align::Center => "center",
        Align::Left => "left",
        Align::Justify => "justify",
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Celestial Hymns Display</title>
<style>
body {{ margin: 0; height: 100vh; display: flex; flex-direction: column; justify-content: center; align-items: center; padding: 2rem; box-sizing: border-box; font-family: sans-serif; {theme}{background} }}
.title {{ font-size: 1.875rem; font-weight: bold; margin-bottom: 1rem; background: rgba(0, 0, 0, 0.4); padding: 0.5rem 1rem; border-radius: 0.25rem; }}
.text {{ width: 100%; text-align: {text_align}; font-size: {font_size}; padding: 0.5rem 1rem; box-sizing: border-box; }}
.text.both {{ display: grid; grid-template-columns: 1fr 1fr; gap: 2rem; }}
.message {{ padding: 2rem; text-align: center; }}
.message.reserved {{ font-size: 1.25rem; }}
</style>
</head>
<body data-theme="{theme_name}" data-view="{view_name}">
{body}
</body>
</html>
"#,
        theme = theme_css(options.theme),
        font_size = options.font_size.css_size(),
        theme_name = options.theme.as_str(),
        view_name = options.view.as_str(),
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape for a double-quoted CSS string inside an HTML `<style>` block.
fn escape_css_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '"' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            '<' => escaped.push_str("\\3c "),
            '\n' | '\r' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slide;
    use crate::options::FontSize;

    fn ready() -> DisplayState {
        DisplayState::Ready {
            number: 3,
            slide: Slide {
                primary: "Ore <ofe>".into(),
                secondary: "Grace & peace".into(),
            },
        }
    }

    #[test]
    fn both_view_renders_two_columns() {
        let html = render_html(&PresentationOptions::default(), &ready());
        assert!(html.contains(r#"<h1 class="title">Hymn 3</h1>"#));
        assert!(html.contains("<div>Ore &lt;ofe&gt;</div><div>Grace &amp; peace</div>"));
        assert!(html.contains("linear-gradient"));
        assert!(html.contains("font-size: 1.25rem"));
    }

    #[test]
    fn secondary_view_renders_one_column() {
        let options = PresentationOptions {
            view: ViewMode::Secondary,
            theme: Theme::Dark,
            align: Align::Justify,
            font_size: FontSize::ExtraLarge,
            ..PresentationOptions::default()
        };
        let html = render_html(&options, &ready());
        assert!(html.contains(r#"<div class="text">Grace &amp; peace</div>"#));
        assert!(!html.contains("Ore"));
        assert!(html.contains("text-align: justify"));
        assert!(html.contains("font-size: 3rem"));
        assert!(html.contains(r#"data-theme="dark""#));
    }

    #[test]
    fn background_image_is_escaped() {
        let options = PresentationOptions {
            bg_image: r#"https://x.test/a".png"#.into(),
            ..PresentationOptions::default()
        };
        let html = render_html(&options, &DisplayState::Loading);
        assert!(html.contains(r#"url("https://x.test/a\".png")"#));
        assert!(html.contains("background-size: cover"));
        assert!(html.contains("Loading hymn..."));
    }

    #[test]
    fn reserved_omits_text() {
        let html = render_html(&PresentationOptions::default(), &DisplayState::Reserved { number: 7 });
        assert!(html.contains("Hymn 7 is reserved"));
        assert!(!html.contains(r#"class="text"#));
    }
}
