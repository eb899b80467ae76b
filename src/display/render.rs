use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph, Wrap};
use ratatui::Frame;

use crate::helpers::centered_rect;
use crate::options::{Align, FontSize, PresentationOptions, Theme, ViewMode};

use super::state::DisplayState;

/// Foreground/background pair for a theme.
pub(crate) fn palette(theme: Theme) -> (Color, Color) {
    match theme {
        Theme::Celestial => (Color::Rgb(30, 58, 138), Color::Rgb(191, 219, 254)),
        Theme::Dark | Theme::Projector => (Color::White, Color::Black),
        Theme::Light => (Color::Black, Color::White),
    }
}

fn alignment(align: Align) -> Alignment {
    match align {
        Align::Center => Alignment::Center,
        // Terminal paragraphs cannot justify; left is the closest fit.
        Align::Left | Align::Justify => Alignment::Left,
    }
}

/// Terminals have one font size, so scale is approximated with weight and
/// letter spacing.
pub(crate) fn scaled_text(text: &str, size: FontSize) -> (String, Style) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match size {
        FontSize::Small => (text.to_string(), Style::default()),
        FontSize::Medium => (text.to_string(), bold),
        FontSize::Large => (letter_spaced(text), bold),
        FontSize::ExtraLarge => (letter_spaced(&text.to_uppercase()), bold),
    }
}

fn letter_spaced(text: &str) -> String {
    text.chars()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `options.bg_image` is not drawn: a terminal cannot show an image, and the
/// URL itself must not appear on the broadcast output.
pub fn draw_display(frame: &mut Frame, options: &PresentationOptions, state: &DisplayState) {
    let area = frame.area();
    let (fg, bg) = palette(options.theme);
    let base = Style::default().fg(fg).bg(bg);
    frame.render_widget(Block::default().style(base), area);

    match state {
        DisplayState::Loading => draw_message(frame, area, base, "Loading hymn..."),
        DisplayState::NotFound { number } => {
            draw_message(frame, area, base, &format!("Hymn {number} not found"))
        }
        DisplayState::Reserved { number } => draw_message(
            frame,
            area,
            base.add_modifier(Modifier::BOLD),
            &format!("Hymn {number} is reserved"),
        ),
        DisplayState::Ready { number, slide, .. } => {
            let stage = centered_rect(90, 60, area);
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Length(1),
                    Constraint::Min(1),
                ])
                .split(stage);

            let title = Paragraph::new(Line::from(Span::styled(
                format!(" Hymn {number} "),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center);
            frame.render_widget(title, rows[0]);

            let body = rows[2];
            match options.view {
                ViewMode::Both => {
                    let columns = Layout::default()
                        .direction(Direction::Horizontal)
                        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                        .split(body);
                    draw_line(frame, columns[0], base, options, &slide.primary);
                    draw_line(frame, columns[1], base, options, &slide.secondary);
                }
                ViewMode::Primary => draw_line(frame, body, base, options, &slide.primary),
                ViewMode::Secondary => draw_line(frame, body, base, options, &slide.secondary),
            }
        }
    }
}

fn draw_message(frame: &mut Frame, area: Rect, style: Style, text: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let paragraph = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, rows[1]);
}

fn draw_line(frame: &mut Frame, area: Rect, base: Style, options: &PresentationOptions, text: &str) {
    let (content, emphasis) = scaled_text(text, options.font_size);
    let paragraph = Paragraph::new(Line::from(Span::styled(content, emphasis)))
        .style(base)
        .alignment(alignment(options.align))
        .wrap(Wrap { trim: true })
        .block(Block::default().padding(Padding::horizontal(2)));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::models::Slide;

    fn render(options: &PresentationOptions, state: &DisplayState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| draw_display(frame, options, state))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn ready(primary: &str, secondary: &str) -> DisplayState {
        DisplayState::Ready {
            number: 12,
            slide: Slide {
                primary: primary.into(),
                secondary: secondary.into(),
            },
        }
    }

    #[test]
    fn both_view_shows_both_languages() {
        let text = render(&PresentationOptions::default(), &ready("Oluwa", "Lord"));
        assert!(text.contains("Hymn 12"));
        assert!(text.contains("Oluwa"));
        assert!(text.contains("Lord"));
    }

    #[test]
    fn single_language_views_hide_the_other_column() {
        let options = PresentationOptions {
            view: ViewMode::Secondary,
            ..PresentationOptions::default()
        };
        let text = render(&options, &ready("Oluwa", "Lord"));
        assert!(text.contains("Lord"));
        assert!(!text.contains("Oluwa"));

        let options = PresentationOptions {
            view: ViewMode::Primary,
            ..PresentationOptions::default()
        };
        let text = render(&options, &ready("Oluwa", "Lord"));
        assert!(text.contains("Oluwa"));
        assert!(!text.contains("Lord"));
    }

    #[test]
    fn reserved_and_loading_messages() {
        let options = PresentationOptions::default();
        assert!(render(&options, &DisplayState::Reserved { number: 7 }).contains("Hymn 7 is reserved"));
        assert!(render(&options, &DisplayState::Loading).contains("Loading hymn..."));
        assert!(render(&options, &DisplayState::NotFound { number: 4 }).contains("Hymn 4 not found"));
    }

    #[test]
    fn theme_colors_fill_the_screen() {
        let options = PresentationOptions {
            theme: Theme::Light,
            ..PresentationOptions::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal
            .draw(|frame| draw_display(frame, &options, &DisplayState::Loading))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert!(buffer.content().iter().all(|cell| cell.bg == Color::White));
    }

    #[test]
    fn background_url_stays_off_screen() {
        let options = PresentationOptions {
            bg_image: "https://img.test/bg.png".into(),
            ..PresentationOptions::default()
        };
        let text = render(&options, &ready("Oluwa", "Lord"));
        assert!(text.contains("Lord"));
        assert!(!text.contains("img.test"));
    }

    #[test]
    fn font_scale_maps_to_spacing() {
        assert_eq!(scaled_text("Amen", FontSize::Small).0, "Amen");
        assert_eq!(scaled_text("Amen", FontSize::Large).0, "A m e n");
        assert_eq!(scaled_text("Amen", FontSize::ExtraLarge).0, "A M E N");
    }
}
