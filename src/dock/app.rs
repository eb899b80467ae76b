use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use open::that as open_link;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::info;

use crate::content::PendingLoad;
use crate::helpers::{key_span, surface_error};
use crate::options::{OptionValue, PresentationOptions};
use crate::output::OutputChannel;
use crate::protocol::DisplayRequest;
use crate::terminal::Surface;

use super::keys::{global_action, is_force_quit, GlobalAction};
use super::state::DockState;

/// Height of the search bar and of the options bar.
const BAR_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
const SEARCH_PROMPT: &str = "Search: ";
const BACKGROUND_PROMPT: &str = "Background: ";

/// Which input receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
    Background,
}

struct StatusMessage {
    text: String,
    kind: StatusKind,
}

enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// The operator's control surface.
pub struct DockApp {
    state: DockState,
    channel: Box<dyn OutputChannel>,
    focus: Focus,
    status: Option<StatusMessage>,
    pending: Option<PendingLoad>,
}

impl DockApp {
    pub fn new(options: PresentationOptions, channel: Box<dyn OutputChannel>) -> Self {
        Self {
            state: DockState::new(options),
            channel,
            focus: Focus::List,
            status: None,
            pending: None,
        }
    }

    /// Attach the in-flight collection fetch. The list stays empty until it
    /// resolves.
    pub fn with_pending_load(mut self, pending: PendingLoad) -> Self {
        self.pending = Some(pending);
        self
    }

    pub fn state(&self) -> &DockState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DockState {
        &mut self.state
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Pick up the collection once the background fetch finishes.
    pub fn poll_content(&mut self) {
        let Some(result) = self.pending.as_ref().and_then(PendingLoad::poll) else {
            return;
        };
        self.pending = None;
        match result {
            Ok(songs) => {
                let count = songs.len();
                self.state.set_songs(songs);
                self.set_status(format!("Loaded {count} hymns."), StatusKind::Info);
            }
            Err(err) => {
                let err = anyhow::Error::new(err);
                self.set_status(
                    format!("Could not load hymns: {}", surface_error(&err)),
                    StatusKind::Error,
                );
            }
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if is_force_quit(&key) {
            return Ok(true);
        }

        if let Some(action) = global_action(&key) {
            self.apply(action);
            return Ok(false);
        }

        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER | KeyModifiers::META)
        {
            return Ok(false);
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key.code),
            Focus::Background => self.handle_background_key(key.code),
            Focus::List => return Ok(self.handle_list_key(key.code)),
        }
        Ok(false)
    }

    fn apply(&mut self, action: GlobalAction) {
        match action {
            GlobalAction::SelectNext => self.state.move_selection(1),
            GlobalAction::SelectPrevious => self.state.move_selection(-1),
            GlobalAction::NextSlide => {
                if let Some(request) = self.state.next_slide() {
                    self.dispatch(request);
                }
            }
            GlobalAction::PreviousSlide => {
                if let Some(request) = self.state.previous_slide() {
                    self.dispatch(request);
                }
            }
            GlobalAction::Send => {
                if let Some(request) = self.state.current_request() {
                    self.dispatch(request);
                }
            }
            GlobalAction::FocusSearch => self.focus = Focus::Search,
        }
    }

    fn dispatch(&mut self, request: DisplayRequest) {
        info!(
            number = ?request.number,
            slide = request.slide,
            theme = request.options.theme.as_str(),
            "dispatching to display"
        );
        self.channel.send(&request);
        if let Some(number) = request.number {
            self.set_status(
                format!("Sent Hymn {number}, slide {}.", request.slide + 1),
                StatusKind::Info,
            );
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.focus = Focus::List,
            KeyCode::Tab => self.focus = Focus::Background,
            KeyCode::Backspace => self.state.pop_query_char(),
            KeyCode::Char(ch) if !ch.is_control() => self.state.push_query_char(ch),
            _ => {}
        }
    }

    fn handle_background_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Tab => self.focus = Focus::List,
            KeyCode::Backspace => {
                self.state.options.bg_image.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => self.state.options.bg_image.push(ch),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('b') => self.focus = Focus::Background,
            KeyCode::Char('t') => self.cycle_options(|o| o.theme = o.theme.next()),
            KeyCode::Char('v') => self.cycle_options(|o| o.view = o.view.next()),
            KeyCode::Char('s') => self.cycle_options(|o| o.font_size = o.font_size.next()),
            KeyCode::Char('a') => self.cycle_options(|o| o.align = o.align.next()),
            KeyCode::Char('o') => self.preview_background(),
            KeyCode::PageDown => self.state.move_selection(5),
            KeyCode::PageUp => self.state.move_selection(-5),
            KeyCode::Home => self.state.select(0),
            KeyCode::End => self
                .state
                .select(self.state.filtered_len().saturating_sub(1)),
            _ => {}
        }
        false
    }

    /// Option changes take effect on the next dispatch; nothing is sent here.
    fn cycle_options(&mut self, change: impl FnOnce(&mut PresentationOptions)) {
        change(&mut self.state.options);
    }

    fn preview_background(&mut self) {
        let url = self.state.options.bg_image.trim().to_string();
        if url.is_empty() {
            self.set_status("No background image set.", StatusKind::Error);
        } else if let Err(err) = open_link(&url) {
            self.set_status(
                format!("Failed to open background image: {err}"),
                StatusKind::Error,
            );
        } else {
            self.set_status(format!("Opened {url}."), StatusKind::Info);
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BAR_HEIGHT),
                Constraint::Length(BAR_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_search_bar(frame, chunks[0]);
        self.draw_options_bar(frame, chunks[1]);
        self.draw_song_list(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Search;
        let block = input_block("Celestial Hymns - Dock", focused);
        let query = self.state.query();
        let line = if query.is_empty() && !focused {
            Line::from(vec![
                Span::raw(SEARCH_PROMPT),
                Span::styled(
                    "number, primary or secondary text",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        } else {
            Line::from(format!("{SEARCH_PROMPT}{query}"))
        };
        frame.render_widget(Paragraph::new(line).block(block.clone()), area);

        if focused {
            let inner = block.inner(area);
            let cursor_x = inner.x + (SEARCH_PROMPT.len() + query.chars().count()) as u16;
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn draw_options_bar(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Background;
        let options = &self.state.options;
        let value_style = Style::default().add_modifier(Modifier::BOLD);
        let background = if options.bg_image.is_empty() && !focused {
            Span::styled("none", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(options.bg_image.clone())
        };

        let line = Line::from(vec![
            key_span("[t]"),
            Span::raw(" Theme "),
            Span::styled(options.theme.label(), value_style),
            Span::raw("  "),
            key_span("[v]"),
            Span::raw(" View "),
            Span::styled(options.view.label(), value_style),
            Span::raw("  "),
            key_span("[s]"),
            Span::raw(" Size "),
            Span::styled(options.font_size.label(), value_style),
            Span::raw("  "),
            key_span("[a]"),
            Span::raw(" Align "),
            Span::styled(options.align.label(), value_style),
            Span::raw("  "),
            key_span("[b]"),
            Span::raw(format!(" {BACKGROUND_PROMPT}")),
            background,
        ]);

        let block = input_block("Presentation", focused);
        frame.render_widget(Paragraph::new(line).block(block.clone()), area);

        if focused {
            let inner = block.inner(area);
            let prefix: usize = line_prefix_width(options);
            let cursor_x = inner.x + (prefix + options.bg_image.chars().count()) as u16;
            frame.set_cursor_position((cursor_x.min(inner.right().saturating_sub(1)), inner.y));
        }
    }

    fn draw_song_list(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            "Hymns ({}) - slide {}",
            self.state.filtered_len(),
            self.state.current_slide() + 1
        );
        let block = Block::default().borders(Borders::ALL).title(title);

        if self.is_loading() || self.state.filtered_len() == 0 {
            let message = if self.is_loading() {
                "Loading hymns..."
            } else {
                "No hymns found. Try clearing the search."
            };
            let paragraph = Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Gray))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let selected = self.state.selected_index();
        let items: Vec<ListItem> = self
            .state
            .filtered()
            .enumerate()
            .map(|(index, song)| {
                let marker = if index == selected { "▶ " } else { "  " };
                ListItem::new(vec![
                    Line::from(Span::styled(
                        format!("{marker}{}", song.title()),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(
                        format!("  {}", song.preview()),
                        Style::default().fg(Color::Gray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Yellow));
        let mut list_state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let mut spans = vec![
            key_span("[↑↓]"),
            Span::raw(" Select   "),
            key_span("[←→]"),
            Span::raw(" Slide   "),
            key_span("[Enter]"),
            Span::raw(" Send   "),
            key_span("[Ctrl+F]"),
            Span::raw(" Search   "),
        ];
        match self.focus {
            Focus::List => spans.extend([
                key_span("[o]"),
                Span::raw(" Preview background   "),
                key_span("[q]"),
                Span::raw(" Quit"),
            ]),
            Focus::Search | Focus::Background => spans.extend([
                key_span("[Tab]"),
                Span::raw(" Next field   "),
                key_span("[Esc]"),
                Span::raw(" Done"),
            ]),
        }
        Line::from(spans)
    }
}

impl Surface for DockApp {
    fn draw(&self, frame: &mut Frame) {
        self.render(frame);
    }

    fn tick(&mut self) -> Result<()> {
        self.poll_content();
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        self.handle_key_event(key)
    }
}

fn input_block(title: &str, focused: bool) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string());
    if focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    }
}

/// Width of the options bar text that precedes the background URL.
fn line_prefix_width(options: &PresentationOptions) -> usize {
    [
        format!("[t] Theme {}  ", options.theme.label()),
        format!("[v] View {}  ", options.view.label()),
        format!("[s] Size {}  ", options.font_size.label()),
        format!("[a] Align {}  ", options.align.label()),
        format!("[b] {BACKGROUND_PROMPT}"),
    ]
    .iter()
    .map(|part| part.chars().count())
    .sum()
}
