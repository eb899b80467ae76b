use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

/// How long the loop waits for input before ticking again.
const TICK_RATE: Duration = Duration::from_millis(250);

/// A full-screen surface driven by [`run`].
pub trait Surface {
    fn draw(&self, frame: &mut Frame);

    /// Called once per loop iteration, before drawing.
    fn tick(&mut self) -> Result<()>;

    /// Handle a key press. Returning `true` ends the loop.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool>;
}

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the surface asks to quit. The terminal is restored even when the loop
/// fails.
pub fn run<S: Surface>(surface: &mut S) -> Result<()> {
    let mut stdout = io::stdout();
    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal backend")?;

    let result = event_loop(&mut terminal, surface);

    cleanup_terminal(&mut terminal)?;
    result
}

fn event_loop<S: Surface>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    surface: &mut S,
) -> Result<()> {
    loop {
        surface.tick()?;
        terminal
            .draw(|frame| surface.draw(frame))
            .context("failed to draw frame")?;

        if event::poll(TICK_RATE).context("event polling failed")? {
            if let Event::Key(key_event) = event::read().context("failed to read event")? {
                if key_event.kind == KeyEventKind::Press && surface.handle_key(key_event)? {
                    return Ok(());
                }
            }
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}
