//! Terminal presentation of match snapshots.

pub mod arena_scene;

use crate::config::MatchConfig;
use crate::sim::{MatchSnapshot, Renderer};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};

/// Draws snapshots into a ratatui terminal.
pub struct TerminalRenderer<W: Write> {
    terminal: Terminal<CrosstermBackend<W>>,
    controls: Vec<(String, String)>,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W, config: &MatchConfig) -> io::Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(writer))?;
        Ok(Self {
            terminal,
            controls: control_hints(config),
        })
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<W>> {
        &mut self.terminal
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter_screen(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        self.terminal.backend_mut().execute(EnterAlternateScreen)?;
        self.terminal.hide_cursor()
    }

    /// Undo `enter_screen`. Every step is attempted; the first error is returned.
    pub fn restore_screen(&mut self) -> io::Result<()> {
        let raw = disable_raw_mode();
        let screen = self
            .terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .map(|_| ());
        let cursor = self.terminal.show_cursor();
        raw.and(screen).and(cursor)
    }
}

/// Run `body` between `enter` and `restore`. `restore` runs even when
/// `enter` fails part way, and `body` only runs after a clean `enter`.
/// The first error wins.
pub fn run_session<S, T, E>(
    state: &mut S,
    enter: impl FnOnce(&mut S) -> Result<(), E>,
    body: impl FnOnce(&mut S) -> Result<T, E>,
    restore: impl FnOnce(&mut S) -> Result<(), E>,
) -> Result<T, E> {
    let result = enter(state).and_then(|()| body(state));
    let restored = restore(state);
    result.and_then(|value| restored.map(|()| value))
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    type Error = io::Error;

    fn draw(&mut self, snapshot: &MatchSnapshot) -> io::Result<()> {
        let controls = &self.controls;
        self.terminal.draw(|frame| {
            let area = frame.size();
            arena_scene::render_arena_scene(frame, area, snapshot, controls);
        })?;
        Ok(())
    }
}

/// `[W A S D]` style hints, one per player, plus the quit key.
pub fn control_hints(config: &MatchConfig) -> Vec<(String, String)> {
    let mut hints: Vec<(String, String)> = config
        .players
        .iter()
        .map(|player| {
            let keys = player.keys.keys().map(|c| c.to_ascii_uppercase());
            (
                format!("[{} {} {} {}]", keys[0], keys[2], keys[1], keys[3]),
                player.name.clone(),
            )
        })
        .collect();
    hints.push(("[Esc]".to_string(), "Quit".to_string()));
    hints
}
