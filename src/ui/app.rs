//! Main TUI application state and logic

use crate::config::PlayConfig;
use crate::driver::DriverStatus;
use crate::logging::EventLog;
use crate::session::{Session, ToggleOutcome};
use crate::solver::SolverError;
use crate::ui::animator::TerminalAnimator;
use crate::ui::panes::{self, PlayState};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Poll interval while something is moving
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Poll interval while idle
const IDLE_INTERVAL: Duration = Duration::from_millis(100);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Moves,
    Log,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Moves => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Moves,
        }
    }
}

/// The main application state
pub struct App {
    /// Puzzle and its driver
    pub session: Session,

    /// Transition host drawing the disks
    pub animator: TerminalAnimator,

    /// Events captured from tracing
    pub event_log: EventLog,

    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub moves_scroll: usize,
    pub log_scroll: usize,

    /// Log length at the previous frame (for auto-tailing)
    pub prev_log_len: usize,

    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(config: &PlayConfig, event_log: EventLog) -> Result<Self, SolverError> {
        let now = Instant::now();
        let mut session = Session::new(config.disks)?;
        let mut status_message = String::from("Ready!");
        if config.autostart && session.start() {
            status_message = "Playing...".to_string();
        }

        let mut animator = TerminalAnimator::new(config.phase, config.impact, now);
        animator.sync(session.state());

        Ok(App {
            session,
            animator,
            event_log,
            focused_pane: FocusedPane::Moves,
            moves_scroll: 0,
            log_scroll: usize::MAX,
            prev_log_len: 0,
            should_quit: false,
            status_message,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        })
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick(Instant::now());
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            let timeout = if self.animator.take_frame_request()
                || self.animator.is_animating()
                || self.session.is_running()
            {
                FRAME_INTERVAL
            } else {
                IDLE_INTERVAL
            };

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Advance animations and the driver to `now`
    pub fn tick(&mut self, now: Instant) {
        self.animator.advance(now);
        self.animator.sync(self.session.state());

        let was_finished = self.session.driver().is_finished();
        match self.session.poll(&mut self.animator) {
            Ok(DriverStatus::Idle) => {
                if !was_finished && self.session.driver().is_finished() {
                    self.status_message = "Solved!".to_string();
                }
            }
            Ok(DriverStatus::Cancelled) => {
                self.status_message = "Cancelled".to_string();
            }
            Ok(_) => {}
            Err(e) => {
                self.status_message = format!("Error: {}", e);
            }
        }

        let log_len = self.event_log.len();
        if log_len != self.prev_log_len {
            self.prev_log_len = log_len;
            if self.focused_pane != FocusedPane::Log {
                self.log_scroll = usize::MAX;
            }
        }
    }

    pub fn play_state(&self) -> PlayState {
        let driver = self.session.driver();
        if driver.status() == DriverStatus::Failed {
            PlayState::Failed
        } else if driver.is_finished() {
            PlayState::Solved
        } else if self.session.is_running() {
            PlayState::Playing
        } else if self.session.state().queue().consumed() > 0 {
            PlayState::Paused
        } else {
            PlayState::Ready
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Board and side panes, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_chunks[0]);

        // Left column: Board (top) | Event log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let state = self.session.state();
        let current = match self.session.status() {
            DriverStatus::Stepping { index, .. } => Some(index),
            _ => None,
        };

        panes::render_board_pane(frame, left_rows[0], state, &self.animator);

        panes::render_log_pane(
            frame,
            left_rows[1],
            &self.event_log,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        panes::render_moves_pane(
            frame,
            columns[1],
            state.queue().all(),
            state.queue().consumed(),
            current,
            self.focused_pane == FocusedPane::Moves,
            self.session.is_running(),
            &mut self.moves_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            state.queue().consumed(),
            state.queue().total(),
            self.play_state(),
        );
    }

    fn reset_to(&mut self, disks: u32) {
        self.session.set_disk_count(disks);
        self.after_reset();
    }

    fn after_reset(&mut self) {
        self.animator.clear();
        self.animator.sync(self.session.state());
        self.moves_scroll = 0;
        self.status_message = format!("Reset with {} disks", self.session.disk_count());
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                // Start/Reset toggle (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.session.driver().is_finished() {
                        self.animator.clear();
                    }
                    match self.session.toggle() {
                        ToggleOutcome::Started => {
                            self.animator.sync(self.session.state());
                            self.status_message = "Playing...".to_string();
                        }
                        ToggleOutcome::Reset => self.after_reset(),
                    }
                }
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if self.session.pause_or_resume() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Paused".to_string();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.reset_to(self.session.disk_count());
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.reset_to(self.session.disk_count() + 1);
            }
            KeyCode::Char('-') => {
                self.reset_to(self.session.disk_count().saturating_sub(1));
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Moves => {
                    self.moves_scroll = self.moves_scroll.saturating_sub(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Moves => {
                    self.moves_scroll = self.moves_scroll.saturating_add(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                }
            },
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn config(disks: u32) -> PlayConfig {
        PlayConfig {
            disks,
            phase: Duration::from_millis(10),
            impact: Duration::from_millis(10),
            autostart: false,
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_autoplay_solves_puzzle() {
        let mut app = App::new(&config(3), EventLog::default()).unwrap();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.play_state(), PlayState::Playing);

        let mut now = Instant::now();
        for _ in 0..200 {
            now += Duration::from_millis(20);
            app.tick(now);
        }

        assert_eq!(app.play_state(), PlayState::Solved);
        assert!(app.session.state().is_solved());
        assert!(app.session.state().is_consistent());
        assert_eq!(app.status_message, "Solved!");
    }

    #[test]
    fn test_disk_count_keys() {
        let mut app = App::new(&config(3), EventLog::default()).unwrap();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.session.disk_count(), 4);
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.session.disk_count(), 2);
        assert_eq!(app.play_state(), PlayState::Ready);
    }

    #[test]
    fn test_render_smoke() {
        let mut app = App::new(&config(4), EventLog::default()).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(160, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Towers of Hanoi"));
        assert!(text.contains("Moves (15)"));
        assert!(text.contains("READY"));
    }
}
