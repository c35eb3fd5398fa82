//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four parts:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus
//! - **[`animator`]** — [`TerminalAnimator`], the transition host the driver talks to
//! - **[`panes`]** — stateless render functions for each visible pane (board, moves,
//!   event log, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`PlayConfig`] and call [`App::run`] to start the event loop.
//!
//! [`PlayConfig`]: crate::config::PlayConfig
//! [`App::run`]: app::App::run

pub mod animator;
pub mod app;
pub mod panes;
pub mod theme;

pub use animator::TerminalAnimator;
pub use app::App;
