//! # Introduction
//!
//! hanoitty solves the 3-peg Towers of Hanoi and replays the solution as a
//! cancelable, time-stepped animation in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Solver → MoveQueue → Driver ⇄ TransitionHost (TerminalAnimator) → TUI
//! ```
//!
//! 1. [`solver`] — recursive move-sequence solver with a process-wide memo cache.
//! 2. [`puzzle`] — peg/disk data model the driver mutates, plus a standalone
//!    legality checker.
//! 3. [`driver`] — the per-move lift/translate/settle state machine, run
//!    tokens and completion signals.
//! 4. [`session`] — start/pause/reset control that owns the active driver.
//! 5. [`config`] and [`logging`] — CLI parsing and tracing set-up.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.

pub mod config;
pub mod driver;
pub mod logging;
pub mod puzzle;
pub mod session;
pub mod solver;
pub mod ui;
