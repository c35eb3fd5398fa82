//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`board`]: pegs and disks, drawn at their animated positions
//! - [`moves`]: the full solution with the in-flight move highlighted
//! - [`log`]: tracing events captured by the event log layer
//! - [`status`]: status bar with keybindings and play state
//!
//! Each pane exports a single stateless `render_*` function; scroll offsets
//! live in [`App`](crate::ui::App) and are passed in by reference.

pub mod board;
pub mod log;
pub mod moves;
pub mod status;

pub use board::render_board_pane;
pub use log::render_log_pane;
pub use moves::render_moves_pane;
pub use status::{render_status_bar, PlayState};
