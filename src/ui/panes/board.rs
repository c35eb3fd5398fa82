//! Board pane: pegs, ground line and disks
//!
//! Disks are drawn at the position reported by the [`TerminalAnimator`], so
//! in-flight disks appear between pegs. Levels are compressed vertically when
//! the pane is shorter than the lift height.

use crate::puzzle::PuzzleState;
use crate::ui::animator::{Position, TerminalAnimator};
use crate::ui::theme::{disk_color, hsl, DEFAULT_THEME};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Extra levels above the stack that the lift phase uses
const LIFT_HEADROOM: usize = 3;

const DISK_CHAR: char = '█';
const PEG_CHAR: char = '┃';
const GROUND_CHAR: char = '━';

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

/// Maps board coordinates onto a `width` x `height` character grid
struct Geometry {
    width: usize,
    height: usize,
    scale: f64,
}

impl Geometry {
    fn new(width: usize, height: usize, max_level: usize) -> Self {
        // Bottom row is the ground; levels use the rows above it.
        let rows = height.saturating_sub(1).max(1);
        let scale = if max_level + 1 <= rows || max_level == 0 {
            1.0
        } else {
            rows.saturating_sub(1) as f64 / max_level as f64
        };
        Geometry {
            width,
            height,
            scale,
        }
    }

    fn row(&self, level: f64) -> usize {
        let top = self.height.saturating_sub(2) as f64;
        (top - level * self.scale).round().clamp(0.0, top) as usize
    }

    fn column(&self, peg: f64) -> usize {
        let center = self.width as f64 * (2.0 * peg + 1.0) / 6.0;
        (center.round() as usize).min(self.width.saturating_sub(1))
    }

    fn max_half_width(&self) -> usize {
        (self.width / 6).saturating_sub(1).max(1)
    }
}

fn build_grid(state: &PuzzleState, animator: &TerminalAnimator, width: usize, height: usize) -> Vec<Vec<Cell>> {
    let disk_count = state.disk_count();
    let geometry = Geometry::new(width, height, disk_count as usize + LIFT_HEADROOM);
    let mut grid = vec![vec![Cell::default(); width]; height];

    // Ground
    if let Some(ground) = grid.last_mut() {
        for cell in ground.iter_mut() {
            *cell = Cell {
                ch: GROUND_CHAR,
                style: Style::default().fg(DEFAULT_THEME.ground),
            };
        }
    }

    // Pegs, two levels taller than a full stack
    let peg_style = Style::default().fg(DEFAULT_THEME.peg);
    let peg_top = geometry.row(disk_count as f64 + 1.0);
    let peg_bottom = geometry.row(0.0);
    for peg in 0..3 {
        let col = geometry.column(peg as f64);
        for row in grid.iter_mut().take(peg_bottom + 1).skip(peg_top) {
            row[col] = Cell {
                ch: PEG_CHAR,
                style: peg_style,
            };
        }
    }

    // Disks: resting ones first so flying disks stay on top
    let mut disks: Vec<_> = state.disks().iter().collect();
    disks.sort_by_key(|d| (d.in_transit, d.order));

    let max_half = geometry.max_half_width() as f64;
    for disk in disks {
        let pos = animator.position(disk.id).unwrap_or(Position {
            x: disk.peg.index() as f64,
            y: disk.order as f64,
        });

        let hue = disk.hue(disk_count);
        let style = if animator.is_flashing(disk.id) {
            Style::default()
                .fg(hsl(hue, 0.55, 0.75))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(disk_color(hue))
        };

        let half = (disk.width_ratio(disk_count) * max_half).round().max(1.0) as usize;
        let center = geometry.column(pos.x);
        let row = geometry.row(pos.y);
        let left = center.saturating_sub(half);
        let right = (center + half).min(width.saturating_sub(1));
        for cell in &mut grid[row][left..=right] {
            *cell = Cell { ch: DISK_CHAR, style };
        }
    }

    grid
}

/// Render the board pane
pub fn render_board_pane(
    frame: &mut Frame,
    area: Rect,
    state: &PuzzleState,
    animator: &TerminalAnimator,
) {
    let block = Block::default()
        .title(format!(" Towers of Hanoi · {} disks ", state.disk_count()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let inner = block.inner(area);
    let (width, height) = (inner.width as usize, inner.height as usize);

    if width < 9 || height < 3 {
        let paragraph = Paragraph::new("(terminal too small)")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = build_grid(state, animator, width, height)
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| Span::styled(cell.ch.to_string(), cell.style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
