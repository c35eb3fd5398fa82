//! Move list pane with the current move highlighted

use crate::solver::Move;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the move list.
///
/// `consumed` moves have been handed to the driver; `current` is the one in
/// flight, if any. With `follow` set the view scrolls to keep the next move
/// visible.
#[allow(clippy::too_many_arguments)]
pub fn render_moves_pane(
    frame: &mut Frame,
    area: Rect,
    moves: &[Move],
    consumed: usize,
    current: Option<usize>,
    is_focused: bool,
    follow: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Moves ({}) ", moves.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let max_scroll = moves.len().saturating_sub(visible_height);

    if follow {
        let focus = current.unwrap_or(consumed).min(moves.len().saturating_sub(1));
        if focus < *scroll_offset {
            *scroll_offset = focus;
        } else if focus >= *scroll_offset + visible_height {
            *scroll_offset = focus + 1 - visible_height;
        }
    }
    *scroll_offset = (*scroll_offset).min(max_scroll);

    let number_width = moves.len().to_string().len();
    let lines: Vec<Line> = moves
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(i, mv)| {
            let is_current = current == Some(i);
            let (marker, style) = if is_current {
                (
                    "▶ ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else if i < consumed {
                ("  ", Style::default().fg(DEFAULT_THEME.comment))
            } else {
                ("  ", Style::default().fg(DEFAULT_THEME.fg))
            };

            Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{:>width$}  ", i + 1, width = number_width), style),
                Span::styled(format!("{} ", mv), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
