use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{CELL_WIDTH, GridSize, Theme};
use crate::game::GameView;

/// Rows below the board: stats and key hints.
const HUD_HEIGHT: u16 = 2;

/// Splits `area` into the bordered board rectangle and renders the HUD
/// rows beneath it. Returns the board rectangle (border included).
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, view: &GameView<'_>, theme: &Theme) -> Rect {
    let (board_width, board_height) = board_extent(view.bounds);

    let [board_row, stats_row, hints_row, _] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let [_, board, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(board_width),
        Constraint::Fill(1),
    ])
    .areas(board_row);
    let [_, stats, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(board_width),
        Constraint::Fill(1),
    ])
    .areas(stats_row);
    let [_, hints, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(board_width),
        Constraint::Fill(1),
    ])
    .areas(hints_row);

    frame.render_widget(Paragraph::new(stats_line(view, theme)), stats);
    frame.render_widget(
        Paragraph::new(Line::from("H history  P pause  R restart  Q quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_muted)),
        hints,
    );

    board
}

/// Terminal size needed for the board including its border.
#[must_use]
pub fn board_extent(bounds: GridSize) -> (u16, u16) {
    (
        bounds.width.saturating_mul(CELL_WIDTH).saturating_add(2),
        bounds.height.saturating_add(2),
    )
}

/// Minimum terminal size that fits the board and HUD.
#[must_use]
pub fn required_size(bounds: GridSize) -> (u16, u16) {
    let (width, height) = board_extent(bounds);
    (width, height + HUD_HEIGHT)
}

fn stats_line(view: &GameView<'_>, theme: &Theme) -> Line<'static> {
    let label = Style::default().fg(theme.ui_muted);
    let value = Style::default()
        .fg(theme.ui_text)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(" Level ", label),
        Span::styled(view.level.to_string(), value),
        Span::styled("   Score ", label),
        Span::styled(view.score.to_string(), value),
        Span::styled("   Length ", label),
        Span::styled(view.snake.len().to_string(), value),
    ])
}
