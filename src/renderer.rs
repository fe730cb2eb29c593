use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_CELL, GLYPH_FOOD, GLYPH_SNAKE_HEAD_DOWN,
    GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP, GridSize, Theme,
};
use crate::controller::Renderer;
use crate::game::{GameOverReport, GameStatus, GameView};
use crate::grid::Position;
use crate::input::Direction;
use crate::terminal_runtime::TerminalSession;
use crate::ui::hud::{render_hud, required_size};
use crate::ui::menu::{
    render_game_over_menu, render_history_panel, render_level_notice, render_pause_menu,
    render_start_menu,
};

/// Draws game views into the terminal session.
pub struct TerminalRenderer {
    session: TerminalSession,
    theme: Theme,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(session: TerminalSession, theme: Theme) -> Self {
        Self { session, theme }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &GameView<'_>) -> io::Result<()> {
        let theme = &self.theme;
        self.session
            .draw(|frame| render_frame(frame, view, theme, false))
    }

    fn confirm_restart(
        &mut self,
        view: &GameView<'_>,
        report: &GameOverReport,
    ) -> io::Result<bool> {
        let theme = &self.theme;
        self.session.draw(|frame| {
            render_frame(frame, view, theme, true);
            let area = frame.area();
            render_game_over_menu(frame, area, report, true, theme);
        })?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if let Some(answer) = restart_answer(key) {
                return Ok(answer);
            }
        }
    }
}

/// Maps a key press to a restart answer. Ctrl-C declines, as quit keys do.
fn restart_answer(key: KeyEvent) -> Option<bool> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return (key.code == KeyCode::Char('c')).then_some(false);
    }
    match key.code {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(true),
        KeyCode::Char('n' | 'N' | 'q' | 'Q') | KeyCode::Esc => Some(false),
        _ => None,
    }
}

/// Renders the full game frame from an immutable view.
///
/// `prompting` suppresses the passive game-over popup while the restart
/// question is drawn on top.
pub fn render_frame(frame: &mut Frame<'_>, view: &GameView<'_>, theme: &Theme, prompting: bool) {
    let area = frame.area();
    let (min_width, min_height) = required_size(view.bounds);
    if area.width < min_width || area.height < min_height {
        frame.render_widget(
            Paragraph::new(format!(
                "Terminal too small: need {min_width}x{min_height}, have {}x{}",
                area.width, area.height
            )),
            area,
        );
        return;
    }

    let board = render_hud(frame, area, view, theme);
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg));
    let inner = block.inner(board);
    frame.render_widget(block, board);
    frame.render_widget(Block::new().style(Style::new().bg(theme.field_bg)), inner);

    render_walls(frame, inner, view, theme);
    render_foods(frame, inner, view, theme);
    render_snake(frame, inner, view, theme);

    if let Some(notice) = view.level_up_notice {
        render_level_notice(frame, inner, notice, theme);
    }

    if view.show_history {
        render_history_panel(frame, area, view.history, theme);
    }

    match view.status {
        GameStatus::NotStarted => render_start_menu(frame, inner, theme),
        GameStatus::Paused => render_pause_menu(frame, inner, theme),
        GameStatus::GameOver if !prompting => {
            if let Some(report) = view.game_over.as_ref() {
                render_game_over_menu(frame, inner, report, false, theme);
            }
        }
        _ => {}
    }
}

fn render_walls(frame: &mut Frame<'_>, inner: Rect, view: &GameView<'_>, theme: &Theme) {
    let style = Style::new().fg(theme.wall).bg(theme.field_bg);
    let buffer = frame.buffer_mut();
    for wall in view.walls {
        if let Some((x, y)) = logical_to_terminal(inner, view.bounds, wall.position) {
            buffer.set_string(x, y, GLYPH_CELL, style);
        }
    }
}

fn render_foods(frame: &mut Frame<'_>, inner: Rect, view: &GameView<'_>, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for food in view.foods {
        if let Some((x, y)) = logical_to_terminal(inner, view.bounds, food.position) {
            let style = Style::new()
                .fg(food.kind.themed_color(theme))
                .bg(theme.field_bg);
            buffer.set_string(x, y, GLYPH_FOOD, style);
        }
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, view: &GameView<'_>, theme: &Theme) {
    let palette = theme.snake_palettes[view.palette_index.min(theme.snake_palettes.len() - 1)];
    let head = view.snake.head();

    let buffer = frame.buffer_mut();
    // Tail first so the head wins if segments ever share a cell.
    let segments: Vec<Position> = view.snake.segments().copied().collect();
    for segment in segments.iter().rev() {
        let Some((x, y)) = logical_to_terminal(inner, view.bounds, *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                head_glyph(view.snake.heading()),
                Style::new()
                    .fg(palette.head)
                    .bg(theme.field_bg)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(
                x,
                y,
                GLYPH_CELL,
                Style::new().fg(palette.body).bg(theme.field_bg),
            );
        }
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
