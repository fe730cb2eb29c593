use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::GameOverReport;
use crate::score::ScoreHistory;
use crate::snake::Collision;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 80, 50);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("SNAKE").style(
            Style::default()
                .fg(theme.ui_accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("Arrows/WASD move"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_text).bg(theme.overlay_bg))
            .block(Block::bordered().title(" start ")),
        popup,
    );
}

/// Draws the pause overlay.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED").style(
            Style::default()
                .fg(theme.ui_accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("[P] Resume"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_text).bg(theme.overlay_bg))
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over popup. `asking` adds the restart question.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    report: &GameOverReport,
    asking: bool,
    theme: &Theme,
) {
    let popup = centered_popup(area, 70, 50);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(theme.ui_accent)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {}", report.score)),
        Line::from(format!("Level: {}", report.level)),
        Line::from(cause_text(report.cause)),
        Line::from(""),
    ];
    if asking {
        lines.push(Line::from("Restart? [Y]/[N]"));
    } else {
        lines.push(Line::from("[Enter] New game  [Q] Quit"));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.ui_text).bg(theme.overlay_bg))
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the transient "Level N!" notice across the middle of the board.
pub fn render_level_notice(frame: &mut Frame<'_>, area: Rect, notice: &str, theme: &Theme) {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(notice.to_owned()))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(theme.ui_accent)
                    .add_modifier(Modifier::BOLD),
            ),
        row,
    );
}

/// Draws the score history panel in the top-right corner of `area`.
pub fn render_history_panel(
    frame: &mut Frame<'_>,
    area: Rect,
    history: &ScoreHistory,
    theme: &Theme,
) {
    let mut lines: Vec<Line<'_>> = history
        .scores()
        .enumerate()
        .map(|(index, entry)| {
            Line::from(format!(
                "{}. Score: {} (Level {}) - {} UTC",
                index + 1,
                entry.score,
                entry.level,
                entry.clock_time()
            ))
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from("No finished runs yet"));
    }

    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    let width = 42.min(area.width);
    let panel = Rect {
        x: area.right().saturating_sub(width),
        y: area.y,
        width,
        height,
    };

    frame.render_widget(Clear, panel);
    frame.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(theme.ui_text).bg(theme.overlay_bg))
            .block(
                Block::bordered()
                    .title(" Score History ")
                    .title_style(Style::default().fg(theme.ui_accent)),
            ),
        panel,
    );
}

fn cause_text(cause: Collision) -> &'static str {
    match cause {
        Collision::OutOfBounds => "Cause: left the board",
        Collision::Wall => "Cause: hit a wall",
        Collision::SelfCollision => "Cause: hit yourself",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
