use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::Snapshot;
use crate::theme::Theme;

const HUD_INNER_MARGIN_X: u16 = 1;
const SEPARATOR: &str = " | ";

/// Renders the one-line HUD bar above the board: player name on the left,
/// score and length progress on the right.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let bar_style = Style::default().bg(theme.ui_bg).fg(theme.text);
    frame.render_widget(Paragraph::new("").style(bar_style), area);

    let inner = inset_horizontal(area, HUD_INNER_MARGIN_X);
    let player = format!("Player: {}", snapshot.name);
    let player_width = u16::try_from(player.width()).unwrap_or(u16::MAX);
    let [left, right] =
        Layout::horizontal([Constraint::Length(player_width), Constraint::Min(0)])
            .areas(inner);

    frame.render_widget(Paragraph::new(Line::from(player)).style(bar_style), left);
    frame.render_widget(
        Paragraph::new(progress_line(
            snapshot.score,
            snapshot.length,
            snapshot.win_length,
            usize::from(right.width),
            theme,
        ))
        .alignment(Alignment::Right)
        .style(bar_style),
        right,
    );
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

fn progress_line(
    score: u32,
    length: usize,
    win_length: usize,
    available_width: usize,
    theme: &Theme,
) -> Line<'static> {
    let compact = progress_width(score, length, win_length, false) > available_width;
    let score_label = if compact { "S" } else { "Score" };
    let length_label = if compact { "L" } else { "Length" };
    let value_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::raw(format!("{score_label}: ")),
        Span::styled(score.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{length_label}: ")),
        Span::styled(format!("{length}/{win_length}"), value_style),
    ])
}

fn progress_width(score: u32, length: usize, win_length: usize, compact: bool) -> usize {
    let score_label = if compact { "S" } else { "Score" };
    let length_label = if compact { "L" } else { "Length" };

    format!("{score_label}: {score}").width()
        + SEPARATOR.width()
        + format!("{length_label}: {length}/{win_length}").width()
}
