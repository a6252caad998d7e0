use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::app::Snapshot;
use crate::config::{Difficulty, MAX_NAME_LEN, SnakeColor};
use crate::controller::{MenuField, MenuForm};
use crate::snake::DeathReason;
use crate::theme::{GAME_OVER_COLOR, Theme, VICTORY_COLOR, snake_color, snake_outline};

const NAME_FIELD_WIDTH: usize = MAX_NAME_LEN + 1;

/// Draws the main menu: name, color, difficulty, theme and start rows.
pub fn render_main_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    form: MenuForm,
    theme: &Theme,
) {
    let popup = centered_popup(area, 60, 70);
    frame.render_widget(Clear, popup);

    let block = Block::bordered()
        .title(" menu ")
        .border_style(Style::default().fg(theme.ui_border))
        .style(Style::default().bg(theme.background).fg(theme.text));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(6),
        Constraint::Length(2),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE GAME"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text).add_modifier(Modifier::BOLD)),
        title_row,
    );

    let rows = vec![
        field_row(
            form,
            MenuField::Name,
            "Username",
            name_spans(snapshot, form, theme),
            theme,
        ),
        Line::from(""),
        field_row(
            form,
            MenuField::Color,
            "Snake Color",
            color_spans(snapshot.snake_color, theme),
            theme,
        ),
        Line::from(""),
        field_row(
            form,
            MenuField::Difficulty,
            "Difficulty",
            difficulty_spans(snapshot.difficulty, theme),
            theme,
        ),
        Line::from(""),
        field_row(
            form,
            MenuField::Theme,
            "Theme",
            vec![Span::raw(format!("< {} >", snapshot.theme.label()))],
            theme,
        ),
        Line::from(""),
        field_row(form, MenuField::Start, "", vec![Span::raw("[ START GAME ]")], theme),
    ];
    frame.render_widget(Paragraph::new(rows).alignment(Alignment::Left), body_row);

    frame.render_widget(
        Paragraph::new(vec![
            Line::from("[Up]/[Down] Select  [Left]/[Right] Change  [Enter] Start"),
            Line::from("[Esc] Quit"),
        ])
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.ui_border)),
        footer_row,
    );
}

fn field_row(
    form: MenuForm,
    field: MenuField,
    label: &str,
    value: Vec<Span<'static>>,
    theme: &Theme,
) -> Line<'static> {
    let focused = form.focus == field;
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };

    let mut spans = vec![
        Span::styled(marker, label_style),
        Span::styled(format!("{label:<12}"), label_style),
    ];
    spans.extend(value);
    Line::from(spans)
}

fn name_spans(snapshot: &Snapshot, form: MenuForm, theme: &Theme) -> Vec<Span<'static>> {
    let mut text = snapshot.name.clone();
    if form.focus == MenuField::Name {
        text.push('_');
    }
    let padding = NAME_FIELD_WIDTH.saturating_sub(text.width());
    text.push_str(&" ".repeat(padding));

    vec![Span::styled(
        format!(" {text} "),
        Style::default().bg(theme.input_bg).fg(theme.input_text),
    )]
}

fn color_spans(selected: SnakeColor, theme: &Theme) -> Vec<Span<'static>> {
    SnakeColor::ALL
        .iter()
        .flat_map(|color| {
            let swatch = Style::default()
                .bg(snake_color(*color))
                .fg(snake_outline(*color));
            let text = if *color == selected { "[]" } else { "  " };
            [Span::styled(text, swatch), Span::styled(" ", Style::default().fg(theme.text))]
        })
        .chain([Span::raw(selected.name())])
        .collect()
}

fn difficulty_spans(selected: Difficulty, theme: &Theme) -> Vec<Span<'static>> {
    Difficulty::ALL
        .iter()
        .map(|difficulty| {
            let label = format!(" {} ", difficulty.label());
            if *difficulty == selected {
                Span::styled(
                    label,
                    Style::default()
                        .bg(theme.text)
                        .fg(theme.background)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(label, Style::default().fg(theme.text))
            }
        })
        .collect()
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            Style::default()
                .fg(GAME_OVER_COLOR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Final Score: {score}")),
        Line::from(match death_reason {
            Some(DeathReason::WallCollision) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            None => "",
        }),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Esc]/[M] Main Menu"),
    ];

    render_result_popup(frame, area, " game over ", lines, theme);
}

/// Draws the victory screen as a centered popup.
pub fn render_victory_menu(frame: &mut Frame<'_>, area: Rect, length: usize, theme: &Theme) {
    let lines = vec![
        Line::from(Span::styled(
            "LEVEL COMPLETE!",
            Style::default()
                .fg(VICTORY_COLOR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("You reached length {length}!")),
        Line::from(""),
        Line::from("[Enter]/[R] Play Again"),
        Line::from("[Esc]/[M] Main Menu"),
    ];

    render_result_popup(frame, area, " victory ", lines, theme);
}

fn render_result_popup(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &'static str,
    lines: Vec<Line<'static>>,
    theme: &Theme,
) {
    let popup = centered_popup(area, 50, 40);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(theme.ui_border))
                .style(Style::default().bg(theme.ui_bg).fg(theme.text)),
        ),
        popup,
    );
}

/// Returns a rectangle of the given percentages centered inside `area`.
#[must_use]
pub fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
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
