use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::app::{AppState, Snapshot};
use crate::controller::MenuForm;
use crate::grid::{GridSize, Position};
use crate::theme::{FOOD_COLOR, FOOD_OUTLINE, Theme, snake_color, snake_outline};
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_main_menu, render_victory_menu};

/// Terminal columns per grid cell; two columns keep cells roughly square.
const CELL_WIDTH: u16 = 2;

const HUD_HEIGHT: u16 = 1;

const GLYPH_EMPTY: &str = " ·";
const GLYPH_SEGMENT: &str = "[]";
const GLYPH_HEAD: &str = "<>";
const GLYPH_FOOD: &str = "()";

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, form: MenuForm) {
    let theme = snapshot.theme.theme();
    let area = frame.area();
    frame.render_widget(
        Block::new().style(Style::new().bg(theme.background).fg(theme.text)),
        area,
    );

    if snapshot.state == AppState::Menu {
        render_main_menu(frame, area, snapshot, form, theme);
        return;
    }

    let Some((hud_area, board_area)) = board_layout(area, snapshot.bounds) else {
        render_too_small(frame, area, snapshot.bounds, theme);
        return;
    };

    render_hud(frame, hud_area, snapshot, theme);

    let block = Block::bordered()
        .border_style(Style::new().fg(theme.ui_border).bg(theme.background));
    let inner = block.inner(board_area);
    frame.render_widget(block, board_area);

    render_cells(frame, inner, snapshot, theme);
    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    match snapshot.state {
        AppState::GameOver => {
            render_game_over_menu(frame, board_area, snapshot.score, snapshot.death_reason, theme);
        }
        AppState::Victory => render_victory_menu(frame, board_area, snapshot.length, theme),
        AppState::Menu | AppState::Playing => {}
    }
}

/// Splits `area` into the HUD bar and the bordered board, centered. Returns
/// `None` when the terminal cannot show the whole board.
fn board_layout(area: Rect, bounds: GridSize) -> Option<(Rect, Rect)> {
    let board_width = bounds.width.checked_mul(CELL_WIDTH)?.checked_add(2)?;
    let board_height = bounds.height.checked_add(2)?;
    let total_height = board_height.checked_add(HUD_HEIGHT)?;
    if area.width < board_width || area.height < total_height {
        return None;
    }

    let x = area.x + (area.width - board_width) / 2;
    let y = area.y + (area.height - total_height) / 2;
    let hud = Rect::new(x, y, board_width, HUD_HEIGHT);
    let board = Rect::new(x, y + HUD_HEIGHT, board_width, board_height);
    Some((hud, board))
}

fn render_too_small(frame: &mut Frame<'_>, area: Rect, bounds: GridSize, theme: &Theme) {
    let needed_width = u32::from(bounds.width) * u32::from(CELL_WIDTH) + 2;
    let needed_height = u32::from(bounds.height) + 2 + u32::from(HUD_HEIGHT);
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!(
            "need {needed_width}x{needed_height}, have {}x{}",
            area.width, area.height
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.text).add_modifier(Modifier::BOLD)),
        area,
    );
}

fn render_cells(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, theme: &Theme) {
    let style = Style::new().fg(theme.grid).bg(theme.background);
    let buffer = frame.buffer_mut();

    for cell in snapshot.bounds.cells() {
        if let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, cell) {
            buffer.set_string(x, y, GLYPH_EMPTY, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let Some(food) = snapshot.food_position else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, food) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(
        x,
        y,
        GLYPH_FOOD,
        Style::new().fg(FOOD_OUTLINE).bg(FOOD_COLOR),
    );
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let style = Style::new()
        .fg(snake_outline(snapshot.snake_color))
        .bg(snake_color(snapshot.snake_color));

    let buffer = frame.buffer_mut();
    for (idx, segment) in snapshot.snake_cells.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.bounds, *segment) else {
            continue;
        };

        if idx == 0 {
            buffer.set_string(x, y, GLYPH_HEAD, style.add_modifier(Modifier::BOLD));
        } else {
            buffer.set_string(x, y, GLYPH_SEGMENT, style);
        }
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !bounds.contains(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::app::{AppState, GameStateMachine, MenuSelection};
    use crate::config::{Difficulty, SnakeColor};
    use crate::controller::MenuForm;
    use crate::food::FoodSpawner;
    use crate::grid::{GridSize, Position};
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{board_layout, logical_to_terminal, render};

    const BOUNDS: GridSize = GridSize {
        width: 10,
        height: 6,
    };

    #[test]
    fn board_layout_centers_hud_and_board() {
        let (hud, board) = board_layout(Rect::new(0, 0, 30, 13), BOUNDS).expect("board fits");

        assert_eq!(hud, Rect::new(4, 2, 22, 1));
        assert_eq!(board, Rect::new(4, 3, 22, 8));
    }

    #[test]
    fn board_layout_rejects_small_terminals() {
        assert!(board_layout(Rect::new(0, 0, 21, 20), BOUNDS).is_none());
        assert!(board_layout(Rect::new(0, 0, 40, 8), BOUNDS).is_none());
    }

    #[test]
    fn cells_map_to_two_columns_each() {
        let inner = Rect::new(1, 1, 20, 6);

        assert_eq!(
            logical_to_terminal(inner, BOUNDS, Position { x: 0, y: 0 }),
            Some((1, 1))
        );
        assert_eq!(
            logical_to_terminal(inner, BOUNDS, Position { x: 9, y: 5 }),
            Some((19, 6))
        );
        assert_eq!(
            logical_to_terminal(inner, BOUNDS, Position { x: 10, y: 0 }),
            None
        );
    }

    #[test]
    fn every_screen_renders_without_panicking() {
        let mut machine = GameStateMachine::new_with_seed(BOUNDS, MenuSelection::default(), 4);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &machine.snapshot(), MenuForm::default()))
            .expect("menu renders");

        machine.start().expect("start succeeds");
        terminal
            .draw(|frame| render(frame, &machine.snapshot(), MenuForm::default()))
            .expect("board renders");

        let mut tiny = Terminal::new(TestBackend::new(10, 4)).expect("test terminal");
        tiny.draw(|frame| render(frame, &machine.snapshot(), MenuForm::default()))
            .expect("too-small notice renders");

        let game_over = screen_after(vec![Position { x: 0, y: 0 }], Direction::Up);
        assert!(game_over.contains("GAME OVER"));
        assert!(game_over.contains("Cause: hit wall"));

        let victory = screen_after(
            (0..9).map(|x| Position { x: 8 - x, y: 3 }).collect(),
            Direction::Right,
        );
        assert!(victory.contains("LEVEL COMPLETE!"));
        assert!(victory.contains("You reached length 10!"));
    }

    /// Plays one tick on an Easy board with the given snake and food just
    /// ahead of (9, 3), then returns the drawn screen as text.
    fn screen_after(segments: Vec<Position>, direction: Direction) -> String {
        let bounds = GridSize {
            width: 30,
            height: 25,
        };
        let mut machine = GameStateMachine::new_with_seed(bounds, MenuSelection::default(), 9);
        machine.select_difficulty(Difficulty::Easy);
        machine.start().expect("start succeeds");
        let session = machine.session_mut().expect("session is active");
        session.snake = Snake::from_segments(segments, direction, SnakeColor::Green);
        session.food = FoodSpawner::at(Position { x: 9, y: 3 });
        let state = machine.tick().expect("tick succeeds");
        assert!(matches!(state, AppState::GameOver | AppState::Victory));

        let mut terminal = Terminal::new(TestBackend::new(70, 30)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, &machine.snapshot(), MenuForm::default()))
            .expect("result screen renders");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }
}
