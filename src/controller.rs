use crate::app::{AppState, GameStateMachine};
use crate::config::MAX_NAME_LEN;
use crate::error::GameError;
use crate::input::{Direction, GameInput};

/// Whether the host loop should keep running.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Menu rows, top to bottom.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum MenuField {
    #[default]
    Name,
    Color,
    Difficulty,
    Theme,
    Start,
}

impl MenuField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Color,
        Self::Difficulty,
        Self::Theme,
        Self::Start,
    ];

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Focus state of the menu screen. The edited values live in the state
/// machine's selection.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct MenuForm {
    pub focus: MenuField,
}

/// Routes abstract inputs to state machine intents for the current screen.
#[derive(Debug, Default)]
pub struct Controller {
    form: MenuForm,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn form(&self) -> MenuForm {
        self.form
    }

    /// Applies one input.
    pub fn handle(
        &mut self,
        machine: &mut GameStateMachine,
        input: GameInput,
    ) -> Result<Flow, GameError> {
        if input == GameInput::Quit {
            return Ok(Flow::Quit);
        }

        match machine.state() {
            AppState::Menu => self.handle_menu(machine, input),
            AppState::Playing => Ok(handle_playing(machine, input)),
            AppState::GameOver | AppState::Victory => handle_result(machine, input),
        }
    }

    fn handle_menu(
        &mut self,
        machine: &mut GameStateMachine,
        input: GameInput,
    ) -> Result<Flow, GameError> {
        let editing_name = self.form.focus == MenuField::Name;

        match input {
            GameInput::Direction(Direction::Up) | GameInput::PreviousField => {
                self.form.focus = self.form.focus.previous();
            }
            GameInput::Direction(Direction::Down) | GameInput::NextField => {
                self.form.focus = self.form.focus.next();
            }
            GameInput::Direction(Direction::Left) => self.cycle_focused(machine, false),
            GameInput::Direction(Direction::Right) => self.cycle_focused(machine, true),
            GameInput::Char(c) if editing_name => {
                let name = &machine.selection().name;
                if name.chars().count() < MAX_NAME_LEN {
                    let mut edited = name.clone();
                    edited.push(c);
                    machine.set_name(&edited);
                }
            }
            GameInput::Backspace if editing_name => {
                let mut edited = machine.selection().name.clone();
                let _ = edited.pop();
                machine.set_name(&edited);
            }
            GameInput::Char('q' | 'Q') | GameInput::Back => return Ok(Flow::Quit),
            GameInput::Char(' ') => self.cycle_focused(machine, true),
            GameInput::Confirm => {
                if self.form.focus == MenuField::Theme {
                    machine.toggle_theme();
                } else {
                    machine.start()?;
                }
            }
            _ => {}
        }

        Ok(Flow::Continue)
    }

    fn cycle_focused(&self, machine: &mut GameStateMachine, forward: bool) {
        let selection = machine.selection();
        match self.form.focus {
            MenuField::Color => {
                let color = selection.color.cycled(forward);
                machine.select_color(color);
            }
            MenuField::Difficulty => {
                let difficulty = selection.difficulty.cycled(forward);
                machine.select_difficulty(difficulty);
            }
            MenuField::Theme => machine.toggle_theme(),
            MenuField::Name | MenuField::Start => {}
        }
    }
}

fn handle_playing(machine: &mut GameStateMachine, input: GameInput) -> Flow {
    match input {
        GameInput::Direction(direction) => machine.queue_turn(direction),
        GameInput::Char('q' | 'Q') | GameInput::Back => return Flow::Quit,
        GameInput::Char(c) => {
            if let Some(direction) = Direction::from_wasd(c) {
                machine.queue_turn(direction);
            }
        }
        _ => {}
    }

    Flow::Continue
}

fn handle_result(machine: &mut GameStateMachine, input: GameInput) -> Result<Flow, GameError> {
    match input {
        GameInput::Confirm | GameInput::Char('r' | 'R') => machine.replay()?,
        GameInput::Back | GameInput::Char('m' | 'M') => machine.menu(),
        GameInput::Char('q' | 'Q') => return Ok(Flow::Quit),
        _ => {}
    }

    Ok(Flow::Continue)
}
