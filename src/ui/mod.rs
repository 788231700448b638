//! Menus and screen navigation
//!
//! The UI never touches game state. It turns navigation commands into
//! [`UiAction`]s, which become one-shot [`TickInput`] intents for the
//! simulation (or a request to quit the program).

pub mod instructions;
pub mod menu;

pub use instructions::{INSTRUCTIONS, InstructionsView};
pub use menu::{Button, ButtonGroup};

use crate::renderer::terminal::Viewport;
use crate::sim::{GamePhase, TickInput};

/// What a button or key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Start,
    Instructions,
    Quit,
    Resume,
    MainMenu,
    Back,
    Restart,
}

impl UiAction {
    /// Merge into pending tick input. Returns false for [`UiAction::Quit`],
    /// which the program loop handles itself.
    pub fn apply(self, input: &mut TickInput) -> bool {
        match self {
            UiAction::Start => input.start = true,
            UiAction::Instructions => input.instructions = true,
            UiAction::Resume => input.pause = true,
            UiAction::MainMenu => input.menu = true,
            UiAction::Back => input.back = true,
            UiAction::Restart => input.restart = true,
            UiAction::Quit => return false,
        }
        true
    }
}

/// Navigation input, already separated from gameplay keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Up,
    Down,
    Confirm,
    /// Wheel lines, positive is down
    Scroll(i32),
    /// Pointer at a terminal cell, `pressed` for a click
    Pointer { col: u16, row: u16, pressed: bool },
}

/// Rows available to the instructions text on a terminal of this size
pub fn instructions_rows(viewport: &Viewport) -> usize {
    (viewport.rows as usize).saturating_sub(6).max(1)
}

#[derive(Debug, Clone)]
pub struct Ui {
    pub main_menu: ButtonGroup,
    pub pause_menu: ButtonGroup,
    pub instructions: InstructionsView,
    last_phase: Option<GamePhase>,
}

impl Ui {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            main_menu: ButtonGroup::main_menu(screen_width, screen_height),
            pause_menu: ButtonGroup::pause_menu(screen_width, screen_height),
            instructions: InstructionsView::default(),
            last_phase: None,
        }
    }

    /// Reset menu state when a screen is (re)entered
    pub fn sync(&mut self, phase: GamePhase) {
        if self.last_phase == Some(phase) {
            return;
        }
        match phase {
            GamePhase::Menu => self.main_menu.reset_selection(),
            GamePhase::Paused => self.pause_menu.reset_selection(),
            GamePhase::Instructions => self.instructions.reset(),
            GamePhase::Playing | GamePhase::GameOver => {}
        }
        self.last_phase = Some(phase);
    }

    pub fn handle(
        &mut self,
        command: UiCommand,
        phase: GamePhase,
        viewport: &Viewport,
    ) -> Option<UiAction> {
        self.sync(phase);
        match phase {
            GamePhase::Menu => Self::navigate(&mut self.main_menu, command, viewport),
            GamePhase::Paused => Self::navigate(&mut self.pause_menu, command, viewport),
            GamePhase::Instructions => {
                let rows = instructions_rows(viewport);
                match command {
                    UiCommand::Up => self.instructions.scroll_by(-1, rows),
                    UiCommand::Down => self.instructions.scroll_by(1, rows),
                    UiCommand::Scroll(lines) => self.instructions.scroll_by(lines, rows),
                    UiCommand::Confirm => return Some(UiAction::Back),
                    UiCommand::Pointer { pressed: true, .. } => return Some(UiAction::Back),
                    UiCommand::Pointer { .. } => {}
                }
                None
            }
            GamePhase::GameOver => match command {
                UiCommand::Confirm => Some(UiAction::Restart),
                _ => None,
            },
            GamePhase::Playing => None,
        }
    }

    fn navigate(
        group: &mut ButtonGroup,
        command: UiCommand,
        viewport: &Viewport,
    ) -> Option<UiAction> {
        match command {
            UiCommand::Up => {
                group.select_prev();
                None
            }
            UiCommand::Down => {
                group.select_next();
                None
            }
            UiCommand::Scroll(_) => None,
            UiCommand::Confirm => group.confirm(),
            UiCommand::Pointer { col, row, pressed } => {
                let point = viewport.cell_to_world(col, row);
                if pressed {
                    group.click(point)
                } else {
                    group.hover(point);
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(80, 31, 800.0, 600.0)
    }

    #[test]
    fn test_menu_keyboard() {
        let mut ui = Ui::new(800.0, 600.0);
        let vp = viewport();
        assert_eq!(
            ui.handle(UiCommand::Confirm, GamePhase::Menu, &vp),
            Some(UiAction::Start)
        );
        ui.handle(UiCommand::Down, GamePhase::Menu, &vp);
        ui.handle(UiCommand::Down, GamePhase::Menu, &vp);
        assert_eq!(
            ui.handle(UiCommand::Confirm, GamePhase::Menu, &vp),
            Some(UiAction::Quit)
        );
    }

    #[test]
    fn test_menu_click_through_viewport() {
        let mut ui = Ui::new(800.0, 600.0);
        let vp = viewport();
        let target = ui.main_menu.buttons()[1].rect.center();
        let (col, row) = vp.world_to_cell(target);
        assert_eq!(
            ui.handle(
                UiCommand::Pointer {
                    col,
                    row,
                    pressed: true
                },
                GamePhase::Menu,
                &vp
            ),
            Some(UiAction::Instructions)
        );
    }

    #[test]
    fn test_pause_menu_resets_on_reentry() {
        let mut ui = Ui::new(800.0, 600.0);
        let vp = viewport();
        ui.handle(UiCommand::Down, GamePhase::Paused, &vp);
        assert_eq!(ui.pause_menu.selected(), 1);

        ui.sync(GamePhase::Playing);
        assert_eq!(
            ui.handle(UiCommand::Confirm, GamePhase::Paused, &vp),
            Some(UiAction::Resume)
        );
    }

    #[test]
    fn test_instructions_scroll_and_back() {
        let mut ui = Ui::new(800.0, 600.0);
        let vp = Viewport::new(80, 12, 800.0, 600.0);
        assert_eq!(ui.handle(UiCommand::Down, GamePhase::Instructions, &vp), None);
        assert_eq!(ui.instructions.offset(), 1);
        ui.handle(UiCommand::Scroll(-5), GamePhase::Instructions, &vp);
        assert_eq!(ui.instructions.offset(), 0);
        assert_eq!(
            ui.handle(UiCommand::Confirm, GamePhase::Instructions, &vp),
            Some(UiAction::Back)
        );
    }

    #[test]
    fn test_playing_ignores_navigation() {
        let mut ui = Ui::new(800.0, 600.0);
        assert_eq!(
            ui.handle(UiCommand::Confirm, GamePhase::Playing, &viewport()),
            None
        );
    }

    #[test]
    fn test_actions_become_intents() {
        let mut input = TickInput::default();
        assert!(UiAction::Start.apply(&mut input));
        assert!(UiAction::Resume.apply(&mut input));
        assert!(input.start && input.pause);
        assert!(!UiAction::Quit.apply(&mut input));
    }
}
