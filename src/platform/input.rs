//! Keyboard and mouse input
//!
//! Terminal key handling has no reliable "key up" unless the terminal
//! supports the kitty keyboard protocol. Movement keys therefore open a short
//! hold window on every press or auto-repeat; a release event (when the
//! terminal sends one) closes it immediately and switches hold windows off.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::sim::TickInput;
use crate::ui::UiCommand;

/// Ticks a movement key stays held after a press or repeat, bridging the
/// gap before the OS auto-repeat kicks in
pub const HOLD_TICKS: u8 = 8;

/// What an input event turned out to mean
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft { held: bool },
    MoveRight { held: bool },
    Fire,
    Pause,
    Restart,
    Menu,
    Instructions,
    /// Leave the instructions page
    Back,
    Quit,
    Ui(UiCommand),
    Resize { cols: u16, rows: u16 },
}

/// Translate one terminal event
pub fn map_event(event: &Event) -> Vec<Intent> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse).into_iter().collect(),
        Event::Resize(cols, rows) => vec![Intent::Resize {
            cols: *cols,
            rows: *rows,
        }],
        _ => Vec::new(),
    }
}

fn map_key(key: &KeyEvent) -> Vec<Intent> {
    let held = key.kind != KeyEventKind::Release;
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => vec![Intent::MoveLeft { held }],
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            vec![Intent::MoveRight { held }]
        }
        // Everything else acts on press only
        _ if key.kind != KeyEventKind::Press => Vec::new(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => vec![Intent::Quit],
        KeyCode::Char(' ') => vec![Intent::Fire],
        KeyCode::Esc => vec![Intent::Pause, Intent::Back],
        KeyCode::Char('p') | KeyCode::Char('P') => vec![Intent::Pause],
        KeyCode::Char('r') | KeyCode::Char('R') => vec![Intent::Restart],
        KeyCode::Char('m') | KeyCode::Char('M') => vec![Intent::Menu],
        KeyCode::Char('i') | KeyCode::Char('I') => vec![Intent::Instructions],
        KeyCode::Char('q') | KeyCode::Char('Q') => vec![Intent::Quit],
        KeyCode::Enter => vec![Intent::Ui(UiCommand::Confirm)],
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => vec![Intent::Ui(UiCommand::Up)],
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            vec![Intent::Ui(UiCommand::Down)]
        }
        KeyCode::PageUp => vec![Intent::Ui(UiCommand::Scroll(-5))],
        KeyCode::PageDown => vec![Intent::Ui(UiCommand::Scroll(5))],
        _ => Vec::new(),
    }
}

fn map_mouse(mouse: &MouseEvent) -> Option<Intent> {
    let (col, row) = (mouse.column, mouse.row);
    let command = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => UiCommand::Pointer {
            col,
            row,
            pressed: true,
        },
        MouseEventKind::Moved | MouseEventKind::Drag(_) => UiCommand::Pointer {
            col,
            row,
            pressed: false,
        },
        MouseEventKind::ScrollUp => UiCommand::Scroll(-1),
        MouseEventKind::ScrollDown => UiCommand::Scroll(1),
        _ => return None,
    };
    Some(Intent::Ui(command))
}

/// Accumulates intents between simulation ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left_hold: u8,
    right_hold: u8,
    /// Set once the terminal has shown it reports key releases
    releases_reported: bool,
    /// One-shot intents waiting for the next tick
    pending: TickInput,
    ui: Vec<UiCommand>,
    quit: bool,
    resize: Option<(u16, u16)>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Release && !self.releases_reported {
                log::debug!("Terminal reports key releases");
                self.releases_reported = true;
            }
        }
        for intent in map_event(event) {
            self.apply(intent);
        }
    }

    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::MoveLeft { held } => self.left_hold = if held { HOLD_TICKS } else { 0 },
            Intent::MoveRight { held } => self.right_hold = if held { HOLD_TICKS } else { 0 },
            Intent::Fire => self.pending.fire = true,
            Intent::Pause => self.pending.pause = true,
            Intent::Restart => self.pending.restart = true,
            Intent::Menu => self.pending.menu = true,
            Intent::Instructions => self.pending.instructions = true,
            Intent::Back => self.pending.back = true,
            Intent::Quit => self.quit = true,
            Intent::Ui(command) => self.ui.push(command),
            Intent::Resize { cols, rows } => self.resize = Some((cols, rows)),
        }
    }

    /// Pending tick input for UI actions to merge into
    pub fn pending_mut(&mut self) -> &mut TickInput {
        &mut self.pending
    }

    /// Input for one tick. One-shot intents are consumed; hold windows
    /// count down unless the terminal reports releases.
    pub fn take_tick_input(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.pending);
        input.move_left = self.left_hold > 0;
        input.move_right = self.right_hold > 0;

        if !self.releases_reported {
            self.left_hold = self.left_hold.saturating_sub(1);
            self.right_hold = self.right_hold.saturating_sub(1);
        }
        input
    }

    pub fn drain_ui(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.ui)
    }

    pub fn take_resize(&mut self) -> Option<(u16, u16)> {
        self.resize.take()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }
}
