//! Clickable button lists
//!
//! Buttons are laid out in world units so the same layout works for any
//! terminal size; the viewport converts pointer cells into world points.

use glam::Vec2;

use super::UiAction;
use crate::sim::Rect;

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: &'static str,
    pub action: UiAction,
    pub rect: Rect,
}

/// A vertical stack of buttons with one selected at a time
#[derive(Debug, Clone)]
pub struct ButtonGroup {
    buttons: Vec<Button>,
    selected: usize,
}

impl ButtonGroup {
    /// Stack buttons centered on `center_x`, starting at `top`
    pub fn vertical(
        items: &[(&'static str, UiAction)],
        center_x: f32,
        top: f32,
        size: Vec2,
        gap: f32,
    ) -> Self {
        let buttons = items
            .iter()
            .enumerate()
            .map(|(i, &(label, action))| Button {
                label,
                action,
                rect: Rect::new(
                    center_x - size.x / 2.0,
                    top + i as f32 * (size.y + gap),
                    size.x,
                    size.y,
                ),
            })
            .collect();
        Self {
            buttons,
            selected: 0,
        }
    }

    /// Start Game / Instructions / Quit
    pub fn main_menu(screen_width: f32, screen_height: f32) -> Self {
        Self::vertical(
            &[
                ("Start Game", UiAction::Start),
                ("Instructions", UiAction::Instructions),
                ("Quit", UiAction::Quit),
            ],
            screen_width / 2.0,
            screen_height * 0.45,
            Vec2::new(240.0, 50.0),
            20.0,
        )
    }

    /// Resume / Main Menu
    pub fn pause_menu(screen_width: f32, screen_height: f32) -> Self {
        Self::vertical(
            &[
                ("Resume", UiAction::Resume),
                ("Main Menu", UiAction::MainMenu),
            ],
            screen_width / 2.0,
            screen_height * 0.5,
            Vec2::new(240.0, 50.0),
            20.0,
        )
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn select_next(&mut self) {
        if !self.buttons.is_empty() {
            self.selected = (self.selected + 1) % self.buttons.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.buttons.is_empty() {
            self.selected = (self.selected + self.buttons.len() - 1) % self.buttons.len();
        }
    }

    /// Back to the first button (when a menu is reopened)
    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }

    /// Index of the button under `point`
    pub fn hit(&self, point: Vec2) -> Option<usize> {
        self.buttons.iter().position(|b| b.rect.contains(point))
    }

    /// Pointer moved: hovering a button selects it
    pub fn hover(&mut self, point: Vec2) -> bool {
        match self.hit(point) {
            Some(i) => {
                self.selected = i;
                true
            }
            None => false,
        }
    }

    /// Pointer pressed: the button under it fires
    pub fn click(&mut self, point: Vec2) -> Option<UiAction> {
        let i = self.hit(point)?;
        self.selected = i;
        Some(self.buttons[i].action)
    }

    /// Keyboard confirm on the selected button
    pub fn confirm(&self) -> Option<UiAction> {
        self.buttons.get(self.selected).map(|b| b.action)
    }
}
