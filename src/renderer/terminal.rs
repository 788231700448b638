//! Terminal presentation with crossterm
//!
//! The world (800x600 by default) is scaled onto whatever grid of character
//! cells the terminal has. Row 0 is the HUD; the playfield fills the rest.
//! Drawing goes into an off-screen [`GameGrid`] first and is then written to
//! the terminal in one pass.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use glam::Vec2;

use super::snapshot::{EntityKind, EntitySnapshot, FrameSnapshot, Hud};
use super::sprites::{Sprite, SpriteSet};
use crate::sim::{ExplosionKind, GamePhase, Rect};
use crate::ui::{ButtonGroup, InstructionsView, Ui, instructions_rows};

/// Rows reserved above the playfield
pub const HUD_ROWS: u16 = 1;

/// Maps world units onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub world: Vec2,
}

/// A block of cells, `col..col + width` by `row..row + height`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, world_width: f32, world_height: f32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(HUD_ROWS + 1),
            world: Vec2::new(world_width.max(1.0), world_height.max(1.0)),
        }
    }

    pub fn field_rows(&self) -> u16 {
        self.rows - HUD_ROWS
    }

    /// Cells per world unit on each axis
    fn scale(&self) -> Vec2 {
        Vec2::new(
            self.cols as f32 / self.world.x,
            self.field_rows() as f32 / self.world.y,
        )
    }

    /// World point at the center of a terminal cell
    pub fn cell_to_world(&self, col: u16, row: u16) -> Vec2 {
        let field_row = row.saturating_sub(HUD_ROWS) as f32;
        Vec2::new(col as f32 + 0.5, field_row + 0.5) / self.scale()
    }

    /// Terminal cell containing a world point (clamped to the playfield)
    pub fn world_to_cell(&self, point: Vec2) -> (u16, u16) {
        let cell = (point * self.scale()).floor();
        let col = cell.x.clamp(0.0, (self.cols - 1) as f32) as u16;
        let row = cell.y.clamp(0.0, (self.field_rows() - 1) as f32) as u16;
        (col, row + HUD_ROWS)
    }

    /// Cells covered by a world rectangle, clipped to the playfield.
    /// Anything with area covers at least one cell.
    pub fn rect_to_cells(&self, rect: &Rect) -> Option<CellRect> {
        if rect.is_empty() {
            return None;
        }
        let scale = self.scale();
        let (c0, c1) = span(rect.left() * scale.x, rect.right() * scale.x);
        let (r0, r1) = span(rect.top() * scale.y, rect.bottom() * scale.y);

        let c0 = c0.max(0);
        let r0 = r0.max(0);
        let c1 = c1.min(self.cols as i32);
        let r1 = r1.min(self.field_rows() as i32);
        if c0 >= c1 || r0 >= r1 {
            return None;
        }

        Some(CellRect {
            col: c0 as u16,
            row: r0 as u16 + HUD_ROWS,
            width: (c1 - c0) as u16,
            height: (r1 - r0) as u16,
        })
    }
}

/// Cell range `[start, end)` for a scaled interval, never empty
fn span(start: f32, end: f32) -> (i32, i32) {
    let s = start.floor() as i32;
    let e = (end.ceil() as i32).max(s + 1);
    (s, e)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Off-screen character buffer
#[derive(Debug, Clone)]
pub struct GameGrid {
    cells: Vec<Cell>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![BLANK; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, ch: char, color: Color) {
        if y < self.height && x < self.width {
            self.cells[y as usize * self.width as usize + x as usize] = Cell { ch, color };
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if y < self.height && x < self.width {
            Some(self.cells[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            let Ok(offset) = u16::try_from(i) else { break };
            self.set_char(x.saturating_add(offset), y, ch, color);
        }
    }

    /// Write text horizontally centered on row `y`
    pub fn put_centered(&mut self, y: u16, text: &str, color: Color) {
        let len = text.chars().count() as u16;
        self.put_str(self.width.saturating_sub(len) / 2, y, text, color);
    }

    pub fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    /// Plain text of one row (for tests and debug logging)
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    /// Write every row, batching runs of the same color
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for y in 0..self.height {
            queue!(out, MoveTo(0, y))?;
            let start = y as usize * self.width as usize;
            let row = &self.cells[start..start + self.width as usize];

            let mut run = String::with_capacity(row.len());
            let mut run_color = None;
            for cell in row {
                if run_color != Some(cell.color) {
                    if let Some(color) = run_color {
                        queue!(out, SetForegroundColor(color), Print(&run))?;
                        run.clear();
                    }
                    run_color = Some(cell.color);
                }
                run.push(cell.ch);
            }
            if let Some(color) = run_color {
                queue!(out, SetForegroundColor(color), Print(&run))?;
            }
        }
        queue!(out, ResetColor)?;
        out.flush()
    }
}

const PLAYER_COLOR: Color = Color::Green;
const ASTEROID_COLOR: Color = Color::Blue;
const BULLET_COLOR: Color = Color::Red;
const POWERUP_COLOR: Color = Color::Yellow;
const BACKGROUND_COLOR: Color = Color::DarkGrey;
const TEXT_COLOR: Color = Color::White;
const HIGHLIGHT_COLOR: Color = Color::Yellow;

pub struct TerminalRenderer {
    grid: GameGrid,
    sprites: SpriteSet,
    viewport: Viewport,
}

impl TerminalRenderer {
    pub fn new(cols: u16, rows: u16, world: Vec2, sprites: SpriteSet) -> Self {
        let viewport = Viewport::new(cols, rows, world.x, world.y);
        Self {
            grid: GameGrid::new(viewport.cols, viewport.rows),
            sprites,
            viewport,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = Viewport::new(cols, rows, self.viewport.world.x, self.viewport.world.y);
        self.grid = GameGrid::new(self.viewport.cols, self.viewport.rows);
        log::debug!("Terminal resized to {}x{}", cols, rows);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn grid(&self) -> &GameGrid {
        &self.grid
    }

    /// Compose a full frame into the off-screen grid
    pub fn draw(&mut self, frame: &FrameSnapshot, ui: &Ui) {
        self.grid.clear();
        match frame.phase {
            GamePhase::Menu => self.draw_menu(&frame.hud, &ui.main_menu),
            GamePhase::Instructions => self.draw_instructions(&ui.instructions),
            GamePhase::Playing => self.draw_field(frame),
            GamePhase::Paused => {
                self.draw_field(frame);
                self.draw_pause(&ui.pause_menu);
            }
            GamePhase::GameOver => {
                self.draw_field(frame);
                self.draw_game_over(&frame.hud);
            }
        }
    }

    pub fn present<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.grid.render(out)
    }

    fn draw_field(&mut self, frame: &FrameSnapshot) {
        if let Some(background) = &self.sprites.background {
            let area = CellRect {
                col: 0,
                row: HUD_ROWS,
                width: self.viewport.cols,
                height: self.viewport.field_rows(),
            };
            blit(&mut self.grid, background, area, BACKGROUND_COLOR);
        }

        for entity in &frame.entities {
            self.draw_entity(entity);
        }
        self.draw_hud(&frame.hud);
    }

    fn draw_entity(&mut self, entity: &EntitySnapshot) {
        let Some(area) = self.viewport.rect_to_cells(&entity.rect) else {
            return;
        };

        let (sprite, fallback, color) = match entity.kind {
            EntityKind::Player => (self.sprites.player.as_ref(), '#', PLAYER_COLOR),
            EntityKind::Bullet => (None, '|', BULLET_COLOR),
            EntityKind::Asteroid(variant) => (self.sprites.asteroid(variant), 'O', ASTEROID_COLOR),
            EntityKind::Powerup => (self.sprites.powerup.as_ref(), '$', POWERUP_COLOR),
            EntityKind::Explosion(kind) => (
                self.sprites.explosion.as_ref(),
                explosion_char(entity.progress),
                explosion_color(kind, entity.progress),
            ),
        };

        match sprite {
            Some(sprite) => blit(&mut self.grid, sprite, area, color),
            None => fill(&mut self.grid, area, fallback, color),
        }
    }

    fn draw_hud(&mut self, hud: &Hud) {
        let left = format!(
            "Score: {}  Lives: {}  Level: {}",
            hud.score, hud.lives, hud.level
        );
        self.grid.put_str(0, 0, &left, TEXT_COLOR);

        let right = format!("High: {} (Lv {})", hud.high_score, hud.high_level);
        let len = right.chars().count() as u16;
        let x = self.grid.width.saturating_sub(len);
        // Skip the right half when the terminal is too narrow for both
        if x as usize > left.chars().count() + 1 {
            self.grid.put_str(x, 0, &right, BACKGROUND_COLOR);
        }
    }

    fn draw_buttons(&mut self, group: &ButtonGroup) {
        for (i, button) in group.buttons().iter().enumerate() {
            let Some(area) = self.viewport.rect_to_cells(&button.rect) else {
                continue;
            };
            let row = area.row + area.height / 2;
            let (text, color) = if i == group.selected() {
                (format!("> {} <", button.label), HIGHLIGHT_COLOR)
            } else {
                (format!("[ {} ]", button.label), TEXT_COLOR)
            };
            self.grid.put_centered(row, &text, color);
        }
    }

    fn draw_menu(&mut self, hud: &Hud, menu: &ButtonGroup) {
        let title_row = self.viewport.rows / 5;
        self.grid
            .put_centered(title_row, "A S T E R O I D   S H O O T E R", HIGHLIGHT_COLOR);
        self.grid.put_centered(
            title_row + 2,
            &format!("High Score: {}   Best Level: {}", hud.high_score, hud.high_level),
            TEXT_COLOR,
        );
        self.draw_buttons(menu);
        self.grid.put_centered(
            self.viewport.rows.saturating_sub(1),
            "Up/Down to choose, Enter or click to select",
            BACKGROUND_COLOR,
        );
    }

    fn draw_instructions(&mut self, view: &InstructionsView) {
        self.grid.put_centered(1, "HOW TO PLAY", HIGHLIGHT_COLOR);
        let rows = instructions_rows(&self.viewport);
        for (i, line) in view.visible(rows).iter().enumerate() {
            self.grid.put_str(2, 3 + i as u16, line, TEXT_COLOR);
        }
        self.grid.put_centered(
            self.viewport.rows.saturating_sub(1),
            "Up/Down or wheel to scroll, Esc or Enter to go back",
            BACKGROUND_COLOR,
        );
    }

    fn draw_pause(&mut self, menu: &ButtonGroup) {
        let mid = self.viewport.rows / 2;
        self.grid
            .put_centered(mid.saturating_sub(4), "PAUSED", HIGHLIGHT_COLOR);
        self.draw_buttons(menu);
    }

    fn draw_game_over(&mut self, hud: &Hud) {
        let mid = self.viewport.rows / 2;
        let lines = [
            (mid.saturating_sub(4), "GAME OVER".to_string(), Color::Red),
            (mid.saturating_sub(2), format!("Final Score: {}", hud.score), TEXT_COLOR),
            (mid.saturating_sub(1), format!("Level Reached: {}", hud.level), TEXT_COLOR),
            (mid + 1, format!("High Score: {}", hud.high_score), HIGHLIGHT_COLOR),
            (mid + 2, format!("Best Level: {}", hud.high_level), HIGHLIGHT_COLOR),
            (
                mid + 4,
                "Press 'R' to restart, 'M' for the main menu".to_string(),
                TEXT_COLOR,
            ),
        ];
        for (row, text, color) in lines {
            self.grid.put_centered(row, &text, color);
        }
        if hud.new_record {
            self.grid.put_centered(mid + 3, "New record!", Color::Green);
        }
    }
}

fn fill(grid: &mut GameGrid, area: CellRect, ch: char, color: Color) {
    for row in area.row..area.row.saturating_add(area.height) {
        for col in area.col..area.col.saturating_add(area.width) {
            grid.set_char(col, row, ch, color);
        }
    }
}

fn blit(grid: &mut GameGrid, sprite: &Sprite, area: CellRect, color: Color) {
    let (w, h) = (area.width as usize, area.height as usize);
    for dy in 0..h {
        for dx in 0..w {
            if let Some(ch) = sprite.sample(dx, dy, w, h) {
                grid.set_char(area.col + dx as u16, area.row + dy as u16, ch, color);
            }
        }
    }
}

fn explosion_char(progress: f32) -> char {
    match progress {
        p if p < 0.33 => '*',
        p if p < 0.66 => '+',
        _ => '.',
    }
}

fn explosion_color(kind: ExplosionKind, progress: f32) -> Color {
    match (kind, progress < 0.5) {
        (ExplosionKind::Player, true) => Color::Red,
        (ExplosionKind::Player, false) => Color::DarkRed,
        (ExplosionKind::Asteroid, true) => Color::Yellow,
        (ExplosionKind::Asteroid, false) => Color::DarkYellow,
    }
}
