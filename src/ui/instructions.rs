//! How-to-play page

pub const INSTRUCTIONS: &[&str] = &[
    "Asteroids are falling. Shoot them before they reach you.",
    "",
    "CONTROLS",
    "  Left / A        move left",
    "  Right / D       move right",
    "  Space           fire",
    "  Esc / P         pause",
    "  R               restart after game over",
    "  M               back to the main menu",
    "  Q               quit",
    "",
    "SCORE IS AMMO",
    "  You start with 10 points. Every shot costs 1 point.",
    "  A hit refunds the shot and earns 1 more point.",
    "  A miss is gone for good.",
    "  If your last shot spends your score down to zero, the game ends.",
    "",
    "LIVES",
    "  You have 3 lives. Each asteroid that hits your ship costs one.",
    "",
    "LEVELS",
    "  Reaching score thresholds raises the level.",
    "  Asteroids fall faster and more often, and your ship grows.",
    "  Each level drops a powerup. Catch it for bonus points.",
    "",
    "HIGH SCORES",
    "  Your best score and best level are kept between games.",
];

/// Scrollable view over [`INSTRUCTIONS`]
#[derive(Debug, Clone, Default)]
pub struct InstructionsView {
    offset: usize,
}

impl InstructionsView {
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Lines visible in a window `rows` tall
    pub fn visible(&self, rows: usize) -> &'static [&'static str] {
        let start = self.offset.min(INSTRUCTIONS.len());
        let end = (start + rows).min(INSTRUCTIONS.len());
        &INSTRUCTIONS[start..end]
    }

    /// Scroll by `delta` lines, never past either end
    pub fn scroll_by(&mut self, delta: i32, rows: usize) {
        let max_offset = INSTRUCTIONS.len().saturating_sub(rows);
        let next = self.offset as i64 + delta as i64;
        self.offset = next.clamp(0, max_offset as i64) as usize;
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
