//! ASCII-art sprites with primitive fallback
//!
//! Sprites are plain text files in a sprite directory. Any that are missing or
//! unusable are logged and left as `None`; the renderer then draws a flat
//! colored block for that entity type instead.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::consts::ASTEROID_VARIANTS;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("could not read sprite: {0}")]
    Io(#[from] std::io::Error),
    #[error("sprite has no visible characters")]
    Empty,
}

/// A rectangular block of characters; spaces are transparent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Sprite {
    /// Build a sprite from text art. Ragged lines are padded with spaces.
    pub fn parse(text: &str) -> Result<Self, SpriteError> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end().chars().collect())
            .collect();

        // Drop blank lines at the top and bottom
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        while rows.first().is_some_and(|r| r.is_empty()) {
            rows.remove(0);
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 || rows.iter().flatten().all(|c| c.is_whitespace()) {
            return Err(SpriteError::Empty);
        }
        for row in &mut rows {
            row.resize(width, ' ');
        }

        Ok(Self { rows, width })
    }

    pub fn load(path: &Path) -> Result<Self, SpriteError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Nearest-neighbour sample for cell (`col`, `row`) of a target area
    /// `target_w` x `target_h` cells. `None` means transparent.
    pub fn sample(&self, col: usize, row: usize, target_w: usize, target_h: usize) -> Option<char> {
        if target_w == 0 || target_h == 0 {
            return None;
        }
        let src_x = (col * self.width / target_w).min(self.width - 1);
        let src_y = (row * self.height() / target_h).min(self.height() - 1);
        let c = self.rows[src_y][src_x];
        (c != ' ').then_some(c)
    }
}

/// Every sprite the game can use; absent ones fall back to primitives
#[derive(Debug, Clone, Default)]
pub struct SpriteSet {
    pub player: Option<Sprite>,
    /// Indexed by asteroid variant (modulo the number loaded)
    pub asteroids: Vec<Sprite>,
    pub powerup: Option<Sprite>,
    pub explosion: Option<Sprite>,
    pub background: Option<Sprite>,
}

impl SpriteSet {
    /// Load whatever sprites exist in `dir`
    pub fn load(dir: &Path) -> Self {
        let asteroids = (1..=ASTEROID_VARIANTS)
            .filter_map(|i| load_optional(dir, &format!("asteroid{i}.txt")))
            .collect::<Vec<_>>();
        if asteroids.is_empty() {
            log::warn!("No asteroid sprites found, using fallback shapes");
        }

        let set = Self {
            player: load_optional(dir, "player.txt"),
            asteroids,
            powerup: load_optional(dir, "powerup.txt"),
            explosion: load_optional(dir, "explosion.txt"),
            background: load_optional(dir, "background.txt"),
        };
        log::info!(
            "Sprites from {}: player={}, asteroids={}, powerup={}, explosion={}, background={}",
            dir.display(),
            set.player.is_some(),
            set.asteroids.len(),
            set.powerup.is_some(),
            set.explosion.is_some(),
            set.background.is_some()
        );
        set
    }

    pub fn asteroid(&self, variant: u8) -> Option<&Sprite> {
        if self.asteroids.is_empty() {
            None
        } else {
            self.asteroids.get(variant as usize % self.asteroids.len())
        }
    }
}

fn load_optional(dir: &Path, name: &str) -> Option<Sprite> {
    let path = dir.join(name);
    match Sprite::load(&path) {
        Ok(sprite) => Some(sprite),
        Err(e) => {
            log::warn!("Sprite {} unavailable ({}), using fallback", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_ragged_lines() {
        let sprite = Sprite::parse("\n /\\\n/  \\\n\n").unwrap();
        assert_eq!(sprite.height(), 2);
        assert_eq!(sprite.width(), 4);
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(matches!(Sprite::parse("   \n\n"), Err(SpriteError::Empty)));
        assert!(matches!(Sprite::parse(""), Err(SpriteError::Empty)));
    }

    #[test]
    fn test_sample_scales() {
        let sprite = Sprite::parse("ab\ncd").unwrap();
        // Doubling: each source char covers 2x2 target cells
        assert_eq!(sprite.sample(0, 0, 4, 4), Some('a'));
        assert_eq!(sprite.sample(3, 0, 4, 4), Some('b'));
        assert_eq!(sprite.sample(1, 3, 4, 4), Some('c'));
        assert_eq!(sprite.sample(3, 3, 4, 4), Some('d'));
        // Shrinking still lands inside the source
        assert_eq!(sprite.sample(0, 0, 1, 1), Some('a'));
    }

    #[test]
    fn test_sample_transparent() {
        let sprite = Sprite::parse("a \n b").unwrap();
        assert_eq!(sprite.sample(1, 0, 2, 2), None);
        assert_eq!(sprite.sample(0, 0, 0, 2), None);
    }

    #[test]
    fn test_missing_directory_gives_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = SpriteSet::load(&dir.path().join("missing"));
        assert!(set.player.is_none());
        assert!(set.asteroid(2).is_none());
    }

    #[test]
    fn test_loads_available_sprites() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("player.txt"), " A \n/#\\").unwrap();
        fs::write(dir.path().join("asteroid2.txt"), "(@)").unwrap();
        fs::write(dir.path().join("powerup.txt"), "   ").unwrap();

        let set = SpriteSet::load(dir.path());
        assert!(set.player.is_some());
        assert_eq!(set.asteroids.len(), 1);
        // Any variant maps onto the sprites that did load
        assert!(set.asteroid(3).is_some());
        // Present but blank: falls back
        assert!(set.powerup.is_none());
    }
}
