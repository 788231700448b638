//! Terminal rendering module
//!
//! Reads [`snapshot::FrameSnapshot`]s only; never mutates game state.

pub mod snapshot;
pub mod sprites;
pub mod terminal;

pub use snapshot::{EntityKind, EntitySnapshot, FrameSnapshot, Hud};
pub use sprites::{Sprite, SpriteError, SpriteSet};
pub use terminal::{GameGrid, TerminalRenderer, Viewport};
