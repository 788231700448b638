//! Platform layer
//!
//! Everything that depends on the real terminal and wall clock:
//! - Input events (keyboard, mouse, resize)
//! - Frame timing

pub mod input;
pub mod time;

pub use input::{InputState, Intent};
pub use time::FixedTimestep;
