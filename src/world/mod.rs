//! World module - playfield extents, bounds checks and the camera.

mod playfield;
mod plugin;

pub use playfield::*;
pub use plugin::WorldPlugin;
