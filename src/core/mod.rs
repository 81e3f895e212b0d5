//! Core game module - states, events, config and fundamental helpers.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod events;
mod plugin;
mod states;
mod tween;

pub use config::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use tween::*;
