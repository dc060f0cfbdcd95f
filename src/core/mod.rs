//! Core game module - states, events, data loading and timed sequences.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod plugin;
mod sequence;
mod states;

pub use data::{load_or_default, parse_ron, read_ron};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::{CorePlugin, GameRng};
pub use sequence::{FadePhase, FadeSignal, ScreenFade};
pub use states::*;
