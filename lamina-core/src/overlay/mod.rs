//! Large numeric readout layered over the rest of the screen

pub mod glyphs;
pub mod led;

pub use led::{decompose, LedConfig, LedHandle, LedOverlay, LedSession};
