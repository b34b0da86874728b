//! Layered graphics for page-addressed monochrome displays
//!
//! This crate holds everything between an application and a panel driver
//! that does not depend on the panel itself:
//!
//! - Display provider trait (geometry, flush, raw frames, panel controls)
//! - Page-buffer primitives (clear, masked merge, bitmap blit)
//! - Four-slot layer compositor
//! - Line graphics (lines, rectangles, bar graphs, circles, arcs)
//! - Fixed text grid and floating text boxes with a 5x7 font
//! - LED-style numeric overlay
//! - The owning [`DisplayStack`] context that ties them together

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod buffer;
pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod overlay;
pub mod pool;
pub mod stack;
pub mod text;
pub mod traits;

pub use compositor::{Compositor, Layer, LayerOwner, Priority};
pub use config::StackConfig;
pub use error::{GfxError, Result};
pub use geometry::Geometry;
pub use graphics::{Colour, Lines};
pub use overlay::{LedConfig, LedHandle};
pub use stack::{DisplayStack, Led, Text, TextBoxes};
pub use text::{Placement, RefreshMode, TextBoxConfig, TextBoxHandle, WrapMode};
pub use traits::{DisplayError, DisplayProvider};
