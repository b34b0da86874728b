//! Hardware abstraction traits
//!
//! These traits define the interface between the graphics stack and
//! panel-specific driver implementations.

pub mod display;

pub use display::{DisplayError, DisplayProvider, ADJUST_RANGE};
