//! Display providers and shared-state helpers for lamina
//!
//! This crate provides:
//! - `RamDisplay`, a RAM-backed `DisplayProvider` for host simulation and
//!   tests
//! - `Shared`, a critical-section cell for driving one stack from both a
//!   main loop and an interrupt or timer context
//!
//! # Architecture
//!
//! Panel drivers implement `lamina_core::DisplayProvider` with their
//! transport-specific code. The stack only sees the trait, so a board can
//! swap a real panel for `RamDisplay` without touching application code.

#![no_std]

pub mod backend;
pub mod shared;

// Re-export key types
pub use backend::{PanelState, RamDisplay};
pub use shared::Shared;
