//! Configuration types and capacity limits

pub mod limits;
pub mod types;

pub use limits::*;
pub use types::StackConfig;
