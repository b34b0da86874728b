//! Line and shape graphics
//!
//! Drawing happens in the line layer's private buffer; nothing reaches the
//! panel until the stack refreshes.

pub mod lines;

#[cfg(feature = "embedded-graphics")]
mod draw_target;

pub use lines::Lines;

use crate::error::GfxError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pixel colour on a monochrome panel
///
/// Black is ink: it sets bits. White clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Colour {
    #[default]
    Black,
    White,
}

impl Colour {
    /// Whether drawing in this colour sets bits
    pub const fn is_ink(self) -> bool {
        matches!(self, Colour::Black)
    }
}

impl TryFrom<u8> for Colour {
    type Error = GfxError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Colour::Black),
            1 => Ok(Colour::White),
            _ => Err(GfxError::InvalidColour),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_from_raw() {
        assert_eq!(Colour::try_from(0), Ok(Colour::Black));
        assert_eq!(Colour::try_from(1), Ok(Colour::White));
        assert_eq!(Colour::try_from(2), Err(GfxError::InvalidColour));
        assert!(Colour::Black.is_ink());
        assert!(!Colour::White.is_ink());
    }
}
