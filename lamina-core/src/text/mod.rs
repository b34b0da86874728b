//! Character rendering
//!
//! Two text surfaces share one compositor layer:
//!
//! - [`TextGrid`]: a full-screen grid of 6x8 cells, page-aligned and
//!   centred horizontally
//! - [`FloatingText`]: up to [`FTB_COUNT`](crate::config::FTB_COUNT) boxes
//!   at arbitrary pixel positions, each with its own cursor
//!
//! Both paint cells with the page-shifting blit, so a box whose top edge
//! is not on a page boundary splits every glyph across two pages.

pub mod font;
pub mod ftb;
pub mod grid;

pub use ftb::{FloatingText, TextBox, TextBoxConfig, TextBoxHandle};
pub use grid::TextGrid;

use crate::buffer::{blit, Bitmap, BufferError};
use crate::config::{CELL_HEIGHT, CELL_WIDTH, GLYPH_WIDTH};
use crate::geometry::Geometry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Carriage return and line feed both start a new line
pub const NEWLINE: u8 = b'\n';
/// Carriage return
pub const CARRIAGE_RETURN: u8 = b'\r';
/// Backspace
pub const BACKSPACE: u8 = 0x08;
/// Delete, treated as backspace
pub const DELETE: u8 = 0x7F;

/// When the fixed text grid repaints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RefreshMode {
    /// After every accepted character
    #[default]
    OnTextChange,
    /// Only on an explicit refresh
    OnDemand,
}

/// Whether the cursor wraps to the next row at the right edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WrapMode {
    Off,
    #[default]
    On,
}

impl WrapMode {
    pub const fn is_on(self) -> bool {
        matches!(self, WrapMode::On)
    }
}

/// Font scale for floating text boxes
///
/// Recorded per box; glyphs currently always render at 1:1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Scale {
    #[default]
    X1,
    X1_5,
    X2,
}

/// Outcome of writing one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Placement {
    /// Stored in a cell
    Placed,
    /// Newline or backspace, cursor moved
    Control,
    /// Off the grid, nothing stored
    Dropped,
}

impl Placement {
    /// Whether the character was consumed
    pub const fn accepted(self) -> bool {
        !matches!(self, Placement::Dropped)
    }
}

/// Where the blank separator column sits within a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Gap {
    /// Five glyph columns, then the gap
    Trailing,
    /// The gap, then five glyph columns
    Leading,
}

/// The six page columns of one character cell
pub(crate) fn cell_columns(code: u8, gap: Gap) -> [u8; CELL_WIDTH as usize] {
    let glyph = font::glyph(code);
    let mut cell = [0u8; CELL_WIDTH as usize];
    let start = match gap {
        Gap::Trailing => 0,
        Gap::Leading => 1,
    };
    for (dst, &col) in cell[start..start + GLYPH_WIDTH].iter_mut().zip(glyph) {
        *dst = col & 0x7F;
    }
    cell
}

/// Paint a row-major character grid into a page buffer
///
/// The grid's top-left pixel lands at `(at_x, at_y)`. Opaque cells wipe
/// the full 6x8 area under them; transparent cells only add ink. Columns
/// past the right edge and rows past the bottom are clipped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn paint_cells(
    cells: &[u8],
    columns: u16,
    at_x: u16,
    at_y: u16,
    gap: Gap,
    opaque: bool,
    dest: &mut [u8],
    geometry: Geometry,
) -> Result<(), BufferError> {
    if columns == 0 {
        return Err(BufferError::Empty);
    }

    for (row, line) in cells.chunks(columns as usize).enumerate() {
        let y = at_y.saturating_add((row as u16).saturating_mul(CELL_HEIGHT));
        if y >= geometry.height {
            break;
        }
        for (col, &code) in line.iter().enumerate() {
            let x = at_x.saturating_add((col as u16).saturating_mul(CELL_WIDTH));
            if x >= geometry.width {
                break;
            }
            let cell = cell_columns(code, gap);
            blit(
                Bitmap::new(&cell, CELL_WIDTH, 1),
                opaque,
                x,
                y,
                dest,
                geometry.width,
                geometry.pages,
            )?;
        }
    }
    Ok(())
}
