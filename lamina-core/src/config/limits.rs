//! Compile-time capacity limits
//!
//! Every buffer and pool in the stack is fixed-capacity; these constants
//! size them.

/// Number of compositor layer slots (Background, Layer1, Layer2, Foreground)
pub const LAYER_COUNT: usize = 4;

/// Largest supported hardware framebuffer in bytes (128x64 panel)
pub const MAX_FRAMEBUFFER_LEN: usize = 1024;

/// Pixel rows per page byte
pub const PAGE_ROWS: u16 = 8;

/// Horizontal advance of one text cell: 5 glyph columns plus 1 blank
pub const CELL_WIDTH: u16 = 6;

/// Vertical advance of one text cell, one page
pub const CELL_HEIGHT: u16 = 8;

/// Glyph columns stored per character in the font table
pub const GLYPH_WIDTH: usize = 5;

/// Largest character grid any text surface can hold
pub const MAX_TEXT_CELLS: usize = MAX_FRAMEBUFFER_LEN / CELL_WIDTH as usize;

/// Concurrent floating text boxes
pub const FTB_COUNT: usize = 4;

/// Concurrent LED overlay sessions
pub const MAX_LED_SESSIONS: usize = 1;

/// Digits per LED overlay session
pub const MAX_DIGITS: usize = 3;
