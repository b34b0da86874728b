//! Fixed full-screen text grid
//!
//! One row of cells per display page, as many 6-pixel columns as fit, with
//! the leftover pixels split evenly either side. The grid only tracks cells
//! and the cursor; repainting is driven by the owning view.

use heapless::Vec;

use crate::config::{CELL_WIDTH, MAX_TEXT_CELLS};
use crate::error::{GfxError, Result};
use crate::geometry::Geometry;

use super::{paint_cells, Gap, Placement, RefreshMode, WrapMode};
use super::{BACKSPACE, CARRIAGE_RETURN, DELETE, NEWLINE};

/// Character cells, cursor and modes of the fixed grid
#[derive(Debug, Clone)]
pub struct TextGrid {
    cells: Vec<u8, MAX_TEXT_CELLS>,
    width: u16,
    height: u16,
    left: u16,
    cursor_x: u16,
    cursor_y: u16,
    refresh: RefreshMode,
    wrap: WrapMode,
}

impl TextGrid {
    /// Size a blank grid for `geometry`
    pub fn new(geometry: Geometry, refresh: RefreshMode, wrap: WrapMode) -> Result<Self> {
        let width = geometry.width / CELL_WIDTH;
        let height = geometry.pages;
        if width == 0 || height == 0 {
            return Err(GfxError::Geometry);
        }

        let mut cells = Vec::new();
        cells
            .resize(width as usize * height as usize, 0)
            .map_err(|_| GfxError::Geometry)?;

        Ok(Self {
            cells,
            width,
            height,
            left: (geometry.width - width * CELL_WIDTH) / 2,
            cursor_x: 0,
            cursor_y: 0,
            refresh,
            wrap,
        })
    }

    /// Width in cells
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel column of the first cell
    pub fn left_offset(&self) -> u16 {
        self.left
    }

    /// Cursor as `(column, row)`
    ///
    /// The column may sit one past the right edge when wrap is off, and
    /// the row one past the bottom after a newline on the last row.
    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    /// Move the cursor to a cell on the grid
    pub fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(GfxError::OutOfBounds);
        }
        self.cursor_x = x;
        self.cursor_y = y;
        Ok(())
    }

    pub fn refresh_mode(&self) -> RefreshMode {
        self.refresh
    }

    pub fn set_refresh_mode(&mut self, mode: RefreshMode) {
        self.refresh = mode;
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap
    }

    pub fn set_wrap_mode(&mut self, wrap: WrapMode) {
        self.wrap = wrap;
    }

    /// Character code stored at a cell
    pub fn cell(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Row of cells as stored
    pub fn row(&self, y: u16) -> Option<&[u8]> {
        let width = self.width as usize;
        let start = y as usize * width;
        self.cells.get(start..start + width)
    }

    /// Blank every cell and home the cursor
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    /// Apply one character to the grid
    ///
    /// Newline and carriage return go to column 0 of the next row. The row
    /// stops one past the bottom; further characters are dropped there.
    /// Backspace and delete step left without erasing. Anything else is
    /// stored at the cursor if it is on the grid; with wrap on, filling the
    /// last column moves the cursor to the start of the next row.
    pub fn put(&mut self, c: u8) -> Placement {
        match c {
            NEWLINE | CARRIAGE_RETURN => {
                self.cursor_x = 0;
                if self.cursor_y < self.height {
                    self.cursor_y += 1;
                }
                Placement::Control
            }
            BACKSPACE | DELETE => {
                self.cursor_x = self.cursor_x.saturating_sub(1);
                Placement::Control
            }
            _ if self.cursor_x < self.width && self.cursor_y < self.height => {
                let idx = self.cursor_y as usize * self.width as usize + self.cursor_x as usize;
                self.cells[idx] = c;
                self.cursor_x += 1;
                if self.cursor_x >= self.width && self.wrap.is_on() {
                    self.cursor_x = 0;
                    if self.cursor_y < self.height {
                        self.cursor_y += 1;
                    }
                }
                Placement::Placed
            }
            _ => Placement::Dropped,
        }
    }

    /// Apply characters until one is dropped
    ///
    /// Returns how many were accepted.
    pub fn put_str(&mut self, s: &[u8]) -> usize {
        s.iter().take_while(|&&c| self.put(c).accepted()).count()
    }

    /// Paint every cell into a page buffer shaped like `geometry`
    pub fn render(&self, dest: &mut [u8], geometry: Geometry) -> Result<()> {
        paint_cells(
            &self.cells,
            self.width,
            self.left,
            0,
            Gap::Trailing,
            true,
            dest,
            geometry,
        )?;
        Ok(())
    }
}
