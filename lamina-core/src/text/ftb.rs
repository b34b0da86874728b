//! Floating text boxes
//!
//! Independently placed character boxes on the text layer. A box's top-left
//! corner is any pixel; its glyphs are shifted into the page grid when
//! painted. Boxes live in a fixed [`Pool`] and are addressed by copyable
//! handles that go stale on delete.

use heapless::Vec;

use crate::config::{CELL_HEIGHT, CELL_WIDTH, FTB_COUNT, MAX_TEXT_CELLS};
use crate::error::{GfxError, Result};
use crate::geometry::Geometry;
use crate::pool::{Handle, Pool};

use super::{paint_cells, Gap, Placement, Scale, WrapMode};
use super::{BACKSPACE, CARRIAGE_RETURN, DELETE, NEWLINE};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Watermark stamped on live text box slots
pub const FTB_WATERMARK: u32 = 0xFEED_FACE;

/// Handle to a floating text box
pub type TextBoxHandle = Handle<TextBox>;

/// Placement and behaviour of a new box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextBoxConfig {
    /// Left edge in pixels
    pub x: u16,
    /// Top edge in pixels, need not be page-aligned
    pub y: u16,
    /// Width in cells
    pub width: u16,
    /// Height in cells
    pub height: u16,
    /// Leave pixels under the glyph cells intact
    pub transparent: bool,
    pub wrap: WrapMode,
    pub scale: Scale,
}

/// One floating text box
#[derive(Debug, Clone)]
pub struct TextBox {
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    transparent: bool,
    wrap: WrapMode,
    scale: Scale,
    cursor_x: u16,
    cursor_y: u16,
    visible: bool,
    cells: Vec<u8, MAX_TEXT_CELLS>,
    /// Display geometry when the box was created
    target: Geometry,
}

impl TextBox {
    fn new(config: &TextBoxConfig, target: Geometry) -> Result<Self> {
        let mut cells = Vec::new();
        cells
            .resize(config.width as usize * config.height as usize, 0)
            .map_err(|_| GfxError::OutOfBounds)?;

        Ok(Self {
            x: config.x,
            y: config.y,
            width: config.width,
            height: config.height,
            transparent: config.transparent,
            wrap: config.wrap,
            scale: config.scale,
            cursor_x: 0,
            cursor_y: 0,
            visible: true,
            cells,
            target,
        })
    }

    /// Top-left pixel
    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Size in cells
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Cursor as `(column, row)`, possibly just outside the box
    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Character code stored at a cell
    pub fn cell(&self, x: u16, y: u16) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.index(x, y)).copied()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Apply one character
    ///
    /// Backspace and delete blank the cell under the cursor, when it is in
    /// the box, then step left. Newline moves to the start of the next row
    /// until the row reaches the box height. Printable characters wrap
    /// first when wrap is on and the column is full, then are stored if the
    /// cursor is inside the box.
    pub fn put(&mut self, c: u8) -> Placement {
        match c {
            BACKSPACE | DELETE => {
                if self.cursor_x > 0 {
                    if self.cursor_x < self.width && self.cursor_y < self.height {
                        let idx = self.index(self.cursor_x, self.cursor_y);
                        self.cells[idx] = 0;
                    }
                    self.cursor_x -= 1;
                }
                Placement::Control
            }
            NEWLINE | CARRIAGE_RETURN => {
                if self.cursor_y < self.height {
                    self.cursor_x = 0;
                    self.cursor_y += 1;
                }
                Placement::Control
            }
            _ if self.cursor_y < self.height => {
                if self.wrap.is_on() && self.cursor_x >= self.width {
                    self.cursor_x = 0;
                    self.cursor_y += 1;
                }
                if self.cursor_x < self.width && self.cursor_y < self.height {
                    let idx = self.index(self.cursor_x, self.cursor_y);
                    self.cells[idx] = c;
                    self.cursor_x += 1;
                    Placement::Placed
                } else {
                    Placement::Dropped
                }
            }
            _ => Placement::Dropped,
        }
    }

    /// Paint the box into a page buffer shaped like its creation geometry
    ///
    /// Opaque boxes wipe every cell's 6x8 area first; transparent boxes only
    /// add glyph ink. Hidden boxes paint nothing.
    pub fn render(&self, dest: &mut [u8]) -> Result<()> {
        if !self.visible {
            return Ok(());
        }
        paint_cells(
            &self.cells,
            self.width,
            self.x,
            self.y,
            Gap::Leading,
            !self.transparent,
            dest,
            self.target,
        )?;
        Ok(())
    }
}

/// Pool of floating text boxes over one display geometry
pub struct FloatingText {
    boxes: Pool<TextBox, FTB_COUNT>,
    geometry: Geometry,
}

impl FloatingText {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            boxes: Pool::new(FTB_WATERMARK),
            geometry,
        }
    }

    /// Widest box position, in pixels
    pub fn max_pixel_width(&self) -> u16 {
        self.geometry.width
    }

    /// Tallest box position, in pixels
    pub fn max_pixel_height(&self) -> u16 {
        self.geometry.height
    }

    /// Widest possible box, in cells
    pub fn max_box_width(&self) -> u16 {
        self.geometry.width / CELL_WIDTH
    }

    /// Tallest possible box, in cells
    pub fn max_box_height(&self) -> u16 {
        self.geometry.pages
    }

    /// Live boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Create a visible, blank box with the cursor at its top left
    ///
    /// The box must end strictly inside the display on both axes.
    pub fn create(&mut self, config: &TextBoxConfig) -> Result<TextBoxHandle> {
        let right = u32::from(config.width) * u32::from(CELL_WIDTH) + u32::from(config.x);
        let bottom = u32::from(config.height) * u32::from(CELL_HEIGHT) + u32::from(config.y);
        if config.width == 0
            || config.height == 0
            || right >= u32::from(self.geometry.width)
            || bottom >= u32::from(self.geometry.height)
        {
            return Err(GfxError::OutOfBounds);
        }

        let text_box = TextBox::new(config, self.geometry)?;
        let handle = self.boxes.acquire(text_box).map_err(|err| {
            warn!("no free text box slot");
            GfxError::from(err)
        })?;
        debug!(
            "text box {} created at ({}, {}), {}x{} cells",
            handle.id(),
            config.x,
            config.y,
            config.width,
            config.height
        );
        Ok(handle)
    }

    /// Free a box; every copy of its handle goes stale
    pub fn delete(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.boxes.release(handle).map_err(|err| {
            warn!("delete of stale text box {}", handle);
            GfxError::from(err)
        })?;
        Ok(())
    }

    /// Borrow a box
    pub fn get(&self, handle: TextBoxHandle) -> Result<&TextBox> {
        Ok(self.boxes.get(handle)?)
    }

    fn get_mut(&mut self, handle: TextBoxHandle) -> Result<&mut TextBox> {
        Ok(self.boxes.get_mut(handle)?)
    }

    /// Include the box in renders
    pub fn enable(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.get_mut(handle)?.visible = true;
        Ok(())
    }

    /// Skip the box in renders
    pub fn disable(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.get_mut(handle)?.visible = false;
        Ok(())
    }

    pub fn is_visible(&self, handle: TextBoxHandle) -> Result<bool> {
        Ok(self.get(handle)?.visible)
    }

    /// Blank every cell and home the cursor
    pub fn clear(&mut self, handle: TextBoxHandle) -> Result<()> {
        let text_box = self.get_mut(handle)?;
        text_box.cells.fill(0);
        text_box.cursor_x = 0;
        text_box.cursor_y = 0;
        Ok(())
    }

    /// Reposition the top-left corner; it must be on the display
    pub fn move_to(&mut self, handle: TextBoxHandle, x: u16, y: u16) -> Result<()> {
        let geometry = self.geometry;
        let text_box = self.get_mut(handle)?;
        if !geometry.contains(x, y) {
            return Err(GfxError::OutOfBounds);
        }
        text_box.x = x;
        text_box.y = y;
        Ok(())
    }

    /// Place the cursor on a cell inside the box
    pub fn set_cursor(&mut self, handle: TextBoxHandle, x: u16, y: u16) -> Result<()> {
        let text_box = self.get_mut(handle)?;
        if x >= text_box.width || y >= text_box.height {
            return Err(GfxError::OutOfBounds);
        }
        text_box.cursor_x = x;
        text_box.cursor_y = y;
        Ok(())
    }

    pub fn cursor(&self, handle: TextBoxHandle) -> Result<(u16, u16)> {
        Ok(self.get(handle)?.cursor())
    }

    pub fn home(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.set_cursor(handle, 0, 0)
    }

    pub fn put(&mut self, handle: TextBoxHandle, c: u8) -> Result<Placement> {
        Ok(self.get_mut(handle)?.put(c))
    }

    /// Apply a whole string; returns how many characters were processed
    ///
    /// Dropped characters still count, only an invalid handle stops early.
    pub fn put_str(&mut self, handle: TextBoxHandle, s: &[u8]) -> Result<usize> {
        let text_box = self.get_mut(handle)?;
        for &c in s {
            text_box.put(c);
        }
        Ok(s.len())
    }

    pub fn newline(&mut self, handle: TextBoxHandle) -> Result<Placement> {
        self.put(handle, NEWLINE)
    }

    pub fn backspace(&mut self, handle: TextBoxHandle) -> Result<Placement> {
        self.put(handle, DELETE)
    }

    /// Paint one box
    pub fn render(&self, handle: TextBoxHandle, dest: &mut [u8]) -> Result<()> {
        self.get(handle)?.render(dest)
    }

    /// Paint every visible box in slot order
    ///
    /// Returns how many boxes were painted.
    pub fn render_all(&self, dest: &mut [u8]) -> Result<usize> {
        let mut painted = 0;
        for (_, text_box) in self.boxes.iter() {
            if text_box.visible {
                text_box.render(dest)?;
                painted += 1;
            }
        }
        Ok(painted)
    }

    /// Handles of every live box in slot order
    pub fn handles(&self) -> impl Iterator<Item = TextBoxHandle> + '_ {
        self.boxes.iter().map(|(handle, _)| handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::cell_columns;

    const GEOMETRY: Geometry = Geometry::new(128, 64);

    fn boxed(width: u16, height: u16, wrap: WrapMode) -> TextBoxConfig {
        TextBoxConfig {
            x: 0,
            y: 0,
            width,
            height,
            wrap,
            ..Default::default()
        }
    }

    #[test]
    fn test_wrap_fills_rows_then_drops() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let h = ftb.create(&boxed(3, 2, WrapMode::On)).unwrap();
        assert_eq!(ftb.put_str(h, b"ABCDEF"), Ok(6));

        let text_box = ftb.get(h).unwrap();
        for (i, &c) in b"ABC".iter().enumerate() {
            assert_eq!(text_box.cell(i as u16, 0), Some(c));
        }
        for (i, &c) in b"DEF".iter().enumerate() {
            assert_eq!(text_box.cell(i as u16, 1), Some(c));
        }
        assert_eq!(ftb.put(h, b'G'), Ok(Placement::Dropped));
    }

    #[test]
    fn test_no_wrap_places_until_edge() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let h = ftb.create(&boxed(3, 2, WrapMode::Off)).unwrap();
        assert_eq!(ftb.put(h, b'A'), Ok(Placement::Placed));
        ftb.put_str(h, b"BC").unwrap();
        assert_eq!(ftb.put(h, b'D'), Ok(Placement::Dropped));
        assert_eq!(ftb.cursor(h), Ok((3, 0)));
        ftb.newline(h).unwrap();
        assert_eq!(ftb.put(h, b'D'), Ok(Placement::Placed));
        assert_eq!(ftb.get(h).unwrap().cell(0, 1), Some(b'D'));
    }

    #[test]
    fn test_backspace_blanks_cursor_cell() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let h = ftb.create(&boxed(4, 1, WrapMode::On)).unwrap();
        ftb.put_str(h, b"AB").unwrap();
        ftb.set_cursor(h, 1, 0).unwrap();
        assert_eq!(ftb.backspace(h), Ok(Placement::Control));
        let text_box = ftb.get(h).unwrap();
        assert_eq!(text_box.cell(0, 0), Some(b'A'));
        assert_eq!(text_box.cell(1, 0), Some(0));
        assert_eq!(text_box.cursor(), (0, 0));

        // At column 0 nothing moves
        ftb.put(h, BACKSPACE).unwrap();
        assert_eq!(ftb.cursor(h), Ok((0, 0)));
    }

    #[test]
    fn test_newline_clamps_at_height() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let h = ftb.create(&boxed(2, 2, WrapMode::On)).unwrap();
        for _ in 0..4 {
            ftb.newline(h).unwrap();
        }
        assert_eq!(ftb.cursor(h), Ok((0, 2)));
    }

    #[test]
    fn test_create_bounds() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let too_wide = TextBoxConfig {
            x: 8,
            ..boxed(20, 1, WrapMode::On)
        };
        let too_tall = TextBoxConfig {
            y: 1,
            ..boxed(1, 8, WrapMode::On)
        };
        assert_eq!(ftb.create(&too_wide), Err(GfxError::OutOfBounds));
        assert_eq!(ftb.create(&too_tall), Err(GfxError::OutOfBounds));
        assert_eq!(ftb.create(&boxed(0, 1, WrapMode::On)), Err(GfxError::OutOfBounds));
        assert!(ftb.create(&boxed(21, 7, WrapMode::On)).is_ok());
        assert_eq!(ftb.max_box_width(), 21);
        assert_eq!(ftb.max_box_height(), 8);
    }

    #[test]
    fn test_pool_exhaustion_and_reuse() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let handles: heapless::Vec<TextBoxHandle, FTB_COUNT> = (0..FTB_COUNT)
            .map(|_| ftb.create(&boxed(1, 1, WrapMode::On)).unwrap())
            .collect();
        assert_eq!(
            ftb.create(&boxed(1, 1, WrapMode::On)),
            Err(GfxError::Exhausted)
        );
        ftb.delete(handles[1]).unwrap();
        let again = ftb.create(&boxed(1, 1, WrapMode::On)).unwrap();
        assert_eq!(again.slot(), handles[1].slot());
        assert!(again.id() > handles[FTB_COUNT - 1].id());
    }

    #[test]
    fn test_deleted_handle_fails_everywhere() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let h = ftb.create(&boxed(2, 2, WrapMode::On)).unwrap();
        ftb.delete(h).unwrap();
        let mut dest = [0u8; 1024];
        assert_eq!(ftb.put(h, b'A'), Err(GfxError::InvalidHandle));
        assert_eq!(ftb.put_str(h, b"A"), Err(GfxError::InvalidHandle));
        assert_eq!(ftb.move_to(h, 1, 1), Err(GfxError::InvalidHandle));
        assert_eq!(ftb.enable(h), Err(GfxError::InvalidHandle));
        assert_eq!(ftb.home(h), Err(GfxError::InvalidHandle));
        assert_eq!(ftb.render(h, &mut dest), Err(GfxError::InvalidHandle));
        assert_eq!(ftb.delete(h), Err(GfxError::InvalidHandle));
        assert!(ftb.is_empty());
    }

    #[test]
    fn test_move_and_cursor_bounds() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let h = ftb.create(&boxed(2, 2, WrapMode::On)).unwrap();
        assert!(ftb.move_to(h, 127, 63).is_ok());
        assert_eq!(ftb.move_to(h, 128, 0), Err(GfxError::OutOfBounds));
        assert_eq!(ftb.get(h).unwrap().position(), (127, 63));
        assert_eq!(ftb.set_cursor(h, 2, 0), Err(GfxError::OutOfBounds));
        ftb.set_cursor(h, 1, 1).unwrap();
        ftb.home(h).unwrap();
        assert_eq!(ftb.cursor(h), Ok((0, 0)));
    }

    #[test]
    fn test_render_shifted_box_splits_pages() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let config = TextBoxConfig {
            x: 10,
            y: 13,
            ..boxed(1, 1, WrapMode::On)
        };
        let h = ftb.create(&config).unwrap();
        ftb.put(h, b'A').unwrap();

        let mut dest = [0xFFu8; 1024];
        ftb.render(h, &mut dest).unwrap();

        let cell = cell_columns(b'A', Gap::Leading);
        for (i, &col) in cell.iter().enumerate() {
            let upper = 128 + 10 + i;
            let lower = upper + 128;
            // Rows 13..16 of page 1, rows 16..21 of page 2
            assert_eq!(dest[upper], 0x1F | (col << 5), "column {}", i);
            assert_eq!(dest[lower], 0xE0 | (col >> 3), "column {}", i);
        }
        assert_eq!(dest[128 + 9], 0xFF);
        assert_eq!(dest[128 + 16], 0xFF);
    }

    #[test]
    fn test_transparent_box_keeps_background() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let config = TextBoxConfig {
            transparent: true,
            ..boxed(1, 1, WrapMode::On)
        };
        let h = ftb.create(&config).unwrap();
        ftb.put(h, b'A').unwrap();

        let mut dest = [0u8; 1024];
        dest[0] = 0x80;
        dest[1] = 0x80;
        ftb.render(h, &mut dest).unwrap();
        assert_eq!(dest[0], 0x80);
        assert_eq!(dest[1], 0x80 | 0x7C);
    }

    #[test]
    fn test_render_all_skips_hidden() {
        let mut ftb = FloatingText::new(GEOMETRY);
        let a = ftb.create(&boxed(1, 1, WrapMode::On)).unwrap();
        let b = ftb
            .create(&TextBoxConfig {
                y: 16,
                ..boxed(1, 1, WrapMode::On)
            })
            .unwrap();
        ftb.put(a, b'A').unwrap();
        ftb.put(b, b'B').unwrap();
        ftb.disable(b).unwrap();
        assert_eq!(ftb.is_visible(b), Ok(false));

        let mut dest = [0u8; 1024];
        assert_eq!(ftb.render_all(&mut dest), Ok(1));
        assert_ne!(dest[1], 0);
        assert!(dest[256..262].iter().all(|&c| c == 0));

        ftb.enable(b).unwrap();
        assert_eq!(ftb.render_all(&mut dest), Ok(2));
        assert_ne!(dest[257], 0);
        assert_eq!(ftb.handles().count(), 2);
    }
}
