//! Pixel, line, box, bar graph, circle and arc drawing
//!
//! All operations write into a borrowed page buffer shaped like the
//! hardware framebuffer. Coordinates are pixels with the origin top left.

use crate::config::PAGE_ROWS;
use crate::error::{GfxError, Result};
use crate::geometry::Geometry;

use super::Colour;

/// Full turn in tenths of a degree
pub const FULL_TURN: u16 = 3600;

/// Drawing surface over the line layer
pub struct Lines<'a> {
    buf: &'a mut [u8],
    geometry: Geometry,
}

impl<'a> Lines<'a> {
    /// Wrap a page buffer of at least `geometry.len()` bytes
    pub fn new(buf: &'a mut [u8], geometry: Geometry) -> Result<Self> {
        if geometry.is_empty() || buf.len() < geometry.len() {
            return Err(GfxError::Geometry);
        }
        Ok(Self { buf, geometry })
    }

    /// Geometry of the surface
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Blank the whole layer
    pub fn clear(&mut self) {
        self.buf[..self.geometry.len()].fill(0);
    }

    /// Set or clear one pixel
    pub fn plot(&mut self, x: u16, y: u16, colour: Colour) -> Result<()> {
        self.check(x, y)?;
        self.set(x, y, colour.is_ink());
        Ok(())
    }

    /// Whether a pixel is inked
    pub fn pixel(&self, x: u16, y: u16) -> Result<bool> {
        self.check(x, y)?;
        let (idx, bit) = self.geometry.locate(x, y);
        Ok(self.buf[idx] & bit != 0)
    }

    /// Straight line between two inclusive endpoints
    ///
    /// Axis-aligned lines take a direct run; everything else is Bresenham.
    pub fn line(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, colour: Colour) -> Result<()> {
        self.check(x1, y1)?;
        self.check(x2, y2)?;
        let ink = colour.is_ink();

        if y1 == y2 {
            self.hline(x1.min(x2), y1, x1.abs_diff(x2) + 1, ink);
            return Ok(());
        }
        if x1 == x2 {
            self.vline(x1, y1.min(y2), y1.abs_diff(y2) + 1, ink);
            return Ok(());
        }

        let (mut x, mut y) = (i32::from(x1), i32::from(y1));
        let (x2, y2) = (i32::from(x2), i32::from(y2));
        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            // Both endpoints are on screen, so every step is too
            self.set(x as u16, y as u16, ink);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        Ok(())
    }

    /// Rectangle outline through two opposite corners
    ///
    /// Sides are drawn in order; the first failing side stops the rest and
    /// leaves earlier sides in place.
    pub fn rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, colour: Colour) -> Result<()> {
        self.line(x1, y1, x2, y1, colour)?;
        self.line(x2, y1, x2, y2, colour)?;
        self.line(x2, y2, x1, y2, colour)?;
        self.line(x1, y2, x1, y1, colour)
    }

    /// Filled rectangle through two opposite corners
    pub fn filled_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, colour: Colour) -> Result<()> {
        self.rect(x1, y1, x2, y2, colour)?;
        let (top, bottom) = (y1.min(y2), y1.max(y2));
        for y in top.saturating_add(1)..bottom {
            self.line(x1, y, x2, y, colour)?;
        }
        Ok(())
    }

    /// Horizontal bar graph
    ///
    /// Occupies `len` columns from `x` and `height` rows from `y`. The first
    /// `fill` columns are inked, the rest cleared. The bar must lie strictly
    /// inside the screen.
    pub fn bar_graph(
        &mut self,
        x: u16,
        y: u16,
        height: u16,
        len: u16,
        fill: u16,
        colour: Colour,
    ) -> Result<()> {
        // Colour is only validated; the filled part is always ink
        let _ = colour;
        let right = u32::from(x) + u32::from(len);
        let bottom = u32::from(y) + u32::from(height);
        if height == 0
            || len == 0
            || right >= u32::from(self.geometry.width)
            || bottom >= u32::from(self.geometry.height)
        {
            return Err(GfxError::OutOfBounds);
        }

        let width = self.geometry.width as usize;
        let bottom = y + height;
        for page in y / PAGE_ROWS..=(bottom - 1) / PAGE_ROWS {
            let mask = span_mask(page, y, bottom);
            let row = page as usize * width + x as usize;
            for (i, byte) in self.buf[row..row + len as usize].iter_mut().enumerate() {
                if i < fill as usize {
                    *byte |= mask;
                } else {
                    *byte &= !mask;
                }
            }
        }
        Ok(())
    }

    /// Circle outline, clipped to the screen
    ///
    /// The centre must be on screen; a zero radius plots the centre only.
    pub fn circle(&mut self, cx: u16, cy: u16, radius: u16, colour: Colour) -> Result<()> {
        self.check(cx, cy)?;
        let ink = colour.is_ink();
        self.midpoint(cx, cy, radius, |surface, px, py, _, _| {
            surface.set_clipped(px, py, ink);
        });
        Ok(())
    }

    /// Arc of a circle, clipped to the screen
    ///
    /// Angles are tenths of a degree in `0..3600`, counter-clockwise from
    /// the positive x axis. The arc runs from `start` to `end` in that
    /// direction, so `start > end` crosses zero.
    pub fn arc(
        &mut self,
        cx: u16,
        cy: u16,
        radius: u16,
        start: u16,
        end: u16,
        colour: Colour,
    ) -> Result<()> {
        self.check(cx, cy)?;
        if start >= FULL_TURN || end >= FULL_TURN {
            return Err(GfxError::OutOfBounds);
        }
        let ink = colour.is_ink();
        self.midpoint(cx, cy, radius, |surface, px, py, dx, dy| {
            if in_sweep(angle_of(dx, dy), start, end) {
                surface.set_clipped(px, py, ink);
            }
        });
        Ok(())
    }

    /// Midpoint circle walk
    ///
    /// Calls `visit` with the absolute point and its offset from the centre
    /// for each of the eight symmetric points per step.
    fn midpoint<F>(&mut self, cx: u16, cy: u16, radius: u16, mut visit: F)
    where
        F: FnMut(&mut Self, i32, i32, i32, i32),
    {
        let (cx, cy) = (i32::from(cx), i32::from(cy));
        let mut x = i32::from(radius);
        let mut y = 0i32;
        let mut err = 1 - x;

        while x >= y {
            for (dx, dy) in [
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                visit(self, cx + dx, cy + dy, dx, dy);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn check(&self, x: u16, y: u16) -> Result<()> {
        if self.geometry.contains(x, y) {
            Ok(())
        } else {
            Err(GfxError::OutOfBounds)
        }
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, ink: bool) {
        let (idx, bit) = self.geometry.locate(x, y);
        if let Some(byte) = self.buf.get_mut(idx) {
            if ink {
                *byte |= bit;
            } else {
                *byte &= !bit;
            }
        }
    }

    pub(crate) fn set_clipped(&mut self, x: i32, y: i32, ink: bool) {
        if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) {
            if self.geometry.contains(x, y) {
                self.set(x, y, ink);
            }
        }
    }

    fn hline(&mut self, x: u16, y: u16, len: u16, ink: bool) {
        for col in x..x + len {
            self.set(col, y, ink);
        }
    }

    fn vline(&mut self, x: u16, y: u16, len: u16, ink: bool) {
        for row in y..y + len {
            self.set(x, row, ink);
        }
    }
}

/// Bits of `page` covered by rows `top..bottom`
fn span_mask(page: u16, top: u16, bottom: u16) -> u8 {
    let first = page * PAGE_ROWS;
    let lo = top.max(first) - first;
    let hi = bottom.min(first + PAGE_ROWS) - first;
    ((0xFFu16 << lo) & (0xFFu16 >> (PAGE_ROWS - hi))) as u8
}

/// Angle of a centre offset in tenths of a degree, y pointing down
fn angle_of(dx: i32, dy: i32) -> u16 {
    let radians = libm::atan2f(-dy as f32, dx as f32);
    let mut tenths = libm::roundf(radians * 1800.0 / core::f32::consts::PI) as i32;
    if tenths < 0 {
        tenths += i32::from(FULL_TURN);
    }
    (tenths % i32::from(FULL_TURN)) as u16
}

fn in_sweep(angle: u16, start: u16, end: u16) -> bool {
    if start <= end {
        (start..=end).contains(&angle)
    } else {
        angle >= start || angle <= end
    }
}
