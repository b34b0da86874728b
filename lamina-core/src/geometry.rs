//! Display geometry snapshot

use crate::config::{MAX_FRAMEBUFFER_LEN, PAGE_ROWS};
use crate::error::{GfxError, Result};
use crate::traits::DisplayProvider;

/// Pixel and page dimensions of a page-addressed framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    /// Width in pixels (page columns)
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Height in 8-row pages
    pub pages: u16,
}

impl Geometry {
    /// Build a geometry from pixel dimensions, height rounded up to a page
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pages: height.div_ceil(PAGE_ROWS),
        }
    }

    /// Capture and validate a provider's geometry
    pub fn from_provider<P: DisplayProvider + ?Sized>(display: &P) -> Result<Self> {
        if !display.is_ready() {
            return Err(GfxError::NotReady);
        }

        let geometry = Self {
            width: display.pixel_width(),
            height: display.pixel_height(),
            pages: display.page_height(),
        };

        if geometry.width == 0
            || geometry.pages == 0
            || u32::from(geometry.pages) * u32::from(PAGE_ROWS) != u32::from(geometry.height)
            || geometry.len() != display.framebuffer_len()
            || display.framebuffer().len() != geometry.len()
            || geometry.len() > MAX_FRAMEBUFFER_LEN
        {
            warn!(
                "rejecting display geometry {}x{} ({} pages)",
                geometry.width,
                geometry.height,
                geometry.pages
            );
            return Err(GfxError::Geometry);
        }

        Ok(geometry)
    }

    /// Framebuffer length in bytes
    pub const fn len(&self) -> usize {
        self.width as usize * self.pages as usize
    }

    /// True for a zero-sized framebuffer
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a pixel lies on the display
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Byte index and bit mask of a pixel
    pub const fn locate(&self, x: u16, y: u16) -> (usize, u8) {
        let page = (y / PAGE_ROWS) as usize;
        let bit = (y % PAGE_ROWS) as u8;
        (page * self.width as usize + x as usize, 1 << bit)
    }
}
