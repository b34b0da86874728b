//! Display capability provider trait
//!
//! The only contract between the stack and a concrete panel driver. The
//! stack never hardcodes geometry; it asks the provider once at creation.

/// Errors reported by a display provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Provider not started, or geometry not yet known
    NotReady,
    /// Transport failure talking to the panel
    Communication,
    /// Operation not implemented by this provider
    Unsupported,
    /// Argument outside the accepted range
    InvalidArgument,
}

/// Display capability provider
///
/// Implementations own the hardware framebuffer: `pixel_width() *
/// page_height()` bytes, one byte per page column, bit 0 is the topmost row
/// of the page.
pub trait DisplayProvider {
    /// Panel width in pixels
    fn pixel_width(&self) -> u16;

    /// Panel height in pixels
    fn pixel_height(&self) -> u16;

    /// Panel height in 8-row pages
    fn page_height(&self) -> u16;

    /// Framebuffer size in bytes
    fn framebuffer_len(&self) -> usize {
        self.pixel_width() as usize * self.page_height() as usize
    }

    /// The hardware framebuffer
    fn framebuffer(&self) -> &[u8];

    /// The hardware framebuffer, writable in place by the compositor
    fn framebuffer_mut(&mut self) -> &mut [u8];

    /// Whether geometry is known and the framebuffer exists
    fn is_ready(&self) -> bool;

    /// Transmit the provider's own framebuffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Transmit an arbitrary frame to the panel, bypassing the framebuffer
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DisplayError>;

    /// Blank the panel directly; the framebuffer is not touched
    fn clear_physical(&mut self) -> Result<(), DisplayError>;

    /// Short driver identifier
    fn name(&self) -> &str {
        "display"
    }

    /// Show pixels
    fn display_on(&mut self) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }

    /// Hide pixels, panel dark
    fn display_off(&mut self) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }

    /// Invert every pixel on the glass
    fn set_invert(&mut self, _invert: bool) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }

    /// Mirror about the X axis
    fn set_flip_x(&mut self, _flip: bool) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }

    /// Mirror about the Y axis
    fn set_flip_y(&mut self, _flip: bool) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }

    /// Rotate the panel 180 degrees
    fn set_rotate(&mut self, _rotate: bool) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }

    /// Contrast adjustment, `-10..=10`, 0 is the panel default
    fn set_contrast(&mut self, _level: i8) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }

    /// Brightness adjustment, `-10..=10`, 0 is the panel default
    fn set_brightness(&mut self, _level: i8) -> Result<(), DisplayError> {
        Err(DisplayError::Unsupported)
    }
}

/// Accepted range for contrast and brightness adjustments
pub const ADJUST_RANGE: core::ops::RangeInclusive<i8> = -10..=10;
