//! RAM-backed display provider
//!
//! Stands in for a real panel: "physical" writes land in a panel mirror
//! instead of going out over SPI or I2C.

use heapless::Vec;
use lamina_core::config::{MAX_FRAMEBUFFER_LEN, PAGE_ROWS};
use lamina_core::traits::{DisplayError, DisplayProvider, ADJUST_RANGE};

/// Panel controls as last set through the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelState {
    pub on: bool,
    pub inverted: bool,
    pub flip_x: bool,
    pub flip_y: bool,
    pub rotated: bool,
    pub contrast: i8,
    pub brightness: i8,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            on: true,
            inverted: false,
            flip_x: false,
            flip_y: false,
            rotated: false,
            contrast: 0,
            brightness: 0,
        }
    }
}

/// Display provider backed by two RAM buffers
///
/// The framebuffer is what the compositor writes; the panel is what a
/// real display would be showing after the last physical write.
pub struct RamDisplay {
    width: u16,
    height: u16,
    framebuffer: Vec<u8, MAX_FRAMEBUFFER_LEN>,
    panel: Vec<u8, MAX_FRAMEBUFFER_LEN>,
    writes: u32,
    state: PanelState,
    ready: bool,
    fail_writes: bool,
}

impl RamDisplay {
    /// Create a panel of `width` x `height` pixels
    ///
    /// Returns `InvalidArgument` when the height is not whole pages or the
    /// frame does not fit [`MAX_FRAMEBUFFER_LEN`].
    pub fn new(width: u16, height: u16) -> Result<Self, DisplayError> {
        if width == 0 || height == 0 || height % PAGE_ROWS != 0 {
            return Err(DisplayError::InvalidArgument);
        }
        let len = width as usize * (height / PAGE_ROWS) as usize;

        let mut framebuffer = Vec::new();
        framebuffer
            .resize(len, 0)
            .map_err(|_| DisplayError::InvalidArgument)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("RAM display {}x{}, {} bytes", width, height, len);

        Ok(Self {
            width,
            height,
            panel: framebuffer.clone(),
            framebuffer,
            writes: 0,
            state: PanelState::default(),
            ready: true,
            fail_writes: false,
        })
    }

    /// Bytes currently on the simulated glass
    pub fn panel(&self) -> &[u8] {
        &self.panel
    }

    /// Whether a pixel is lit on the simulated glass
    ///
    /// Follows the page layout only; invert and orientation are recorded in
    /// [`PanelState`] but not applied here.
    pub fn panel_pixel(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let idx = (y / PAGE_ROWS) as usize * self.width as usize + x as usize;
        self.panel[idx] & (1 << (y % PAGE_ROWS)) != 0
    }

    /// Physical writes so far (flushes and raw frames)
    pub fn writes(&self) -> u32 {
        self.writes
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Report not-ready, as a driver would before its init sequence
    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Make every physical write fail with `Communication`
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    fn transmit(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        if self.fail_writes {
            return Err(DisplayError::Communication);
        }
        if frame.len() != self.panel.len() {
            return Err(DisplayError::InvalidArgument);
        }
        self.panel.copy_from_slice(frame);
        self.writes = self.writes.wrapping_add(1);
        Ok(())
    }

    fn adjust(level: i8) -> Result<i8, DisplayError> {
        if ADJUST_RANGE.contains(&level) {
            Ok(level)
        } else {
            Err(DisplayError::InvalidArgument)
        }
    }
}

impl DisplayProvider for RamDisplay {
    fn pixel_width(&self) -> u16 {
        self.width
    }

    fn pixel_height(&self) -> u16 {
        self.height
    }

    fn page_height(&self) -> u16 {
        self.height / PAGE_ROWS
    }

    fn framebuffer(&self) -> &[u8] {
        &self.framebuffer
    }

    fn framebuffer_mut(&mut self) -> &mut [u8] {
        &mut self.framebuffer
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        if self.fail_writes {
            return Err(DisplayError::Communication);
        }
        self.panel.clone_from(&self.framebuffer);
        self.writes = self.writes.wrapping_add(1);
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        self.transmit(frame)
    }

    fn clear_physical(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotReady);
        }
        if self.fail_writes {
            return Err(DisplayError::Communication);
        }
        self.panel.fill(0);
        Ok(())
    }

    fn name(&self) -> &str {
        "ram"
    }

    fn display_on(&mut self) -> Result<(), DisplayError> {
        self.state.on = true;
        Ok(())
    }

    fn display_off(&mut self) -> Result<(), DisplayError> {
        self.state.on = false;
        Ok(())
    }

    fn set_invert(&mut self, invert: bool) -> Result<(), DisplayError> {
        self.state.inverted = invert;
        Ok(())
    }

    fn set_flip_x(&mut self, flip: bool) -> Result<(), DisplayError> {
        self.state.flip_x = flip;
        Ok(())
    }

    fn set_flip_y(&mut self, flip: bool) -> Result<(), DisplayError> {
        self.state.flip_y = flip;
        Ok(())
    }

    fn set_rotate(&mut self, rotate: bool) -> Result<(), DisplayError> {
        self.state.rotated = rotate;
        Ok(())
    }

    fn set_contrast(&mut self, level: i8) -> Result<(), DisplayError> {
        self.state.contrast = Self::adjust(level)?;
        Ok(())
    }

    fn set_brightness(&mut self, level: i8) -> Result<(), DisplayError> {
        self.state.brightness = Self::adjust(level)?;
        Ok(())
    }
}
