//! LED-style numeric overlay
//!
//! Shows an unsigned value as up to [`MAX_DIGITS`] large seven-segment
//! digits. Leading zeros are blanked, the ones digit always shows.

use crate::buffer::blit;
use crate::config::{MAX_DIGITS, MAX_LED_SESSIONS};
use crate::error::{GfxError, Result};
use crate::geometry::Geometry;
use crate::pool::{Handle, Pool};

use super::glyphs::{digit_bitmap, DIGIT_HEIGHT, DIGIT_SPACING, DIGIT_WIDTH};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Watermark stamped on live overlay sessions ("LEDO")
pub const LED_WATERMARK: u32 = 0x4C45_444F;

/// Handle to an overlay session
pub type LedHandle = Handle<LedSession>;

/// Decoded digits, least significant first, `None` when blanked
pub type Digits = [Option<u8>; MAX_DIGITS];

/// Parameters for opening a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedConfig {
    /// Left edge of the leftmost digit
    pub x: u16,
    /// Top edge, need not be page-aligned
    pub y: u16,
    /// Digits shown, `1..=MAX_DIGITS`
    pub digits: u8,
    /// Starting value, `None` starts with every digit blank
    pub initial: Option<u32>,
    /// Repaint on every update
    pub auto_refresh: bool,
}

impl Default for LedConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            digits: MAX_DIGITS as u8,
            initial: Some(0),
            auto_refresh: true,
        }
    }
}

/// Split `value` into `count` digits
///
/// Values past the representable range are reduced by the full decimal
/// range until they fit, so 150 on two digits shows 50.
pub fn decompose(value: u32, count: u8) -> Digits {
    let count = count.clamp(1, MAX_DIGITS as u8);
    let modulus = 10u32.pow(u32::from(count));
    // Same result as subtracting `modulus` until the value fits
    let value = value % modulus;

    let mut digits = [None; MAX_DIGITS];
    let mut leading = true;
    for idx in (0..count as usize).rev() {
        let digit = (value / 10u32.pow(idx as u32) % 10) as u8;
        if leading && digit == 0 && idx > 0 {
            continue;
        }
        leading = false;
        digits[idx] = Some(digit);
    }
    digits
}

/// One open overlay session
#[derive(Debug, Clone)]
pub struct LedSession {
    x: u16,
    y: u16,
    count: u8,
    max: u32,
    auto_refresh: bool,
    digits: Digits,
}

impl LedSession {
    /// Top-left pixel of the leftmost digit
    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    pub fn digit_count(&self) -> u8 {
        self.count
    }

    /// Largest value shown without reduction
    pub fn max_value(&self) -> u32 {
        self.max
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    /// Shown digits, most significant first
    pub fn digits(&self) -> heapless::Vec<Option<u8>, MAX_DIGITS> {
        self.digits[..self.count as usize].iter().rev().copied().collect()
    }

    /// Blit every digit into a page buffer, overwriting what is there
    pub fn render(&self, dest: &mut [u8], geometry: Geometry) -> Result<()> {
        let mut x = self.x;
        for idx in (0..self.count as usize).rev() {
            blit(
                digit_bitmap(self.digits[idx]),
                true,
                x,
                self.y,
                dest,
                geometry.width,
                geometry.pages,
            )?;
            x = x.saturating_add(DIGIT_WIDTH + DIGIT_SPACING);
        }
        Ok(())
    }
}

/// Session pool and placement limits for one display
pub struct LedOverlay {
    sessions: Pool<LedSession, MAX_LED_SESSIONS>,
    geometry: Geometry,
    max_x: u16,
    max_y: u16,
}

impl LedOverlay {
    pub fn new(geometry: Geometry) -> Self {
        // Room for a full-width readout regardless of the digit count
        let span = MAX_DIGITS as u16 * DIGIT_WIDTH + (MAX_DIGITS as u16 - 2) * DIGIT_SPACING;
        Self {
            sessions: Pool::new(LED_WATERMARK),
            geometry,
            max_x: geometry.width.saturating_sub(1).saturating_sub(span),
            max_y: geometry.height.saturating_sub(1).saturating_sub(DIGIT_HEIGHT),
        }
    }

    /// Exclusive upper bound for a session's x
    pub fn max_x(&self) -> u16 {
        self.max_x
    }

    /// Exclusive upper bound for a session's y
    pub fn max_y(&self) -> u16 {
        self.max_y
    }

    /// Open a session
    ///
    /// An initial value past the range is clamped to the largest value the
    /// digits can show.
    pub fn open(&mut self, config: &LedConfig) -> Result<LedHandle> {
        if config.x >= self.max_x
            || config.y >= self.max_y
            || config.digits == 0
            || config.digits as usize > MAX_DIGITS
        {
            return Err(GfxError::OutOfBounds);
        }

        let max = 10u32.pow(u32::from(config.digits)) - 1;
        let digits = match config.initial {
            Some(value) => decompose(value.min(max), config.digits),
            None => [None; MAX_DIGITS],
        };

        let session = LedSession {
            x: config.x,
            y: config.y,
            count: config.digits,
            max,
            auto_refresh: config.auto_refresh,
            digits,
        };
        let handle = self.sessions.acquire(session).map_err(|err| {
            warn!("no free LED overlay session");
            GfxError::from(err)
        })?;
        debug!(
            "LED session {} opened at ({}, {}), {} digits",
            handle.id(),
            config.x,
            config.y,
            config.digits
        );
        Ok(handle)
    }

    /// Close a session; every copy of its handle goes stale
    pub fn close(&mut self, handle: LedHandle) -> Result<()> {
        self.sessions.release(handle).map_err(|err| {
            warn!("close of stale LED session {}", handle);
            GfxError::from(err)
        })?;
        Ok(())
    }

    pub fn session(&self, handle: LedHandle) -> Result<&LedSession> {
        Ok(self.sessions.get(handle)?)
    }

    /// Set a new value, reducing it into range
    pub fn update(&mut self, handle: LedHandle, value: u32) -> Result<()> {
        let session = self.sessions.get_mut(handle)?;
        session.digits = decompose(value, session.count);
        Ok(())
    }

    /// Blit a session's digits into a page buffer
    pub fn render(&self, handle: LedHandle, dest: &mut [u8]) -> Result<()> {
        self.session(handle)?.render(dest, self.geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Bitmap;

    const GEOMETRY: Geometry = Geometry::new(128, 64);

    fn msd_first(digits: Digits, count: usize) -> heapless::Vec<Option<u8>, MAX_DIGITS> {
        digits[..count].iter().rev().copied().collect()
    }

    #[test]
    fn test_decompose_blanks_leading_zeros() {
        assert_eq!(msd_first(decompose(7, 3), 3).as_slice(), &[None, None, Some(7)]);
        assert_eq!(msd_first(decompose(0, 3), 3).as_slice(), &[None, None, Some(0)]);
        assert_eq!(msd_first(decompose(105, 3), 3).as_slice(), &[Some(1), Some(0), Some(5)]);
        assert_eq!(msd_first(decompose(40, 3), 3).as_slice(), &[None, Some(4), Some(0)]);
    }

    #[test]
    fn test_decompose_reduces_overflow() {
        assert_eq!(msd_first(decompose(150, 2), 2).as_slice(), &[Some(5), Some(0)]);
        assert_eq!(msd_first(decompose(1000, 3), 3).as_slice(), &[None, None, Some(0)]);
        assert_eq!(msd_first(decompose(12, 1), 1).as_slice(), &[Some(2)]);
    }

    #[test]
    fn test_open_limits() {
        let mut led = LedOverlay::new(GEOMETRY);
        assert_eq!((led.max_x(), led.max_y()), (74, 31));
        let bad = [
            LedConfig { x: 74, ..Default::default() },
            LedConfig { y: 31, ..Default::default() },
            LedConfig { digits: 0, ..Default::default() },
            LedConfig { digits: 4, ..Default::default() },
        ];
        for config in &bad {
            assert_eq!(led.open(config), Err(GfxError::OutOfBounds));
        }
        assert!(led.open(&LedConfig { x: 73, y: 30, ..Default::default() }).is_ok());
    }

    #[test]
    fn test_open_clamps_initial_value() {
        let mut led = LedOverlay::new(GEOMETRY);
        let h = led
            .open(&LedConfig {
                digits: 2,
                initial: Some(150),
                ..Default::default()
            })
            .unwrap();
        let session = led.session(h).unwrap();
        assert_eq!(session.max_value(), 99);
        assert_eq!(session.digits().as_slice(), &[Some(9), Some(9)]);

        led.update(h, 150).unwrap();
        assert_eq!(led.session(h).unwrap().digits().as_slice(), &[Some(5), Some(0)]);
    }

    #[test]
    fn test_open_blank() {
        let mut led = LedOverlay::new(GEOMETRY);
        let h = led
            .open(&LedConfig {
                initial: None,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(led.session(h).unwrap().digits().as_slice(), &[None, None, None]);
    }

    #[test]
    fn test_single_session() {
        let mut led = LedOverlay::new(GEOMETRY);
        let h = led.open(&LedConfig::default()).unwrap();
        assert_eq!(led.open(&LedConfig::default()), Err(GfxError::Exhausted));
        led.close(h).unwrap();
        assert!(led.open(&LedConfig::default()).is_ok());
    }

    #[test]
    fn test_closed_handle_fails() {
        let mut led = LedOverlay::new(GEOMETRY);
        let h = led.open(&LedConfig::default()).unwrap();
        led.close(h).unwrap();
        let mut dest = [0u8; 1024];
        assert_eq!(led.update(h, 1), Err(GfxError::InvalidHandle));
        assert_eq!(led.render(h, &mut dest), Err(GfxError::InvalidHandle));
        assert_eq!(led.close(h), Err(GfxError::InvalidHandle));
        assert!(led.session(h).is_err());
    }

    #[test]
    fn test_render_places_digits_left_to_right() {
        let mut led = LedOverlay::new(GEOMETRY);
        let h = led
            .open(&LedConfig {
                x: 10,
                y: 8,
                initial: Some(18),
                ..Default::default()
            })
            .unwrap();

        let mut dest = [0xFFu8; 1024];
        led.render(h, &mut dest).unwrap();

        let mut expected = [0xFFu8; 1024];
        for (slot, digit) in [None, Some(1), Some(8)].into_iter().enumerate() {
            let x = 10 + slot as u16 * (DIGIT_WIDTH + DIGIT_SPACING);
            blit(digit_bitmap(digit), true, x, 8, &mut expected, 128, 8).unwrap();
        }
        assert_eq!(dest, expected);

        // Blank leading digit wiped what was under it
        assert!(dest[128 + 10..128 + 27].iter().all(|&b| b == 0));
        let one = digit_bitmap(Some(1));
        let Bitmap { data, .. } = one;
        assert_eq!(dest[128 + 29..128 + 46], data[..17]);
    }
}
