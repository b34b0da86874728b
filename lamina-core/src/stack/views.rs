//! Subsystem views borrowed from a [`DisplayStack`](super::DisplayStack)

use crate::error::Result;
use crate::geometry::Geometry;
use crate::overlay::{LedConfig, LedHandle, LedOverlay, LedSession};
use crate::text::{
    FloatingText, Placement, RefreshMode, TextBox, TextBoxConfig, TextBoxHandle, TextGrid,
    WrapMode, NEWLINE,
};
use crate::traits::DisplayProvider;

use super::Surface;

/// Wipe the text layer, then paint the grid and every visible box over it
///
/// Returns how many boxes were painted.
fn redraw_text_layer(
    pixels: &mut [u8],
    geometry: Geometry,
    grid: Option<&TextGrid>,
    boxes: Option<&FloatingText>,
) -> Result<usize> {
    pixels.fill(0);
    if let Some(grid) = grid {
        grid.render(pixels, geometry)?;
    }
    match boxes {
        Some(boxes) => boxes.render_all(pixels),
        None => Ok(0),
    }
}

/// The fixed text grid
///
/// In [`RefreshMode::OnTextChange`] every accepted character repaints the
/// text layer and refreshes the panel; a string repaints once at the end.
/// Visible floating boxes are repainted over the grid each time.
pub struct Text<'a, P: DisplayProvider> {
    grid: &'a mut TextGrid,
    boxes: Option<&'a FloatingText>,
    surface: Surface<'a, P>,
}

impl<'a, P: DisplayProvider> Text<'a, P> {
    pub(crate) fn new(
        grid: &'a mut TextGrid,
        boxes: Option<&'a FloatingText>,
        surface: Surface<'a, P>,
    ) -> Self {
        Self {
            grid,
            boxes,
            surface,
        }
    }

    /// Grid state
    pub fn grid(&self) -> &TextGrid {
        self.grid
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.grid.cursor()
    }

    pub fn set_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.grid.set_cursor(x, y)
    }

    pub fn refresh_mode(&self) -> RefreshMode {
        self.grid.refresh_mode()
    }

    pub fn set_refresh_mode(&mut self, mode: RefreshMode) {
        self.grid.set_refresh_mode(mode);
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.grid.wrap_mode()
    }

    pub fn set_wrap_mode(&mut self, wrap: WrapMode) {
        self.grid.set_wrap_mode(wrap);
    }

    /// Blank the grid and home the cursor
    pub fn clear(&mut self) -> Result<()> {
        self.grid.clear();
        self.refresh_on_change()
    }

    /// Write one character
    pub fn put_char(&mut self, c: u8) -> Result<Placement> {
        let placement = self.grid.put(c);
        if placement.accepted() {
            self.refresh_on_change()?;
        }
        Ok(placement)
    }

    /// Write characters until one is dropped
    ///
    /// Returns how many were accepted. Repaints at most once.
    pub fn put_str(&mut self, s: impl AsRef<[u8]>) -> Result<usize> {
        let accepted = self.grid.put_str(s.as_ref());
        if accepted > 0 {
            self.refresh_on_change()?;
        }
        Ok(accepted)
    }

    pub fn newline(&mut self) -> Result<Placement> {
        self.put_char(NEWLINE)
    }

    /// Repaint the text layer and refresh the panel
    pub fn refresh(&mut self) -> Result<()> {
        let geometry = self.surface.geometry();
        redraw_text_layer(
            self.surface.pixels_mut()?,
            geometry,
            Some(&*self.grid),
            self.boxes,
        )?;
        self.surface.refresh()
    }

    fn refresh_on_change(&mut self) -> Result<()> {
        match self.grid.refresh_mode() {
            RefreshMode::OnTextChange => self.refresh(),
            RefreshMode::OnDemand => Ok(()),
        }
    }
}

/// Floating text boxes
///
/// Box edits only change box state; nothing is painted until
/// [`refresh`](Self::refresh) or [`refresh_all`](Self::refresh_all).
pub struct TextBoxes<'a, P: DisplayProvider> {
    boxes: &'a mut FloatingText,
    grid: Option<&'a TextGrid>,
    surface: Surface<'a, P>,
}

impl<'a, P: DisplayProvider> TextBoxes<'a, P> {
    pub(crate) fn new(
        boxes: &'a mut FloatingText,
        grid: Option<&'a TextGrid>,
        surface: Surface<'a, P>,
    ) -> Self {
        Self {
            boxes,
            grid,
            surface,
        }
    }

    pub fn max_pixel_width(&self) -> u16 {
        self.boxes.max_pixel_width()
    }

    pub fn max_pixel_height(&self) -> u16 {
        self.boxes.max_pixel_height()
    }

    pub fn max_box_width(&self) -> u16 {
        self.boxes.max_box_width()
    }

    pub fn max_box_height(&self) -> u16 {
        self.boxes.max_box_height()
    }

    pub fn create(&mut self, config: &TextBoxConfig) -> Result<TextBoxHandle> {
        self.boxes.create(config)
    }

    pub fn delete(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.boxes.delete(handle)
    }

    pub fn get(&self, handle: TextBoxHandle) -> Result<&TextBox> {
        self.boxes.get(handle)
    }

    pub fn enable(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.boxes.enable(handle)
    }

    pub fn disable(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.boxes.disable(handle)
    }

    pub fn is_visible(&self, handle: TextBoxHandle) -> Result<bool> {
        self.boxes.is_visible(handle)
    }

    pub fn clear(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.boxes.clear(handle)
    }

    pub fn move_to(&mut self, handle: TextBoxHandle, x: u16, y: u16) -> Result<()> {
        self.boxes.move_to(handle, x, y)
    }

    pub fn set_cursor(&mut self, handle: TextBoxHandle, x: u16, y: u16) -> Result<()> {
        self.boxes.set_cursor(handle, x, y)
    }

    pub fn cursor(&self, handle: TextBoxHandle) -> Result<(u16, u16)> {
        self.boxes.cursor(handle)
    }

    pub fn home(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.boxes.home(handle)
    }

    pub fn put_char(&mut self, handle: TextBoxHandle, c: u8) -> Result<Placement> {
        self.boxes.put(handle, c)
    }

    pub fn put_str(&mut self, handle: TextBoxHandle, s: impl AsRef<[u8]>) -> Result<usize> {
        self.boxes.put_str(handle, s.as_ref())
    }

    pub fn newline(&mut self, handle: TextBoxHandle) -> Result<Placement> {
        self.boxes.newline(handle)
    }

    pub fn backspace(&mut self, handle: TextBoxHandle) -> Result<Placement> {
        self.boxes.backspace(handle)
    }

    /// Paint one box over the text layer and refresh the panel
    ///
    /// Hidden boxes leave the layer as it is.
    pub fn refresh(&mut self, handle: TextBoxHandle) -> Result<()> {
        self.boxes.render(handle, self.surface.pixels_mut()?)?;
        self.surface.refresh()
    }

    /// Redraw the whole text layer and refresh the panel once
    ///
    /// The layer is wiped, the grid repainted if there is one, then every
    /// visible box in slot order. Returns how many boxes were painted.
    pub fn refresh_all(&mut self) -> Result<usize> {
        let geometry = self.surface.geometry();
        let painted = redraw_text_layer(
            self.surface.pixels_mut()?,
            geometry,
            self.grid,
            Some(&*self.boxes),
        )?;
        self.surface.refresh()?;
        Ok(painted)
    }
}

/// The numeric overlay
pub struct Led<'a, P: DisplayProvider> {
    overlay: &'a mut LedOverlay,
    surface: Surface<'a, P>,
}

impl<'a, P: DisplayProvider> Led<'a, P> {
    pub(crate) fn new(overlay: &'a mut LedOverlay, surface: Surface<'a, P>) -> Self {
        Self { overlay, surface }
    }

    /// Exclusive upper bound for a session's x
    pub fn max_x(&self) -> u16 {
        self.overlay.max_x()
    }

    /// Exclusive upper bound for a session's y
    pub fn max_y(&self) -> u16 {
        self.overlay.max_y()
    }

    /// Open a session, painting it straight away when it auto-refreshes
    pub fn open(&mut self, config: &LedConfig) -> Result<LedHandle> {
        let handle = self.overlay.open(config)?;
        if config.auto_refresh {
            self.refresh(handle)?;
        }
        Ok(handle)
    }

    /// Close a session
    ///
    /// Its digits stay on the layer until something overwrites them.
    pub fn close(&mut self, handle: LedHandle) -> Result<()> {
        self.overlay.close(handle)
    }

    pub fn session(&self, handle: LedHandle) -> Result<&LedSession> {
        self.overlay.session(handle)
    }

    /// Show a new value, repainting when the session auto-refreshes
    pub fn update(&mut self, handle: LedHandle, value: u32) -> Result<()> {
        self.overlay.update(handle, value)?;
        if self.overlay.session(handle)?.auto_refresh() {
            self.refresh(handle)?;
        }
        Ok(())
    }

    /// Paint the session's digits and refresh the panel
    pub fn refresh(&mut self, handle: LedHandle) -> Result<()> {
        self.overlay.render(handle, self.surface.pixels_mut()?)?;
        self.surface.refresh()
    }
}
