//! The display stack
//!
//! [`DisplayStack`] owns one display provider, the compositor layer table
//! and every subsystem's state. Subsystems are brought up explicitly, each
//! on its own layer, and driven through short-lived views:
//!
//! - [`Lines`]: line and shape graphics
//! - [`Text`]: the fixed text grid
//! - [`TextBoxes`]: floating text boxes
//! - [`Led`]: the numeric overlay
//!
//! The grid and the boxes share the text layer, which must be initialised
//! first.

mod views;

pub use views::{Led, Text, TextBoxes};

use crate::compositor::{Compositor, Layer, LayerOwner, Priority};
use crate::config::StackConfig;
use crate::error::{GfxError, Result};
use crate::geometry::Geometry;
use crate::graphics::Lines;
use crate::overlay::LedOverlay;
use crate::text::{FloatingText, RefreshMode, TextGrid, WrapMode};
use crate::traits::DisplayProvider;

/// Single owned graphics context for one display
pub struct DisplayStack<P: DisplayProvider> {
    display: P,
    geometry: Geometry,
    compositor: Compositor,
    line_layer: Option<Priority>,
    text_layer: Option<Priority>,
    led_layer: Option<Priority>,
    grid: Option<TextGrid>,
    boxes: Option<FloatingText>,
    led: Option<LedOverlay>,
}

impl<P: DisplayProvider> DisplayStack<P> {
    /// Capture the provider's geometry and start with no layers
    ///
    /// Fails with `NotReady` until the provider reports ready.
    pub fn new(display: P) -> Result<Self> {
        let geometry = Geometry::from_provider(&display)?;
        let compositor = Compositor::new(geometry.len())?;
        info!(
            "display stack on {}: {}x{} px, {} pages",
            display.name(),
            geometry.width,
            geometry.height,
            geometry.pages
        );

        Ok(Self {
            display,
            geometry,
            compositor,
            line_layer: None,
            text_layer: None,
            led_layer: None,
            grid: None,
            boxes: None,
            led: None,
        })
    }

    /// Create a stack and bring up the subsystems `config` selects
    pub fn with_config(display: P, config: &StackConfig) -> Result<Self> {
        if !config.priorities_distinct() {
            warn!("stack config puts two subsystems on one layer");
            return Err(GfxError::LayerOccupied);
        }

        let mut stack = Self::new(display)?;
        if config.needs_text_layer() {
            stack.init_text_layer(config.text_priority)?;
        }
        if config.text_grid {
            stack.init_text(config.refresh_mode, config.wrap_mode)?;
        }
        if config.lines {
            stack.init_lines(config.line_priority)?;
        }
        if config.led {
            stack.init_led(config.led_priority)?;
        }
        Ok(stack)
    }

    /// Geometry captured at creation
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn display(&self) -> &P {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut P {
        &mut self.display
    }

    /// Tear down the stack, handing the provider back
    pub fn into_inner(self) -> P {
        self.display
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    /// Register an application-owned layer
    ///
    /// A masked layer carries a mask after its pixels; see
    /// [`Layer::split_mut`].
    pub fn register_layer(&mut self, priority: Priority, masked: bool) -> Result<()> {
        self.compositor
            .register(priority, LayerOwner::External, masked)
    }

    /// Borrow any registered layer for writing
    pub fn layer_mut(&mut self, priority: Priority) -> Result<&mut Layer> {
        self.compositor.layer_mut(priority)
    }

    /// Merge every layer into the provider's framebuffer
    pub fn composite(&mut self) -> Result<()> {
        self.compositor.composite(self.display.framebuffer_mut())
    }

    /// Composite, then push the framebuffer to the panel
    pub fn refresh(&mut self) -> Result<()> {
        refresh_display(&mut self.compositor, &mut self.display)
    }

    /// Send a raw frame to the panel, bypassing the layers
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        if frame.len() != self.geometry.len() {
            return Err(GfxError::Geometry);
        }
        self.display.write_frame(frame)?;
        Ok(())
    }

    /// Blank the panel without touching any buffer
    pub fn clear_physical(&mut self) -> Result<()> {
        self.display.clear_physical()?;
        Ok(())
    }

    /// Bring up line graphics on `priority`
    pub fn init_lines(&mut self, priority: Priority) -> Result<()> {
        if self.line_layer.is_some() {
            return Ok(());
        }
        self.compositor
            .register(priority, LayerOwner::Lines, false)?;
        self.line_layer = Some(priority);
        info!("line graphics on layer {}", priority);
        Ok(())
    }

    /// Drawing surface over the line layer
    pub fn lines(&mut self) -> Result<Lines<'_>> {
        let priority = self.line_layer.ok_or(GfxError::NotInitialized)?;
        let layer = self.compositor.layer_mut(priority)?;
        Lines::new(layer.pixels_mut(), self.geometry)
    }

    /// Bring up the shared text layer and the floating box pool
    pub fn init_text_layer(&mut self, priority: Priority) -> Result<()> {
        if self.text_layer.is_some() {
            return Ok(());
        }
        self.compositor
            .register(priority, LayerOwner::Text, false)?;
        self.text_layer = Some(priority);
        self.boxes = Some(FloatingText::new(self.geometry));
        info!("text layer on {}", priority);
        Ok(())
    }

    /// Bring up the fixed text grid on the text layer
    pub fn init_text(&mut self, refresh: RefreshMode, wrap: WrapMode) -> Result<()> {
        if self.text_layer.is_none() {
            return Err(GfxError::NotInitialized);
        }
        if self.grid.is_some() {
            return Ok(());
        }
        let grid = TextGrid::new(self.geometry, refresh, wrap)?;
        info!("text grid {}x{} cells", grid.width(), grid.height());
        self.grid = Some(grid);
        Ok(())
    }

    /// The fixed text grid
    pub fn text(&mut self) -> Result<Text<'_, P>> {
        let layer = self.text_layer.ok_or(GfxError::NotInitialized)?;
        let grid = self.grid.as_mut().ok_or(GfxError::NotInitialized)?;
        Ok(Text::new(
            grid,
            self.boxes.as_ref(),
            Surface::new(&mut self.compositor, &mut self.display, layer, self.geometry),
        ))
    }

    /// The floating text boxes
    pub fn text_boxes(&mut self) -> Result<TextBoxes<'_, P>> {
        let layer = self.text_layer.ok_or(GfxError::NotInitialized)?;
        let boxes = self.boxes.as_mut().ok_or(GfxError::NotInitialized)?;
        Ok(TextBoxes::new(
            boxes,
            self.grid.as_ref(),
            Surface::new(&mut self.compositor, &mut self.display, layer, self.geometry),
        ))
    }

    /// Bring up the numeric overlay on `priority`
    pub fn init_led(&mut self, priority: Priority) -> Result<()> {
        if self.led_layer.is_some() {
            return Ok(());
        }
        self.compositor.register(priority, LayerOwner::Led, false)?;
        self.led_layer = Some(priority);
        self.led = Some(LedOverlay::new(self.geometry));
        info!("LED overlay on layer {}", priority);
        Ok(())
    }

    /// The numeric overlay
    pub fn led(&mut self) -> Result<Led<'_, P>> {
        let layer = self.led_layer.ok_or(GfxError::NotInitialized)?;
        let overlay = self.led.as_mut().ok_or(GfxError::NotInitialized)?;
        Ok(Led::new(
            overlay,
            Surface::new(&mut self.compositor, &mut self.display, layer, self.geometry),
        ))
    }
}

fn refresh_display<P: DisplayProvider>(compositor: &mut Compositor, display: &mut P) -> Result<()> {
    compositor.composite(display.framebuffer_mut())?;
    display.flush().map_err(|err| {
        warn!("display flush failed: {}", err);
        GfxError::from(err)
    })
}

/// A subsystem's layer plus what it needs to refresh the panel
pub(crate) struct Surface<'a, P: DisplayProvider> {
    compositor: &'a mut Compositor,
    display: &'a mut P,
    layer: Priority,
    geometry: Geometry,
}

impl<'a, P: DisplayProvider> Surface<'a, P> {
    fn new(
        compositor: &'a mut Compositor,
        display: &'a mut P,
        layer: Priority,
        geometry: Geometry,
    ) -> Self {
        Self {
            compositor,
            display,
            layer,
            geometry,
        }
    }

    pub(crate) fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub(crate) fn pixels_mut(&mut self) -> Result<&mut [u8]> {
        Ok(self.compositor.layer_mut(self.layer)?.pixels_mut())
    }

    pub(crate) fn refresh(&mut self) -> Result<()> {
        refresh_display(self.compositor, self.display)
    }
}

#[cfg(test)]
mod tests;
