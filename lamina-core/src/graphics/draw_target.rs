//! `embedded-graphics` adaptor for the line layer
//!
//! Lets `embedded-graphics` primitives, images and fonts draw into the line
//! layer. `BinaryColor::On` is ink. Pixels off the layer are dropped.

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use super::Lines;

impl DrawTarget for Lines<'_> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_clipped(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

impl OriginDimensions for Lines<'_> {
    fn size(&self) -> Size {
        let geometry = self.geometry();
        Size::new(u32::from(geometry.width), u32::from(geometry.height))
    }
}
