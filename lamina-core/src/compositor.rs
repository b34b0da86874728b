//! Priority-ordered layer compositor
//!
//! Up to [`LAYER_COUNT`] layers, one per [`Priority`] slot. Compositing
//! clears the hardware framebuffer and merges every occupied slot from
//! `Background` up to `Foreground`. A later layer can only add ink unless it
//! carries a mask, which clears the masked bits before its pixels are ORed in.
//!
//! A masked layer stores its mask in the second half of a double-length
//! buffer, right after its pixels.

use heapless::Vec;

use crate::buffer::{self, word_aligned};
use crate::config::{LAYER_COUNT, MAX_FRAMEBUFFER_LEN};
use crate::error::{GfxError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Backing capacity of one layer: pixels plus an optional mask
pub const LAYER_CAPACITY: usize = 2 * MAX_FRAMEBUFFER_LEN;

/// Layer slot, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Priority {
    #[default]
    Background,
    /// Conventionally the text layer
    Layer1,
    Layer2,
    Foreground,
}

impl Priority {
    /// Every slot in compositing order
    pub const ALL: [Priority; LAYER_COUNT] = [
        Priority::Background,
        Priority::Layer1,
        Priority::Layer2,
        Priority::Foreground,
    ];

    /// Slot index, `0..LAYER_COUNT`
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Priority {
    type Error = GfxError;

    fn try_from(value: u8) -> Result<Self> {
        Priority::ALL
            .get(value as usize)
            .copied()
            .ok_or(GfxError::InvalidPriority)
    }
}

/// Which subsystem registered a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayerOwner {
    /// Line and shape graphics
    Lines,
    /// Fixed text grid and floating text boxes
    Text,
    /// LED-style numeric overlay
    Led,
    /// Application-owned layer
    External,
}

/// One registered layer
#[derive(Debug)]
pub struct Layer {
    owner: LayerOwner,
    frame_len: usize,
    masked: bool,
    data: Vec<u8, LAYER_CAPACITY>,
}

impl Layer {
    fn new(owner: LayerOwner, frame_len: usize, masked: bool) -> Result<Self> {
        let mut data = Vec::new();
        let len = if masked { 2 * frame_len } else { frame_len };
        data.resize(len, 0).map_err(|_| GfxError::Geometry)?;
        Ok(Self {
            owner,
            frame_len,
            masked,
            data,
        })
    }

    /// Subsystem that owns this layer
    pub fn owner(&self) -> LayerOwner {
        self.owner
    }

    /// Whether the layer carries a mask
    pub fn is_masked(&self) -> bool {
        self.masked
    }

    /// Pixel data, one frame long
    pub fn pixels(&self) -> &[u8] {
        &self.data[..self.frame_len]
    }

    /// Pixel data, writable
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.frame_len]
    }

    /// Mask, if the layer was registered with one
    pub fn mask(&self) -> Option<&[u8]> {
        self.masked.then(|| &self.data[self.frame_len..])
    }

    /// Pixels and mask, both writable
    pub fn split_mut(&mut self) -> (&mut [u8], Option<&mut [u8]>) {
        let (pixels, mask) = self.data.split_at_mut(self.frame_len);
        (pixels, self.masked.then_some(mask))
    }

    /// Zero pixels and mask
    pub fn clear(&mut self) {
        self.data.fill(0);
    }
}

/// Layer table plus the hardware-buffer merge
pub struct Compositor {
    layers: [Option<Layer>; LAYER_COUNT],
    frame_len: usize,
    fast_clear: Option<bool>,
}

impl Compositor {
    /// Empty table for a `frame_len`-byte hardware framebuffer
    pub fn new(frame_len: usize) -> Result<Self> {
        if frame_len == 0 || frame_len > MAX_FRAMEBUFFER_LEN {
            return Err(GfxError::Geometry);
        }
        Ok(Self {
            layers: [None, None, None, None],
            frame_len,
            fast_clear: None,
        })
    }

    /// Hardware framebuffer length this table composes for
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Claim a slot for `owner`
    ///
    /// A slot holds at most one layer; registering over an occupied slot is
    /// rejected and the existing layer is left untouched.
    pub fn register(&mut self, priority: Priority, owner: LayerOwner, masked: bool) -> Result<()> {
        let slot = &mut self.layers[priority.index()];
        if let Some(existing) = slot {
            warn!(
                "layer {} already held by {}, rejecting {}",
                priority,
                existing.owner,
                owner
            );
            return Err(GfxError::LayerOccupied);
        }

        *slot = Some(Layer::new(owner, self.frame_len, masked)?);
        debug!("layer {} registered for {} (masked: {})", priority, owner, masked);
        Ok(())
    }

    /// Owner of a slot, `None` when free
    pub fn owner(&self, priority: Priority) -> Option<LayerOwner> {
        self.layers[priority.index()].as_ref().map(Layer::owner)
    }

    /// Borrow a registered layer
    pub fn layer(&self, priority: Priority) -> Result<&Layer> {
        self.layers[priority.index()]
            .as_ref()
            .ok_or(GfxError::NotInitialized)
    }

    /// Mutably borrow a registered layer
    pub fn layer_mut(&mut self, priority: Priority) -> Result<&mut Layer> {
        self.layers[priority.index()]
            .as_mut()
            .ok_or(GfxError::NotInitialized)
    }

    /// Clear `hardware` and merge every layer into it, lowest priority first
    pub fn composite(&mut self, hardware: &mut [u8]) -> Result<()> {
        if hardware.len() != self.frame_len {
            return Err(GfxError::Geometry);
        }

        // Decided once, on the first composite
        let fast = *self
            .fast_clear
            .get_or_insert_with(|| word_aligned(hardware.len()));
        buffer::clear(hardware, fast)?;

        for layer in self.layers.iter().flatten() {
            buffer::merge(layer.pixels(), layer.mask(), hardware)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_raw() {
        assert_eq!(Priority::try_from(0), Ok(Priority::Background));
        assert_eq!(Priority::try_from(3), Ok(Priority::Foreground));
        assert_eq!(Priority::try_from(4), Err(GfxError::InvalidPriority));
        assert!(Priority::Layer2 > Priority::Layer1);
    }

    #[test]
    fn test_register_rejects_occupied_slot() {
        let mut comp = Compositor::new(8).unwrap();
        comp.register(Priority::Layer2, LayerOwner::Led, false).unwrap();
        comp.layer_mut(Priority::Layer2).unwrap().pixels_mut()[0] = 0xAA;

        assert_eq!(
            comp.register(Priority::Layer2, LayerOwner::External, true),
            Err(GfxError::LayerOccupied)
        );
        let layer = comp.layer(Priority::Layer2).unwrap();
        assert_eq!(layer.owner(), LayerOwner::Led);
        assert_eq!(layer.pixels()[0], 0xAA);
    }

    #[test]
    fn test_unregistered_layer() {
        let mut comp = Compositor::new(8).unwrap();
        assert_eq!(comp.owner(Priority::Background), None);
        assert!(matches!(
            comp.layer_mut(Priority::Background),
            Err(GfxError::NotInitialized)
        ));
    }

    #[test]
    fn test_new_rejects_bad_length() {
        assert!(Compositor::new(0).is_err());
        assert!(Compositor::new(MAX_FRAMEBUFFER_LEN + 1).is_err());
    }

    #[test]
    fn test_composite_ors_unmasked_layers() {
        let mut comp = Compositor::new(4).unwrap();
        comp.register(Priority::Background, LayerOwner::External, false).unwrap();
        comp.register(Priority::Foreground, LayerOwner::Lines, false).unwrap();
        comp.layer_mut(Priority::Background).unwrap().pixels_mut().fill(0xF0);
        comp.layer_mut(Priority::Foreground).unwrap().pixels_mut().fill(0x01);

        let mut hw = [0x5Au8; 4];
        comp.composite(&mut hw).unwrap();
        assert_eq!(hw, [0xF1; 4]);
    }

    #[test]
    fn test_masked_layer_punches_hole() {
        let mut comp = Compositor::new(3).unwrap();
        comp.register(Priority::Background, LayerOwner::External, false).unwrap();
        comp.register(Priority::Layer1, LayerOwner::Text, true).unwrap();
        comp.register(Priority::Foreground, LayerOwner::External, false).unwrap();

        comp.layer_mut(Priority::Background).unwrap().pixels_mut().fill(0xFF);
        {
            let (pixels, mask) = comp.layer_mut(Priority::Layer1).unwrap().split_mut();
            pixels.copy_from_slice(&[0x00, 0x01, 0x00]);
            mask.unwrap().copy_from_slice(&[0x00, 0x0F, 0xFF]);
        }
        comp.layer_mut(Priority::Foreground).unwrap().pixels_mut()[2] = 0x80;

        let mut hw = [0u8; 3];
        comp.composite(&mut hw).unwrap();
        // Mask clears background bits, pixels and the foreground re-add ink
        assert_eq!(hw, [0xFF, 0xF1, 0x80]);
    }

    #[test]
    fn test_composite_clears_stale_hardware_bits() {
        let mut comp = Compositor::new(4).unwrap();
        let mut hw = [0xFFu8; 4];
        comp.composite(&mut hw).unwrap();
        assert_eq!(hw, [0; 4]);
        assert_eq!(comp.fast_clear, Some(true));
    }

    #[test]
    fn test_composite_length_mismatch() {
        let mut comp = Compositor::new(4).unwrap();
        let mut hw = [0u8; 5];
        assert_eq!(comp.composite(&mut hw), Err(GfxError::Geometry));
    }

    #[test]
    fn test_layer_mask_accessors() {
        let mut comp = Compositor::new(2).unwrap();
        comp.register(Priority::Layer1, LayerOwner::Text, true).unwrap();
        comp.register(Priority::Layer2, LayerOwner::Led, false).unwrap();
        assert_eq!(comp.layer(Priority::Layer1).unwrap().mask(), Some(&[0u8, 0][..]));
        assert_eq!(comp.layer(Priority::Layer2).unwrap().mask(), None);

        let layer = comp.layer_mut(Priority::Layer1).unwrap();
        layer.split_mut().0.fill(1);
        layer.clear();
        assert_eq!(layer.pixels(), &[0, 0]);
    }
}
