use super::*;
use crate::config::MAX_FRAMEBUFFER_LEN;
use crate::graphics::Colour;
use crate::overlay::glyphs::{DIGIT_SPACING, DIGIT_WIDTH};
use crate::overlay::LedConfig;
use crate::text::{Placement, TextBoxConfig};
use crate::traits::DisplayError;

// Mock panel for testing
struct MockDisplay {
    width: u16,
    height: u16,
    ready: bool,
    fail_flush: bool,
    framebuffer: heapless::Vec<u8, MAX_FRAMEBUFFER_LEN>,
    panel: heapless::Vec<u8, MAX_FRAMEBUFFER_LEN>,
    flushes: usize,
}

impl MockDisplay {
    fn new(width: u16, height: u16) -> Self {
        let len = width as usize * (height as usize / 8);
        let mut framebuffer: heapless::Vec<u8, MAX_FRAMEBUFFER_LEN> = heapless::Vec::new();
        framebuffer.resize(len, 0).unwrap();
        Self {
            width,
            height,
            ready: true,
            fail_flush: false,
            panel: framebuffer.clone(),
            framebuffer,
            flushes: 0,
        }
    }
}

impl DisplayProvider for MockDisplay {
    fn pixel_width(&self) -> u16 {
        self.width
    }

    fn pixel_height(&self) -> u16 {
        self.height
    }

    fn page_height(&self) -> u16 {
        self.height / 8
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

    fn flush(&mut self) -> core::result::Result<(), DisplayError> {
        if self.fail_flush {
            return Err(DisplayError::Communication);
        }
        self.panel.clone_from(&self.framebuffer);
        self.flushes += 1;
        Ok(())
    }

    fn write_frame(&mut self, frame: &[u8]) -> core::result::Result<(), DisplayError> {
        self.panel.clear();
        self.panel
            .extend_from_slice(frame)
            .map_err(|_| DisplayError::InvalidArgument)
    }

    fn clear_physical(&mut self) -> core::result::Result<(), DisplayError> {
        self.panel.fill(0);
        Ok(())
    }
}

fn stack() -> DisplayStack<MockDisplay> {
    DisplayStack::new(MockDisplay::new(128, 64)).unwrap()
}

#[test]
fn test_new_requires_ready_provider() {
    let mut display = MockDisplay::new(128, 64);
    display.ready = false;
    assert!(matches!(DisplayStack::new(display), Err(GfxError::NotReady)));

    let stack = stack();
    assert_eq!(stack.geometry(), Geometry::new(128, 64));
}

#[test]
fn test_new_rejects_ragged_height() {
    let mut display = MockDisplay::new(128, 64);
    display.height = 60;
    assert!(matches!(DisplayStack::new(display), Err(GfxError::Geometry)));
}

#[test]
fn test_views_before_init() {
    let mut stack = stack();
    assert!(matches!(stack.lines(), Err(GfxError::NotInitialized)));
    assert!(matches!(stack.text(), Err(GfxError::NotInitialized)));
    assert!(matches!(stack.text_boxes(), Err(GfxError::NotInitialized)));
    assert!(matches!(stack.led(), Err(GfxError::NotInitialized)));
    assert_eq!(
        stack.init_text(RefreshMode::OnDemand, WrapMode::On),
        Err(GfxError::NotInitialized)
    );
}

#[test]
fn test_repeated_init_is_noop() {
    let mut stack = stack();
    stack.init_lines(Priority::Foreground).unwrap();
    stack.lines().unwrap().plot(0, 0, Colour::Black).unwrap();
    stack.init_lines(Priority::Foreground).unwrap();
    assert!(stack.lines().unwrap().pixel(0, 0).unwrap());
}

#[test]
fn test_init_on_occupied_slot() {
    let mut stack = stack();
    stack.register_layer(Priority::Layer2, false).unwrap();
    assert_eq!(stack.init_led(Priority::Layer2), Err(GfxError::LayerOccupied));
    assert!(matches!(stack.led(), Err(GfxError::NotInitialized)));
}

#[test]
fn test_refresh_pushes_composite() {
    let mut stack = stack();
    stack.init_lines(Priority::Foreground).unwrap();
    stack.register_layer(Priority::Background, false).unwrap();
    stack.layer_mut(Priority::Background).unwrap().pixels_mut()[5] = 0xF0;
    stack.lines().unwrap().plot(5, 0, Colour::Black).unwrap();

    stack.refresh().unwrap();
    let display = stack.display();
    assert_eq!(display.flushes, 1);
    assert_eq!(display.panel[5], 0xF1);
    assert_eq!(display.framebuffer[5], 0xF1);
}

#[test]
fn test_masked_external_layer_over_lines() {
    let mut stack = stack();
    stack.init_lines(Priority::Background).unwrap();
    stack.register_layer(Priority::Foreground, true).unwrap();
    stack
        .lines()
        .unwrap()
        .filled_rect(0, 0, 7, 7, Colour::Black)
        .unwrap();
    {
        let (pixels, mask) = stack.layer_mut(Priority::Foreground).unwrap().split_mut();
        mask.unwrap()[..4].fill(0xFF);
        pixels[0] = 0x18;
    }
    stack.composite().unwrap();
    let fb = stack.display().framebuffer();
    assert_eq!(&fb[..8], &[0x18, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn test_refresh_failure_surfaces() {
    let mut stack = stack();
    stack.display_mut().fail_flush = true;
    assert_eq!(
        stack.refresh(),
        Err(GfxError::Display(DisplayError::Communication))
    );
}

#[test]
fn test_write_frame_checks_length() {
    let mut stack = stack();
    let frame = [0xAAu8; 1024];
    stack.write_frame(&frame).unwrap();
    assert_eq!(stack.display().panel[1023], 0xAA);
    assert_eq!(stack.write_frame(&frame[..10]), Err(GfxError::Geometry));
    stack.clear_physical().unwrap();
    assert_eq!(stack.display().panel[1023], 0);
}

#[test]
fn test_text_on_change_refreshes_per_char() {
    let mut stack = stack();
    stack.init_text_layer(Priority::Layer1).unwrap();
    stack.init_text(RefreshMode::OnTextChange, WrapMode::On).unwrap();

    let mut text = stack.text().unwrap();
    assert_eq!(text.put_char(b'A'), Ok(Placement::Placed));
    assert_eq!(text.put_str("BC"), Ok(2));
    drop(text);

    // One refresh for the char, one for the whole string
    let display = stack.display();
    assert_eq!(display.flushes, 2);
    // Cell 0 starts at the one-pixel left margin
    assert_eq!(display.panel[1..6], [0x7C, 0x12, 0x11, 0x12, 0x7C]);
}

#[test]
fn test_text_on_demand_waits_for_refresh() {
    let mut stack = stack();
    stack.init_text_layer(Priority::Layer1).unwrap();
    stack.init_text(RefreshMode::OnDemand, WrapMode::Off).unwrap();

    let mut text = stack.text().unwrap();
    assert_eq!((text.width(), text.height()), (21, 8));
    text.put_str("HELLO").unwrap();
    assert_eq!(text.cursor(), (5, 0));
    drop(text);
    assert_eq!(stack.display().flushes, 0);

    let mut text = stack.text().unwrap();
    text.refresh().unwrap();
    text.set_refresh_mode(RefreshMode::OnTextChange);
    text.clear().unwrap();
    assert_eq!(text.cursor(), (0, 0));
    drop(text);
    assert_eq!(stack.display().flushes, 2);
    assert!(stack.display().panel.iter().all(|&b| b == 0));
}

#[test]
fn test_text_box_refresh_all_batches() {
    let mut stack = stack();
    stack.init_text_layer(Priority::Layer1).unwrap();

    let mut boxes = stack.text_boxes().unwrap();
    let a = boxes
        .create(&TextBoxConfig {
            width: 2,
            height: 1,
            ..Default::default()
        })
        .unwrap();
    let b = boxes
        .create(&TextBoxConfig {
            y: 20,
            width: 2,
            height: 1,
            ..Default::default()
        })
        .unwrap();
    boxes.put_str(a, "AB").unwrap();
    boxes.put_str(b, "CD").unwrap();
    assert_eq!(boxes.refresh_all(), Ok(2));

    // Moving a box and redrawing leaves no trail
    boxes.move_to(a, 40, 40).unwrap();
    assert_eq!(boxes.refresh_all(), Ok(2));
    drop(boxes);

    let display = stack.display();
    assert_eq!(display.flushes, 2);
    assert!(display.panel[..12].iter().all(|&c| c == 0));
    assert_ne!(display.panel[5 * 128 + 41], 0);
}

#[test]
fn test_text_boxes_over_grid() {
    let mut stack = stack();
    stack.init_text_layer(Priority::Layer1).unwrap();
    stack.init_text(RefreshMode::OnDemand, WrapMode::On).unwrap();
    stack.text().unwrap().put_str("ABC").unwrap();

    let mut boxes = stack.text_boxes().unwrap();
    let h = boxes
        .create(&TextBoxConfig {
            x: 60,
            y: 0,
            width: 1,
            height: 1,
            ..Default::default()
        })
        .unwrap();
    boxes.put_char(h, b'Z').unwrap();
    boxes.refresh_all().unwrap();
    drop(boxes);

    let panel = &stack.display().panel;
    assert_eq!(panel[1], 0x7C);
    assert_ne!(panel[61], 0);
}

#[test]
fn test_grid_refresh_keeps_boxes() {
    let mut stack = stack();
    stack.init_text_layer(Priority::Layer1).unwrap();
    stack.init_text(RefreshMode::OnTextChange, WrapMode::On).unwrap();

    let mut boxes = stack.text_boxes().unwrap();
    let h = boxes
        .create(&TextBoxConfig {
            x: 60,
            y: 0,
            width: 1,
            height: 1,
            ..Default::default()
        })
        .unwrap();
    boxes.put_char(h, b'Z').unwrap();
    boxes.refresh_all().unwrap();
    drop(boxes);
    let column = stack.display().panel[61];
    assert_ne!(column, 0);

    // A grid write repaints the shared layer without losing the box
    stack.text().unwrap().put_char(b'Q').unwrap();
    let panel = &stack.display().panel;
    assert_eq!(panel[61], column);
    assert_ne!(panel[1], 0);

    // Hidden boxes stay off after the next grid repaint
    stack.text_boxes().unwrap().disable(h).unwrap();
    stack.text().unwrap().put_char(b'R').unwrap();
    assert!(stack.display().panel[60..66].iter().all(|&c| c == 0));
}

#[test]
fn test_led_auto_refresh_and_close() {
    let mut stack = stack();
    stack.init_led(Priority::Layer2).unwrap();

    let mut led = stack.led().unwrap();
    let h = led
        .open(&LedConfig {
            x: 0,
            y: 0,
            digits: 2,
            initial: Some(7),
            auto_refresh: true,
        })
        .unwrap();
    led.update(h, 150).unwrap();
    assert_eq!(led.session(h).unwrap().digits().as_slice(), &[Some(5), Some(0)]);
    led.close(h).unwrap();
    assert!(led.update(h, 1).is_err());
    assert!(led.refresh(h).is_err());
    drop(led);

    let display = stack.display();
    assert_eq!(display.flushes, 2);
    // "5" sits in the left slot, "0" in the right
    let right = (DIGIT_WIDTH + DIGIT_SPACING) as usize;
    assert_ne!(display.panel[0], 0);
    assert_ne!(display.panel[right], 0);
}

#[test]
fn test_led_manual_refresh() {
    let mut stack = stack();
    stack.init_led(Priority::Layer2).unwrap();
    let mut led = stack.led().unwrap();
    let h = led
        .open(&LedConfig {
            auto_refresh: false,
            ..Default::default()
        })
        .unwrap();
    led.update(h, 5).unwrap();
    drop(led);
    assert_eq!(stack.display().flushes, 0);

    stack.led().unwrap().refresh(h).unwrap();
    assert_eq!(stack.display().flushes, 1);
}

#[test]
fn test_with_config_brings_up_selection() {
    let config = StackConfig {
        led: true,
        ..Default::default()
    };
    let mut stack = DisplayStack::with_config(MockDisplay::new(128, 64), &config).unwrap();
    assert!(stack.lines().is_ok());
    assert!(stack.text().is_ok());
    assert!(stack.text_boxes().is_ok());
    assert!(stack.led().is_ok());
    assert_eq!(stack.compositor().owner(Priority::Layer1), Some(LayerOwner::Text));
    assert_eq!(stack.compositor().owner(Priority::Background), None);

    let clash = StackConfig {
        led: true,
        led_priority: Priority::Layer1,
        ..Default::default()
    };
    assert!(matches!(
        DisplayStack::with_config(MockDisplay::new(128, 64), &clash),
        Err(GfxError::LayerOccupied)
    ));
}

#[test]
fn test_into_inner_returns_provider() {
    let mut stack = stack();
    stack.refresh().unwrap();
    let display = stack.into_inner();
    assert_eq!(display.flushes, 1);
}
