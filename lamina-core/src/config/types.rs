//! Stack configuration
//!
//! Selects which subsystems come up and at which layer priority. The
//! defaults reproduce the usual arrangement: text on `Layer1`, the LED
//! overlay on `Layer2` and line graphics on top.

use crate::compositor::Priority;
use crate::text::{RefreshMode, WrapMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bring-up configuration for a [`DisplayStack`](crate::DisplayStack)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StackConfig {
    /// Text layer priority, shared by the fixed grid and floating boxes
    pub text_priority: Priority,
    /// Line graphics layer priority
    pub line_priority: Priority,
    /// LED overlay layer priority
    pub led_priority: Priority,
    /// When the fixed text grid re-renders
    pub refresh_mode: RefreshMode,
    /// Fixed text grid line wrap
    pub wrap_mode: WrapMode,
    /// Bring up the fixed text grid (implies the text layer)
    pub text_grid: bool,
    /// Bring up the text layer for floating boxes
    pub text_boxes: bool,
    /// Bring up line graphics
    pub lines: bool,
    /// Bring up the LED overlay
    pub led: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            text_priority: Priority::Layer1,
            line_priority: Priority::Foreground,
            led_priority: Priority::Layer2,
            refresh_mode: RefreshMode::OnTextChange,
            wrap_mode: WrapMode::On,
            text_grid: true,
            text_boxes: true,
            lines: true,
            led: false,
        }
    }
}

impl StackConfig {
    /// Whether any text surface needs the shared text layer
    pub fn needs_text_layer(&self) -> bool {
        self.text_grid || self.text_boxes
    }

    /// Check that no two enabled subsystems share a layer slot
    pub fn priorities_distinct(&self) -> bool {
        let mut used = [false; crate::config::LAYER_COUNT];
        let wanted = [
            (self.needs_text_layer(), self.text_priority),
            (self.lines, self.line_priority),
            (self.led, self.led_priority),
        ];
        for (enabled, priority) in wanted {
            if !enabled {
                continue;
            }
            let slot = priority.index();
            if used[slot] {
                return false;
            }
            used[slot] = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_priorities_distinct() {
        let config = StackConfig::default();
        assert!(config.priorities_distinct());
        assert!(config.needs_text_layer());
    }

    #[test]
    fn test_clashing_priorities() {
        let config = StackConfig {
            led: true,
            led_priority: Priority::Foreground,
            ..Default::default()
        };
        assert!(!config.priorities_distinct());
    }

    #[test]
    fn test_disabled_subsystem_does_not_clash() {
        let config = StackConfig {
            lines: false,
            line_priority: Priority::Layer1,
            ..Default::default()
        };
        assert!(config.priorities_distinct());
    }
}
