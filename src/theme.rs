//! Centralized color theme for the application.
//!
//! This module provides all colors and spacing used throughout the drawer
//! and map rendering. Modify values here to change the color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Brand Palette
// ============================================================================

/// Primary brand blue, used for headings and checkbox labels
pub const PRIMARY: egui::Color32 = egui::Color32::from_rgb(0x30, 0x4C, 0xA2);

/// Orange accent for selected-layer emphasis
pub const HIGHLIGHT: egui::Color32 = egui::Color32::from_rgb(0xF9, 0x8E, 0x08);

/// 15% opacity highlight, used as icon background when a group has
/// selected layers
pub const OFFLIGHT: egui::Color32 = egui::Color32::from_rgb(0xFD, 0xEF, 0xD9);

/// Page background white
pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0xFF, 0xFF, 0xFF);

/// Muted grey for control rows and idle icon backgrounds
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(0xF4, 0xF5, 0xF7);

/// Light blue-grey for panel borders
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xDB, 0xDE, 0xEF);

/// Body text grey
pub const TEXT: egui::Color32 = egui::Color32::from_rgb(0x37, 0x3E, 0x49);

// ============================================================================
// Map Layer Colors
// ============================================================================

/// Boundary overlays (borders, districts)
pub const LAYER_BOUNDARY: Color = Color::srgba(0.19, 0.30, 0.64, 0.35);

/// Network overlays (transmission, distribution)
pub const LAYER_NETWORK: Color = Color::srgba(0.98, 0.56, 0.03, 0.55);

/// Point-of-interest overlays (schools, banks, pharmacies, ...)
pub const LAYER_POINTS: Color = Color::srgba(0.22, 0.24, 0.29, 0.45);

// ============================================================================
// Spacing and Type Scale
// ============================================================================

/// Spacing scale in pixels; index with [`space`]
const SPACE: [f32; 7] = [0.0, 4.0, 8.0, 16.0, 32.0, 70.0, 347.0];

/// Font size scale in points; index with [`font_size`]
const FONT_SIZES: [f32; 5] = [10.0, 12.0, 14.0, 16.0, 32.0];

pub fn space(step: usize) -> f32 {
    SPACE[step.min(SPACE.len() - 1)]
}

pub fn font_size(step: usize) -> f32 {
    FONT_SIZES[step.min(FONT_SIZES.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_scale_is_monotonic() {
        for step in 0..6 {
            assert!(space(step) < space(step + 1));
        }
    }

    #[test]
    fn test_out_of_range_steps_clamp() {
        assert_eq!(space(100), space(6));
        assert_eq!(font_size(100), font_size(4));
    }
}
