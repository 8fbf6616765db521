//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Drawer width in pixels (largest step of the theme space scale)
pub const DRAWER_WIDTH: f32 = 347.0;

/// Country shown in the drawer header
pub const COUNTRY: &str = "Sierra Leone";

/// ISO country code shown in the drawer header
pub const COUNTRY_CODE: &str = "SL";

/// Map center longitude at startup
pub const MAP_CENTER_LON: f32 = 37.85335;

/// Map center latitude at startup
pub const MAP_CENTER_LAT: f32 = 0.44014;

/// World units per degree of longitude/latitude for the placeholder
/// layer quads
pub const WORLD_UNITS_PER_DEGREE: f32 = 100.0;
