//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Stroke width for outlined marks, in canonical (photo) pixels
pub const MARK_LINE_WIDTH: f32 = 3.0;

/// Fill opacity for highlight blocks
pub const HIGHLIGHT_ALPHA: f32 = 0.35;

/// Color used for marks that carry no color of their own
pub const DEFAULT_MARK_COLOR: &str = "#FF3B30";

/// [`DEFAULT_MARK_COLOR`] as RGB bytes
pub const DEFAULT_MARK_RGB: [u8; 3] = [0xFF, 0x3B, 0x30];

/// Added photos are downscaled to at most this width before annotation
pub const DEFAULT_COMPRESS_MAX_WIDTH: u32 = 1200;

/// JPEG quality (1-100) for compressed photos
pub const DEFAULT_COMPRESS_QUALITY: u8 = 82;

/// JPEG quality (1-100) for exported composites
pub const EXPORT_JPEG_QUALITY: u8 = 90;

/// Area used when the technician has not picked one
pub const DEFAULT_AREA_ID: &str = "general";
