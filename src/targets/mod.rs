//! Render Target Resources
//!
//! Pack-owned GPU images and the clear passes that zero them between
//! frames.

pub mod clear_pass;
pub mod image;

pub use clear_pass::{ClearFlags, FullClearPass, ImageClearPass};
pub use image::{ImageFormat, ImageResource, PixelKind};
