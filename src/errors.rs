//! Error Types
//!
//! The error policy follows the frame-loop contract: anything that would
//! abort a single draw call is absorbed at that call's boundary (logged,
//! degraded to pass-through), so per-draw paths never return `Err`. Only
//! construction-time and hand-off failures surface as [`PrismError`].
//! Use-after-destroy is a programming error guarded by `debug_assert!`,
//! not an error variant.

use thiserror::Error;

use crate::targets::image::ImageFormat;

/// The main error type for the Prism shader core.
#[derive(Error, Debug)]
pub enum PrismError {
    /// A clear pass was requested over an image whose format has no color
    /// element type (e.g. a depth attachment).
    #[error("image format {format:?} has no color element type to clear")]
    UnsupportedClearFormat {
        /// The declared format of the offending image.
        format: ImageFormat,
    },

    /// A CPU-side texture copy handed to the export worker does not match
    /// its declared dimensions.
    #[error("texture data length {actual} does not match {width}x{height} RGBA ({expected})")]
    InvalidImageData {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// A shader pack descriptor failed load-time validation.
    #[error("invalid shader pack descriptor: {0}")]
    InvalidPackDescriptor(String),
}

/// Alias for `Result<T, PrismError>`.
pub type Result<T> = std::result::Result<T, PrismError>;
