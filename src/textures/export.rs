//! Debug Texture Export
//!
//! Writes a CPU-side copy of a texture to disk as a PNG for shader-pack
//! debugging. The pixel data is handed off to a worker thread once and
//! never touched again; the worker must not (and cannot) reach the GPU
//! context. Encoding failures are logged, not propagated — a failed dump
//! never affects the frame.

use std::path::PathBuf;
use std::thread::JoinHandle;

use log::{debug, error};

use crate::errors::{PrismError, Result};

/// Spawns a worker that encodes `pixels` (tightly packed RGBA8, row-major)
/// to a PNG at `path`.
///
/// Validates the buffer length against the declared dimensions before the
/// hand-off; a mismatched copy is rejected synchronously.
pub fn export_rgba_png(
    path: PathBuf,
    width: u32,
    height: u32,
    pixels: Vec<u8>,
) -> Result<JoinHandle<()>> {
    let expected = width as usize * height as usize * 4;
    if pixels.len() != expected {
        return Err(PrismError::InvalidImageData {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    let handle = std::thread::spawn(move || {
        let Some(image) = image::RgbaImage::from_raw(width, height, pixels) else {
            error!("texture export: could not assemble {width}x{height} image");
            return;
        };

        match image.save(&path) {
            Ok(()) => debug!("texture export: wrote {}", path.display()),
            Err(err) => error!("texture export: failed to write {}: {err}", path.display()),
        }
    });

    Ok(handle)
}
