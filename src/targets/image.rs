//! Image Resources
//!
//! A GPU image together with its declared storage format, owned exclusively
//! by the pipeline stage that allocated it and released deterministically on
//! pipeline teardown or resource reload.

use crate::gl::{RenderDevice, TextureHandle};

/// Declared storage format of a pack-allocated image.
///
/// Closed set: shader packs declare one of these per auxiliary image. Depth
/// formats exist so the pipeline can own its shadow/depth attachments, but
/// they have no color element type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ImageFormat {
    Rgba8,
    Rgba16F,
    Rgba32F,
    R11FG11FB10F,
    R32F,
    Rgba8I,
    Rgba32I,
    R32I,
    Rgba8UI,
    Rgba32UI,
    R32UI,
    Depth24,
    Depth32F,
}

/// Element type of a color image, selecting the typed clear operation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PixelKind {
    Float,
    Int,
    Uint,
}

impl ImageFormat {
    /// The color element type of this format, or `None` for depth formats.
    #[must_use]
    pub fn pixel_kind(self) -> Option<PixelKind> {
        match self {
            Self::Rgba8 | Self::Rgba16F | Self::Rgba32F | Self::R11FG11FB10F | Self::R32F => {
                Some(PixelKind::Float)
            }
            Self::Rgba8I | Self::Rgba32I | Self::R32I => Some(PixelKind::Int),
            Self::Rgba8UI | Self::Rgba32UI | Self::R32UI => Some(PixelKind::Uint),
            Self::Depth24 | Self::Depth32F => None,
        }
    }
}

/// A pack-owned GPU image.
///
/// Ownership is exclusive; `destroy` must be called exactly once, on the
/// render thread, before the owning pipeline is dropped.
pub struct ImageResource {
    handle: TextureHandle,
    format: ImageFormat,
    width: u32,
    height: u32,
    destroyed: bool,
}

impl ImageResource {
    #[must_use]
    pub fn new(handle: TextureHandle, format: ImageFormat, width: u32, height: u32) -> Self {
        Self {
            handle,
            format,
            width,
            height,
            destroyed: false,
        }
    }

    #[must_use]
    pub fn handle(&self) -> TextureHandle {
        debug_assert!(!self.destroyed, "image used after destroy");
        self.handle
    }

    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frees the GPU image. Calling any accessor afterwards is a
    /// programming error.
    pub fn destroy(&mut self, device: &mut dyn RenderDevice) {
        debug_assert!(!self.destroyed, "image destroyed twice");
        device.delete_texture(self.handle);
        self.destroyed = true;
    }
}
