//! Clear Passes
//!
//! Two flavors of attachment clearing:
//!
//! - [`ImageClearPass`]: owns a minimal framebuffer wrapping one pack image
//!   and zeroes it with the clear variant matching the image's declared
//!   element type. The variant is a tagged three-way choice fixed at
//!   construction; there is no per-call re-dispatch and no fallback for a
//!   format with no color element type.
//! - [`FullClearPass`]: clears a whole framebuffer to a configured color
//!   with a color/depth selection mask, used for the main render targets at
//!   frame start.

use glam::Vec4;
use log::trace;

use crate::errors::{PrismError, Result};
use crate::gl::{FramebufferHandle, RenderDevice};
use crate::targets::image::{ImageResource, PixelKind};

bitflags::bitflags! {
    /// Selection mask for [`FullClearPass`].
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct ClearFlags: u32 {
        const COLOR = 1;
        const DEPTH = 1 << 1;
    }
}

/// Typed clear variant, chosen once from the image's declared element type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ClearVariant {
    Float,
    Int,
    Uint,
}

impl From<PixelKind> for ClearVariant {
    fn from(kind: PixelKind) -> Self {
        match kind {
            PixelKind::Float => Self::Float,
            PixelKind::Int => Self::Int,
            PixelKind::Uint => Self::Uint,
        }
    }
}

/// Zeroes a single pack image through an owned framebuffer.
pub struct ImageClearPass {
    framebuffer: FramebufferHandle,
    variant: ClearVariant,
    destroyed: bool,
}

impl ImageClearPass {
    /// Builds the pass: allocates a framebuffer, attaches the image as color
    /// attachment 0 and fixes the clear variant from the image's format.
    ///
    /// Fails for formats with no color element type (depth images); no pass
    /// is produced in that case.
    pub fn new(device: &mut dyn RenderDevice, image: &ImageResource) -> Result<Self> {
        let kind = image
            .format()
            .pixel_kind()
            .ok_or(PrismError::UnsupportedClearFormat {
                format: image.format(),
            })?;

        let framebuffer = device.create_framebuffer();
        device.attach_color(framebuffer, 0, image.handle());

        Ok(Self {
            framebuffer,
            variant: ClearVariant::from(kind),
            destroyed: false,
        })
    }

    /// Dispatches the typed zero clear. Must not be called after
    /// [`destroy`](Self::destroy).
    pub fn execute(&self, device: &mut dyn RenderDevice) {
        debug_assert!(!self.destroyed, "clear pass executed after destroy");

        device.bind_framebuffer(Some(self.framebuffer));
        match self.variant {
            ClearVariant::Float => device.clear_color_f(0, [0.0; 4]),
            ClearVariant::Int => device.clear_color_i(0, [0; 4]),
            ClearVariant::Uint => device.clear_color_u(0, [0; 4]),
        }
    }

    /// Releases the owned framebuffer. The attached image is not freed; it
    /// belongs to the pipeline.
    pub fn destroy(&mut self, device: &mut dyn RenderDevice) {
        debug_assert!(!self.destroyed, "clear pass destroyed twice");
        device.delete_framebuffer(self.framebuffer);
        self.destroyed = true;
    }
}

/// Clears an entire framebuffer to a configured color at frame start.
pub struct FullClearPass {
    framebuffer: Option<FramebufferHandle>,
    flags: ClearFlags,
    color: Vec4,
}

impl FullClearPass {
    /// `framebuffer == None` targets the host default framebuffer.
    #[must_use]
    pub fn new(framebuffer: Option<FramebufferHandle>, flags: ClearFlags, color: Vec4) -> Self {
        Self {
            framebuffer,
            flags,
            color,
        }
    }

    pub fn execute(&self, device: &mut dyn RenderDevice) {
        trace!("full clear {:?} -> {:?}", self.flags, self.framebuffer);
        device.bind_framebuffer(self.framebuffer);
        device.clear(self.flags, self.color);
    }

    #[must_use]
    pub fn flags(&self) -> ClearFlags {
        self.flags
    }

    #[must_use]
    pub fn color(&self) -> Vec4 {
        self.color
    }
}
