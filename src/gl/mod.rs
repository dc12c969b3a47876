//! Host GPU Command Surface
//!
//! The host engine owns the real graphics context; this crate only issues
//! commands against it. [`RenderDevice`] is that seam: a direct, blocking
//! command surface modeled on the host's fixed-function-era API (programs,
//! framebuffers, texture units, uniforms addressed by integer location).
//!
//! All handles are opaque integers issued by the host. The crate never
//! fabricates handle values; it only stores and replays them.
//!
//! # Threading
//!
//! Every method must be called from the single designated render thread.
//! Nothing here is `Send`/`Sync`-bounded on purpose — sharing a device
//! across threads is a host-contract violation, not something this layer
//! can recover from.

use glam::{IVec2, IVec3, Mat4, Vec2, Vec3, Vec4};

use crate::targets::clear_pass::ClearFlags;
use crate::targets::image::ImageFormat;

/// Handle to a compiled, linked shader program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ProgramHandle(pub u32);

/// Handle to a GPU texture object (also used for image attachments).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TextureHandle(pub u32);

/// Handle to a framebuffer object.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FramebufferHandle(pub u32);

/// Location of a uniform slot within a linked program.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UniformLocation(pub i32);

/// The texture unit observed for pipeline-relevant rebinds (unit 0, the
/// primary sampling unit of the fixed pipeline).
pub const PRIMARY_SAMPLER_UNIT: u32 = 0;

/// Direct command surface into the host graphics context.
///
/// Implementations forward to the real graphics API on the render thread.
/// Tests substitute a recording mock.
pub trait RenderDevice {
    /// Binds `program` as the active program, or restores the host default
    /// when `None`.
    fn bind_program(&mut self, program: Option<ProgramHandle>);

    /// Frees a compiled program. The caller must guarantee no uniform
    /// wrapper targeting this program is updated afterwards.
    fn delete_program(&mut self, program: ProgramHandle);

    fn uniform1i(&mut self, location: UniformLocation, value: i32);
    fn uniform1f(&mut self, location: UniformLocation, value: f32);
    fn uniform2f(&mut self, location: UniformLocation, value: Vec2);
    fn uniform3f(&mut self, location: UniformLocation, value: Vec3);
    fn uniform4f(&mut self, location: UniformLocation, value: Vec4);
    fn uniform2i(&mut self, location: UniformLocation, value: IVec2);
    fn uniform3i(&mut self, location: UniformLocation, value: IVec3);
    fn uniform_matrix4f(&mut self, location: UniformLocation, value: &Mat4);

    fn create_framebuffer(&mut self) -> FramebufferHandle;

    /// Binds `framebuffer` as the draw target, or the host's default
    /// framebuffer when `None`.
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferHandle>);

    fn delete_framebuffer(&mut self, framebuffer: FramebufferHandle);

    /// Attaches `texture` as color attachment `index` of `framebuffer`.
    fn attach_color(&mut self, framebuffer: FramebufferHandle, index: u32, texture: TextureHandle);

    /// Typed clear of color attachment `draw_buffer` of the currently bound
    /// framebuffer. The float/int/uint variants must match the attachment's
    /// declared element type.
    fn clear_color_f(&mut self, draw_buffer: u32, value: [f32; 4]);
    fn clear_color_i(&mut self, draw_buffer: u32, value: [i32; 4]);
    fn clear_color_u(&mut self, draw_buffer: u32, value: [u32; 4]);

    /// Legacy whole-framebuffer clear with an RGBA clear color and a
    /// color/depth selection mask.
    fn clear(&mut self, flags: ClearFlags, color: Vec4);

    fn bind_texture(&mut self, unit: u32, texture: TextureHandle);
    fn delete_texture(&mut self, texture: TextureHandle);

    /// Allocates an immutable-storage image of the given format and size.
    fn create_image(&mut self, format: ImageFormat, width: u32, height: u32) -> TextureHandle;
}
